use clap::Args;
use eyre::Result;
use tracing::debug;

use super::{ManifestArgs, UnwrapOrExit};
use crate::{
    literal::parse_value,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct NewCommand {
    /// Fully qualified type to construct
    #[arg(value_name = "TYPE")]
    pub ty: String,

    /// Constructor arguments (`10`, `10L`, `1.5`, `'c'`, `"text"`, `true`, `null`, `int:10`)
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    pub args: Vec<String>,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

impl NewCommand {
    /// Run the new command
    pub fn run(&self) -> Result<()> {
        let (_, manifest) = self.manifest.load();
        let types = manifest.registry();

        let args = self.args.iter().map(|a| parse_value(a)).collect();
        let report = ops::render_object(&types, &self.ty, args).unwrap_or_exit();
        debug!(ty = %report.ty, "rendered construction");
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
