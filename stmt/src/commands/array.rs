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
pub struct ArrayCommand {
    /// Element type (`int`, `java.lang.String`, ...)
    #[arg(value_name = "TYPE")]
    pub element: String,

    /// Fixed array length; omit for `new T[]`
    #[arg(short = 'n', long)]
    pub len: Option<usize>,

    /// Initializer values, in order
    #[arg(value_name = "VALUES", allow_negative_numbers = true)]
    pub values: Vec<String>,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

impl ArrayCommand {
    /// Run the array command
    pub fn run(&self) -> Result<()> {
        let (_, manifest) = self.manifest.load();
        let types = manifest.registry();

        let values = self.values.iter().map(|v| parse_value(v)).collect();
        let report = ops::render_array(&types, &self.element, self.len, values).unwrap_or_exit();
        debug!(ty = %report.ty, "rendered array");
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
