use clap::Args;
use eyre::Result;

use super::ManifestArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let (path, manifest) = self.manifest.load();

        let report = ops::check(&manifest, path.as_deref());
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
