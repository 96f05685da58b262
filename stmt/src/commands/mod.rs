mod array;
mod check;
mod new;

use std::path::PathBuf;

use array::ArrayCommand;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use eyre::Result;
use new::NewCommand;
use stmtgen_manifest::Manifest;
use tracing::debug;

const DEFAULT_MANIFEST: &str = "types.toml";

/// Extension trait for exiting on manifest and builder errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for stmtgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for stmtgen_codegen::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Where to find the type manifest.
#[derive(Args)]
pub struct ManifestArgs {
    /// Path to the type manifest (defaults to ./types.toml when present)
    #[arg(short, long = "types", value_name = "PATH")]
    pub types: Option<PathBuf>,
}

impl ManifestArgs {
    /// Load the manifest.
    ///
    /// An explicit path must exist. Without one, `types.toml` is used when
    /// present and an empty manifest otherwise.
    pub fn load(&self) -> (Option<PathBuf>, Manifest) {
        let path = match &self.types {
            Some(path) => path.clone(),
            None => {
                let default = PathBuf::from(DEFAULT_MANIFEST);
                if !default.exists() {
                    debug!("no {} found, using core types only", DEFAULT_MANIFEST);
                    return (None, Manifest::default());
                }
                default
            }
        };

        let manifest = Manifest::from_file(&path).unwrap_or_exit();
        debug!(path = %path.display(), types = manifest.len(), "loaded type manifest");
        (Some(path), manifest)
    }
}

#[derive(Parser)]
#[command(name = "stmt")]
#[command(version)]
#[command(about = "Render typed construction expressions from a TOML type manifest")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::New(cmd) => cmd.run(),
            Commands::Array(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the type manifest and list its types
    Check(CheckCommand),

    /// Render `new T(args)` for a declared type
    New(NewCommand),

    /// Render an array allocation, optionally with initializer values
    Array(ArrayCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_array_args() {
        let cli = Cli::try_parse_from([
            "stmt", "array", "java.lang.String", "--len", "2", "\"1\"", "\"2\"",
        ])
        .unwrap();
        match cli.command {
            Commands::Array(cmd) => {
                assert_eq!(cmd.element, "java.lang.String");
                assert_eq!(cmd.len, Some(2));
                assert_eq!(cmd.values.len(), 2);
            }
            _ => panic!("expected the array command"),
        }
    }

    #[test]
    fn test_negative_arguments() {
        let cli = Cli::try_parse_from(["stmt", "new", "java.lang.Integer", "-5"]).unwrap();
        match cli.command {
            Commands::New(cmd) => assert_eq!(cmd.args, vec!["-5"]),
            _ => panic!("expected the new command"),
        }
    }
}
