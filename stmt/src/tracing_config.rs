//! Tracing setup for debugging type resolution.
//!
//! ```bash
//! # Constructor resolution and implicit completion
//! STMT_LOG=debug stmt new com.example.Point 1 2 -t types.toml
//!
//! # Everything, including scope declarations
//! STMT_LOG=stmtgen_codegen=trace,stmtgen_meta=trace stmt check
//! ```
//!
//! The subscriber is only initialised when `STMT_LOG` (or `RUST_LOG`) is
//! set, so normal runs pay nothing for it.

use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from `STMT_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("STMT_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Output goes to stderr so rendered expressions on stdout stay clean.
pub fn init_tracing() {
    let has_stmt_log = std::env::var("STMT_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_stmt_log && !has_rust_log {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
