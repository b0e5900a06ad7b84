//! cli
//!
//! Command-line interface layer for metadv.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. Rendering and file output happen only
//! after the engine returns a resolved model.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli);

    let ctx = engine::Context {
        debug: cli.debug,
        quiet: cli.quiet,
        ..engine::Context::default()
    };

    commands::dispatch(cli.command, &ctx)
}

/// Send `log` output to stderr; `RUST_LOG` overrides the flag-derived level.
fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(cli.log_level())
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Stderr);
    // A logger may already be installed when run from tests.
    let _ = builder.try_init();
}
