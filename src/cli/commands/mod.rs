//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds the engine context from its arguments
//! 2. Calls the engine to load, validate, and resolve
//! 3. Formats and displays output
//!
//! Handlers never interpret annotations themselves. A handler that fails
//! returns an error; the binary maps any error to exit status 1.

mod completion;
mod resolve;
mod validate;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use resolve::resolve;
pub use validate::validate;

use crate::cli::args::Command;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Validate {
            project,
            json,
            verbose,
        } => validate::validate(ctx, &project, json, verbose),
        Command::Resolve {
            project,
            package,
            output,
            json,
        } => resolve(ctx, &project, package, output.as_deref(), json),
        Command::Completion { shell } => completion::completion(shell),
    }
}
