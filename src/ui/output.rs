//! ui::output
//!
//! Terminal streams for metadv commands.
//!
//! stdout carries what a command produced: the validation report, the
//! artifact summary, or the `--json` document. `--quiet` silences the
//! report lines but never a JSON payload, which commands write themselves.
//!
//! stderr carries everything about the run: `warning:` lines for
//! non-blocking validation messages, `error:` lines for blocking ones and
//! command failures, and `[debug]` traces under `--debug`. Library logging
//! reaches stderr separately through `env_logger`.

use std::fmt::Display;

/// How much a command says on the terminal, from `--quiet` and `--debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only errors and JSON payloads.
    Quiet,
    Normal,
    /// Adds `[debug]` traces on stderr.
    Debug,
}

impl Verbosity {
    /// `--quiet` wins when both flags are given.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Report line on stdout.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Trace line on stderr, `--debug` only.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Blocking error or command failure on stderr, even under `--quiet`.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Non-blocking validation message on stderr.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Completion line on stdout, such as where artifacts were written.
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}
