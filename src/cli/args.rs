//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::Package;

/// metadv - Resolve metadata annotations into Data Vault artifacts
#[derive(Parser, Debug)]
#[command(name = "metadv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Default log filter for the flags given.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a project's metadata annotations
    #[command(
        name = "validate",
        long_about = "Validate a project's metadata annotations.\n\n\
            Loads models/metadv/metadv.yml, normalizes every column annotation, and runs \
            all validation rules. Errors block generation; warnings never do. Exits with \
            status 1 when any error is reported.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check the project in the current directory
    metadv validate .

    # Include warnings in the output
    metadv validate . --verbose

    # Machine-readable report for CI
    metadv validate . --json"
    )]
    Validate {
        /// dbt project root
        #[arg(default_value = ".")]
        project: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also list warnings
        #[arg(short, long)]
        verbose: bool,
    },

    /// Resolve annotations into stage, hub, link, and satellite artifacts
    #[command(
        name = "resolve",
        long_about = "Resolve annotations into stage, hub, link, and satellite artifacts.\n\n\
            Runs the full pipeline. If validation reports any error, nothing is resolved \
            and every error is printed. The package is taken from --package, else detected \
            from packages.yml or dependencies.yml, else automate_dv.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Overview of what would be generated
    metadv resolve .

    # Full resolved model for a renderer
    metadv resolve . --json --output target/metadv.json

    # Force a package family
    metadv resolve . --package datavault4dbt"
    )]
    Resolve {
        /// dbt project root
        #[arg(default_value = ".")]
        project: PathBuf,

        /// Package family (automate_dv or datavault4dbt)
        #[arg(long, short)]
        package: Option<Package>,

        /// Write the output to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Emit the resolved model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    metadv completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    metadv completion zsh >> ~/.zshrc

    # Fish
    metadv completion fish > ~/.config/fish/completions/metadv.fish

    # PowerShell
    metadv completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
