//! engine
//!
//! Orchestrates the resolution pipeline: Load -> Normalize -> Context ->
//! Validate -> Gate -> Resolve.
//!
//! # Architecture
//!
//! The engine is the central coordinator for every command:
//!
//! 1. **Load**: Locate and parse the configuration document
//! 2. **Normalize**: Turn every column annotation into canonical connections
//! 3. **Context**: Build the read-only graph/validation context
//! 4. **Validate**: Run every registered rule into one report
//! 5. **Gate**: Stop if any error-severity message exists
//! 6. **Resolve**: Derive stages and group hubs, links, and satellites
//!
//! # Pipeline
//!
//! ```text
//! Load -> Normalize -> Context -> Validate -> Gate -> Resolve -> (renderer)
//! ```
//!
//! # Invariants
//!
//! - One linear pass; nothing is retried or revisited
//! - Everything after Load is pure and performs no I/O
//! - A blocked gate surfaces every error, and no partial result is returned
//!
//! # Example
//!
//! ```no_run
//! use metadv::engine::{self, Context};
//!
//! let ctx = Context::for_project("/path/to/dbt/project");
//! match engine::run(&ctx) {
//!     Ok(resolution) => println!("{} artifacts", resolution.resolved.artifact_count()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod gate;
pub mod health;

pub use gate::{gate, BlockedBundle, GateResult};
pub use health::{MessageId, Severity, ValidationMessage, ValidationReport, ValidationSummary};

use std::path::{Path, PathBuf};

use crate::core::config::{Config, ConfigError, ConfigWarning, Package};
use crate::core::graph::GraphContext;
use crate::core::normalize;
use crate::core::types::Model;
use crate::resolve::{self, ResolvedModel};
use crate::rules::RuleRegistry;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// dbt project root.
    pub project: PathBuf,
    /// Package override. Detected from the project when absent.
    pub package: Option<Package>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Create a context for a project with default settings.
    pub fn for_project(project: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            ..Self::default()
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation produced errors. Carries every error, not just the first.
    #[error("validation failed: {}", join_messages(.errors))]
    Validation { errors: Vec<ValidationMessage> },
}

impl EngineError {
    /// Check if this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation { .. })
    }
}

fn join_messages(errors: &[ValidationMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A loaded and normalized project.
#[derive(Debug)]
pub struct Loaded {
    /// Where the document was loaded from.
    pub path: PathBuf,
    /// The normalized model.
    pub model: Model,
    /// Package artifacts are resolved for.
    pub package: Package,
    /// Warnings from loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Output of a successful pipeline run.
#[derive(Debug)]
pub struct Resolution {
    /// The validation report (warnings only).
    pub report: ValidationReport,
    /// The resolved artifacts.
    pub resolved: ResolvedModel,
}

/// Load and normalize the project's configuration.
///
/// # Errors
///
/// Returns [`EngineError::Config`] if the document is missing or malformed.
pub fn load(ctx: &Context) -> Result<Loaded, EngineError> {
    let result = Config::load(&ctx.project)?;
    for warning in &result.warnings {
        log::warn!("{} ({})", warning.message, warning.path.display());
    }

    let model = normalize::normalize_document(&result.document);
    let package = select_package(ctx.package, &ctx.project);
    log::debug!(
        "normalized {} targets, {} sources for {}",
        model.targets.len(),
        model.sources.len(),
        package
    );

    Ok(Loaded {
        path: result.path,
        model,
        package,
        warnings: result.warnings,
    })
}

/// Pick the package: explicit choice, then detection, then the default.
pub fn select_package(explicit: Option<Package>, project: &Path) -> Package {
    explicit
        .or_else(|| Package::detect(project))
        .unwrap_or_default()
}

/// Run every registered rule over a model.
pub fn validate(model: &Model, rules: &RuleRegistry) -> ValidationReport {
    rules.run(&GraphContext::build(model))
}

/// Validate, gate, and resolve a model.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] with every error if any rule reports
/// one.
pub fn resolve_model(
    model: &Model,
    package: Package,
    rules: &RuleRegistry,
) -> Result<Resolution, EngineError> {
    let graph = GraphContext::build(model);

    let report = match gate(rules.run(&graph)) {
        GateResult::Ready(report) => report,
        GateResult::Blocked(bundle) => {
            log::debug!("{}", bundle.summary());
            return Err(EngineError::Validation {
                errors: bundle.errors,
            });
        }
    };

    let resolved = resolve::resolve(&graph, package);
    Ok(Resolution { report, resolved })
}

/// Run the full pipeline with the built-in rules.
///
/// # Errors
///
/// Returns [`EngineError::Config`] if loading fails, or
/// [`EngineError::Validation`] if validation reports errors.
pub fn run(ctx: &Context) -> Result<Resolution, EngineError> {
    let loaded = load(ctx)?;
    resolve_model(&loaded.model, loaded.package, &RuleRegistry::builtin())
}
