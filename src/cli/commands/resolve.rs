//! resolve command - Run the full pipeline and emit the resolved model

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::core::config::Package;
use crate::engine::{self, Context, EngineError};
use crate::render::{self, JsonRenderer, Renderer, SummaryRenderer};
use crate::rules::RuleRegistry;
use crate::ui::output::{self, Verbosity};

/// Resolve a project and print or write the result.
///
/// Validation errors are all printed before failing; nothing is rendered
/// in that case.
pub fn resolve(
    ctx: &Context,
    project: &Path,
    package: Option<Package>,
    out: Option<&Path>,
    json: bool,
) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let ctx = Context {
        project: project.to_path_buf(),
        package: package.or(ctx.package),
        ..ctx.clone()
    };

    let loaded = engine::load(&ctx)
        .with_context(|| format!("failed to load project '{}'", project.display()))?;
    output::debug(format!("resolving for {}", loaded.package), verbosity);

    let resolution =
        match engine::resolve_model(&loaded.model, loaded.package, &RuleRegistry::builtin()) {
            Ok(resolution) => resolution,
            Err(EngineError::Validation { errors }) => {
                for error in &errors {
                    output::error(error);
                }
                return Err(EngineError::Validation { errors }.into());
            }
            Err(e) => return Err(e.into()),
        };

    for warning in resolution.report.warnings() {
        output::warn(warning, verbosity);
    }

    let renderer: &dyn Renderer = if json { &JsonRenderer } else { &SummaryRenderer };
    match out {
        Some(path) => {
            render::render_to_file(renderer, &resolution.resolved, path)?;
            output::success(
                format!(
                    "Wrote {} artifacts to {}",
                    resolution.resolved.artifact_count(),
                    path.display()
                ),
                verbosity,
            );
        }
        None => print!("{}", renderer.render(&resolution.resolved)?),
    }
    Ok(())
}
