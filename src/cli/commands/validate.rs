//! validate command - Run every rule and report messages

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::engine::{self, Context};
use crate::rules::RuleRegistry;
use crate::ui::output::{self, Verbosity};

/// Validate a project's annotations.
///
/// Prints the summary and errors (warnings with `verbose`), or the whole
/// report as JSON. Fails if any error-severity message was produced.
pub fn validate(ctx: &Context, project: &Path, json: bool, verbose: bool) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let ctx = Context {
        project: project.to_path_buf(),
        ..ctx.clone()
    };

    let loaded = engine::load(&ctx)
        .with_context(|| format!("failed to load project '{}'", project.display()))?;
    output::debug(format!("loaded {}", loaded.path.display()), verbosity);

    let report = engine::validate(&loaded.model, &RuleRegistry::builtin());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print(report.format(verbose), verbosity);
    }

    let errors = report.summary().error_count;
    if errors > 0 {
        bail!("validation failed with {} error(s)", errors);
    }
    Ok(())
}
