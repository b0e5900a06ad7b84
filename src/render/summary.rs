//! render::summary
//!
//! Markdown overview of the resolved artifacts.
//!
//! # Example Output
//!
//! ```markdown
//! ### Artifacts (automate_dv)
//!
//! | Kind | Artifact | Sources |
//! |------|----------|---------|
//! | stage | `stg_customers` | `customers` |
//! | hub | `hub_customer` | `stg_customers` |
//! | sat | `sat_customer__customers` | `stg_customers` |
//! ```

use super::{RenderError, Renderer};
use crate::resolve::ResolvedModel;

/// Markdown table of every artifact and where it reads from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRenderer;

impl Renderer for SummaryRenderer {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn render(&self, resolved: &ResolvedModel) -> Result<String, RenderError> {
        Ok(summary_table(resolved))
    }
}

fn code_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|s| format!("`{}`", s.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn summary_table(resolved: &ResolvedModel) -> String {
    let mut lines = vec![
        format!("### Artifacts ({})", resolved.prefix),
        String::new(),
        "| Kind | Artifact | Sources |".to_string(),
        "|------|----------|---------|".to_string(),
    ];

    for stage in &resolved.stages {
        lines.push(format!(
            "| stage | `{}` | {} |",
            stage.name,
            code_list(&[&stage.source_name])
        ));
    }
    for hub in &resolved.hubs {
        lines.push(format!(
            "| hub | `{}` | {} |",
            hub.name,
            code_list(&hub.contributing_stage_refs)
        ));
    }
    for link in &resolved.links {
        lines.push(format!(
            "| link | `{}` | {} |",
            link.name,
            code_list(&link.contributing_stage_refs)
        ));
    }
    for sat in &resolved.sats {
        let kind = if sat.multiactive { "ma_sat" } else { "sat" };
        lines.push(format!(
            "| {} | `{}` | {} |",
            kind,
            sat.name,
            code_list(&[&sat.stage_ref])
        ));
    }

    if resolved.artifact_count() == 0 {
        lines.push("| - | no artifacts | - |".to_string());
    }

    lines.push(String::new());
    lines.join("\n")
}
