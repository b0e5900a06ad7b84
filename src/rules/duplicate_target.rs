//! rules::duplicate_target

use super::Rule;
use crate::core::graph::GraphContext;
use crate::engine::health::ValidationMessage;

/// Errors when two targets share a name. The first declaration is the one
/// the rest of the pipeline sees.
pub struct DuplicateTarget;

impl Rule for DuplicateTarget {
    fn code(&self) -> &'static str {
        "duplicate_target"
    }

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<ValidationMessage> {
        let mut reported: Vec<&str> = Vec::new();
        let mut messages = Vec::new();

        for name in ctx.duplicate_targets() {
            if reported.contains(&name.as_str()) {
                continue;
            }
            reported.push(name);
            messages.push(ValidationMessage::error(
                self.code(),
                name,
                format!("Target '{}' is declared more than once", name),
            ));
        }
        messages
    }
}
