//! render::json

use super::{RenderError, Renderer};
use crate::resolve::ResolvedModel;

/// Pretty JSON of the full resolved model.
///
/// Object keys keep the resolved insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, resolved: &ResolvedModel) -> Result<String, RenderError> {
        let mut text = serde_json::to_string_pretty(resolved)?;
        text.push('\n');
        Ok(text)
    }
}
