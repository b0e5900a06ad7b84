//! render
//!
//! The seam between resolution and text output.
//!
//! # Design
//!
//! A [`Renderer`] turns a [`ResolvedModel`] into text. Renderers never see
//! the raw configuration or the graph context; the resolved model is the
//! whole contract. Template text for a package family plugs in here as
//! another implementation.
//!
//! Built in:
//! - [`JsonRenderer`] - the full resolved model as pretty JSON
//! - [`SummaryRenderer`] - a markdown overview of the artifacts
//!
//! # Example
//!
//! ```
//! use metadv::core::config::Package;
//! use metadv::core::graph::GraphContext;
//! use metadv::core::types::Model;
//! use metadv::render::{JsonRenderer, Renderer};
//! use metadv::resolve;
//!
//! let model = Model::default();
//! let resolved = resolve::resolve(&GraphContext::build(&model), Package::AutomateDv);
//! let text = JsonRenderer.render(&resolved).unwrap();
//! assert!(text.contains("\"prefix\": \"automate_dv\""));
//! ```

mod json;
mod summary;

pub use json::JsonRenderer;
pub use summary::SummaryRenderer;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::resolve::ResolvedModel;

/// Errors from rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize resolved model: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Turns a resolved model into text.
pub trait Renderer {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Render the model.
    fn render(&self, resolved: &ResolvedModel) -> Result<String, RenderError>;
}

/// Render and write to a file, creating parent directories.
pub fn render_to_file(
    renderer: &dyn Renderer,
    resolved: &ResolvedModel,
    path: &Path,
) -> Result<(), RenderError> {
    let text = renderer.render(resolved)?;
    let write_err = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, text).map_err(write_err)?;
    log::debug!("{} output written to {}", renderer.name(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Package;
    use crate::core::graph::GraphContext;
    use crate::core::types::Model;
    use crate::resolve;
    use tempfile::TempDir;

    #[test]
    fn writes_into_new_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("resolved.json");
        let model = Model::default();
        let resolved = resolve::resolve(&GraphContext::build(&model), Package::AutomateDv);

        render_to_file(&JsonRenderer, &resolved, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"stages\": []"));
    }
}
