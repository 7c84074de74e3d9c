//! Tera wrapper for the container page.

use std::path::Path;
use tera::{Context as TeraContext, Tera};

use super::view_models::PageView;
use crate::constants::PAGE_TEMPLATE_NAME;
use crate::core::ConsoleError;

const TPL_PAGE: &str = include_str!("templates/blueprintcontainers.html");

/// Compiled page template.
///
/// The built-in template is embedded in the binary. A replacement can be read
/// from disk at construction time; it is registered under the same name, so
/// `.html` autoescaping applies to it as well.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Renderer using the embedded template.
    pub fn new() -> Result<Self, ConsoleError> {
        Self::from_source(TPL_PAGE)
    }

    /// Renderer compiled from template source.
    pub fn from_source(source: &str) -> Result<Self, ConsoleError> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE_NAME, source)?;
        Ok(Self {
            tera,
        })
    }

    /// Renderer compiled from a template file.
    pub async fn from_file(path: &Path) -> Result<Self, ConsoleError> {
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            ConsoleError::TemplateError {
                message: format!("Failed to read template {}: {e}", path.display()),
            }
        })?;
        tracing::debug!("Loaded page template from {}", path.display());
        Self::from_source(&source)
    }

    /// Render the page.
    pub fn render(&self, page: &PageView) -> Result<String, ConsoleError> {
        let context = TeraContext::from_serialize(page)?;
        Ok(self.tera.render(PAGE_TEMPLATE_NAME, &context)?)
    }
}
