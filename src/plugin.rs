//! Console plugin: owns the registry across activation cycles and renders the page.

use std::sync::Arc;

use crate::config::PluginConfig;
use crate::core::ConsoleError;
use crate::registry::{ContainerTracker, EventListener, Registry};
use crate::render::{PageRenderer, PageView};
use crate::snapshot::ContainerSnapshot;

/// Web console plugin for blueprint containers.
///
/// Inactive after construction. [`activate`](Self::activate) creates a fresh
/// registry and hands out the two notification handlers bound to it;
/// [`deactivate`](Self::deactivate) clears and drops it. Handlers still held by
/// the hosting platform after deactivation only ever write into the cleared,
/// orphaned registry, which nothing reads anymore.
pub struct ConsolePlugin {
    config: PluginConfig,
    renderer: PageRenderer,
    registry: Option<Arc<Registry>>,
}

impl ConsolePlugin {
    /// Compile the page template and build an inactive plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::TemplateError`] if the configured template
    /// cannot be read or compiled.
    pub async fn new(config: PluginConfig) -> Result<Self, ConsoleError> {
        let renderer = match &config.template {
            Some(path) => PageRenderer::from_file(path).await?,
            None => PageRenderer::new()?,
        };
        Ok(Self::with_renderer(config, renderer))
    }

    /// Inactive plugin around an already compiled renderer.
    pub fn with_renderer(config: PluginConfig, renderer: PageRenderer) -> Self {
        Self {
            config,
            renderer,
            registry: None,
        }
    }

    /// Start tracking containers.
    ///
    /// Activating an already active plugin replaces its registry.
    pub fn activate(&mut self) -> (ContainerTracker, EventListener) {
        if let Some(previous) = self.registry.take() {
            tracing::warn!("Plugin '{}' activated twice, discarding previous registry", self.config.label);
            previous.clear();
        }

        let registry = Arc::new(Registry::new());
        self.registry = Some(Arc::clone(&registry));
        tracing::info!("Plugin '{}' activated", self.config.label);

        (ContainerTracker::new(Arc::clone(&registry)), EventListener::new(registry))
    }

    /// Stop tracking containers and drop everything recorded.
    pub fn deactivate(&mut self) {
        if let Some(registry) = self.registry.take() {
            registry.clear();
            tracing::info!("Plugin '{}' deactivated", self.config.label);
        }
    }

    /// Whether a registry is currently live.
    pub fn is_active(&self) -> bool {
        self.registry.is_some()
    }

    /// Label under which the hosting console lists this plugin.
    pub fn info(&self) -> &str {
        &self.config.label
    }

    /// Settings the plugin was built with.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// The live registry, if active.
    pub fn registry(&self) -> Option<&Arc<Registry>> {
        self.registry.as_ref()
    }

    /// Ordered snapshots; empty when inactive.
    pub fn snapshot_all(&self) -> Vec<Arc<ContainerSnapshot>> {
        self.registry.as_ref().map(|r| r.snapshot_all()).unwrap_or_default()
    }

    /// Page model for the current snapshots.
    pub fn page_view(&self) -> Result<PageView, ConsoleError> {
        PageView::new(
            self.config.title.as_str(),
            self.config.label.as_str(),
            &self.snapshot_all(),
            &self.config.timestamp_format,
        )
    }

    /// Render the container page.
    ///
    /// # Errors
    ///
    /// Any snapshot with an unrecognised event type fails the whole page with
    /// [`ConsoleError::UnknownEventKind`].
    pub fn render_page(&self) -> Result<String, ConsoleError> {
        let page = self.page_view()?;
        tracing::debug!("Rendering {} containers", page.container_count);
        self.renderer.render(&page)
    }
}
