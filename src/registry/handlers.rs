//! Collaborator-facing entry points into the registry.
//!
//! The hosting platform talks to the console through two narrow traits: one
//! for container discovery and one for lifecycle events. The handlers below
//! implement them on top of a shared [`Registry`].

use std::sync::Arc;

use super::Registry;
use crate::engine::{Container, LifecycleEvent, ModuleId};

/// Receives container appear/disappear notifications from the hosting platform.
///
/// Implementations must tolerate duplicate notifications for the same module.
pub trait ContainerDiscovery: Send + Sync {
    /// A container service for `module` became available.
    fn on_discovered(&self, module: ModuleId, container: Arc<dyn Container>);

    /// The container service for `module` went away.
    fn on_lost(&self, module: ModuleId);
}

/// Receives every state transition of every container.
pub trait LifecycleListener: Send + Sync {
    /// A container changed state.
    fn on_event(&self, event: LifecycleEvent);
}

/// Keeps the registry's container references in step with discovery.
#[derive(Clone)]
pub struct ContainerTracker {
    registry: Arc<Registry>,
}

impl ContainerTracker {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
        }
    }
}

impl ContainerDiscovery for ContainerTracker {
    fn on_discovered(&self, module: ModuleId, container: Arc<dyn Container>) {
        self.registry.add_container(module, container);
    }

    fn on_lost(&self, module: ModuleId) {
        self.registry.remove_container(module);
    }
}

/// Feeds lifecycle events into the registry.
///
/// Events whose snapshot cannot be built are logged and dropped; the previous
/// snapshot of the module, if any, stays in place.
#[derive(Clone)]
pub struct EventListener {
    registry: Arc<Registry>,
}

impl EventListener {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
        }
    }
}

impl LifecycleListener for EventListener {
    fn on_event(&self, event: LifecycleEvent) {
        let module = event.module.clone();
        let kind = event.kind;
        if let Err(e) = self.registry.record_event(event) {
            tracing::error!("Dropping {:?} event for module {}: {}", kind, module, e);
        }
    }
}
