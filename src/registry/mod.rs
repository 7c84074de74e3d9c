//! Event-driven cache of container snapshots.
//!
//! The [`Registry`] keeps two concurrent maps keyed by [`ModuleId`]:
//!
//! - live container references, maintained by the discovery tracker
//! - the latest [`ContainerSnapshot`] per module, maintained by the lifecycle listener
//!
//! # Transitions
//!
//! | Notification | Effect |
//! |---|---|
//! | discovery add | store the container reference (overwrites) |
//! | discovery remove | drop the reference, keep any snapshot |
//! | event, not destroyed | rebuild the snapshot from the current reference |
//! | event, destroyed | drop both the reference and the snapshot |
//!
//! # Concurrency
//!
//! Both maps are [`DashMap`]s, so writers on notification threads and readers
//! on request threads never take an external lock. Concurrent events for the
//! same module resolve last-writer-wins. The two maps are not updated
//! atomically together: a snapshot may outlive its reference for a moment,
//! and a late event for a module whose reference is already gone produces an
//! empty snapshot.
//!
//! [`Registry::snapshot_all`] is a point-in-time read. It does not block
//! writers and may miss an update that is in flight.

mod handlers;

pub use handlers::{ContainerDiscovery, ContainerTracker, EventListener, LifecycleListener};

use dashmap::DashMap;
use std::sync::Arc;

use crate::core::ConsoleError;
use crate::engine::{Container, EventKind, LifecycleEvent, ModuleId};
use crate::snapshot::{ContainerSnapshot, compare_containers};

/// What the registry currently holds for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Nothing known, or evicted by a destroy event.
    Absent,
    /// Container reference known, no event received yet.
    Discovered,
    /// Container reference and snapshot present.
    Active,
    /// Snapshot retained after the container reference was removed.
    Detached,
}

/// Process-scoped cache of container references and snapshots.
///
/// Created empty when the plugin activates and cleared when it deactivates.
/// Shared between the notification handlers and the render path via `Arc`.
#[derive(Default)]
pub struct Registry {
    containers: DashMap<ModuleId, Arc<dyn Container>>,
    snapshots: DashMap<ModuleId, Arc<ContainerSnapshot>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            containers: DashMap::new(),
            snapshots: DashMap::new(),
        }
    }

    /// Store the container reference of a module. Repeated adds overwrite.
    pub fn add_container(&self, module: ModuleId, container: Arc<dyn Container>) {
        tracing::debug!("Container discovered for module {}: {}", module, container.describe());
        self.containers.insert(module, container);
    }

    /// Forget the container reference of a module. The snapshot is left alone.
    pub fn remove_container(&self, module: ModuleId) {
        if self.containers.remove(&module).is_some() {
            tracing::debug!("Container lost for module {}", module);
        }
    }

    /// Apply a lifecycle event.
    ///
    /// A destroy event evicts everything stored for the module. Any other event
    /// replaces the module's snapshot with one built from the current container
    /// reference.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidContainerKind`] if the stored container
    /// cannot be snapshotted. The registry is left unchanged in that case.
    pub fn record_event(&self, event: LifecycleEvent) -> Result<(), ConsoleError> {
        let module = event.module.id;

        if event.kind == EventKind::Destroyed {
            self.snapshots.remove(&module);
            self.containers.remove(&module);
            tracing::debug!("Module {} destroyed, evicted from registry", module);
            return Ok(());
        }

        // Clone the reference out so no shard lock is held while reading recipes
        let container = self.containers.get(&module).map(|entry| Arc::clone(entry.value()));
        if container.is_none() {
            tracing::debug!(
                "No container reference for module {} on {:?}, recording empty snapshot",
                module,
                event.kind
            );
        }

        let snapshot = ContainerSnapshot::new(event, container.as_deref())?;
        tracing::debug!(
            "Recorded {:?} for module {} ({} recipes, {} unsatisfied)",
            snapshot.event_kind(),
            module,
            snapshot.recipes().len(),
            snapshot.unsatisfied_count()
        );
        self.snapshots.insert(module, Arc::new(snapshot));
        Ok(())
    }

    /// All current snapshots in display order.
    ///
    /// One entry per module, even when two modules tie on every sort key.
    pub fn snapshot_all(&self) -> Vec<Arc<ContainerSnapshot>> {
        let mut snapshots: Vec<Arc<ContainerSnapshot>> =
            self.snapshots.iter().map(|entry| Arc::clone(entry.value())).collect();
        snapshots.sort_by(|a, b| compare_containers(a, b));
        snapshots
    }

    /// Latest snapshot of one module.
    pub fn get(&self, module: ModuleId) -> Option<Arc<ContainerSnapshot>> {
        self.snapshots.get(&module).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether a container reference is currently stored for the module.
    pub fn has_container(&self, module: ModuleId) -> bool {
        self.containers.contains_key(&module)
    }

    /// What the registry holds for one module.
    pub fn state(&self, module: ModuleId) -> ModuleState {
        match (self.containers.contains_key(&module), self.snapshots.contains_key(&module)) {
            (false, false) => ModuleState::Absent,
            (true, false) => ModuleState::Discovered,
            (true, true) => ModuleState::Active,
            (false, true) => ModuleState::Detached,
        }
    }

    /// Number of modules with a snapshot.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no module has a snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every reference and snapshot.
    pub fn clear(&self) {
        self.containers.clear();
        self.snapshots.clear();
    }
}
