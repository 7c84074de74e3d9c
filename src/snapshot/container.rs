//! Immutable view of one module's container at its latest lifecycle event.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use super::recipe::{RecipeSnapshot, compare_recipes};
use crate::core::ConsoleError;
use crate::engine::{Container, EventCause, EventKind, LifecycleEvent, ModuleId, ModuleInfo};

/// The console's picture of one container after one lifecycle event.
///
/// Equality and hashing only consider the owning module and the event
/// timestamp. Two snapshots of the same module stamped with the same instant
/// are treated as duplicates even if the event kinds differ.
#[derive(Debug, Clone)]
pub struct ContainerSnapshot {
    event: LifecycleEvent,
    recipes: Vec<RecipeSnapshot>,
    unsatisfied_count: usize,
}

impl ContainerSnapshot {
    /// Capture `event` together with the container's current recipe set.
    ///
    /// An absent container yields an empty recipe set. This covers the window
    /// between a discovery removal and the delivery of a late event.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidContainerKind`] if the container does not
    /// expose a recipe repository.
    pub fn new(
        event: LifecycleEvent,
        container: Option<&dyn Container>,
    ) -> Result<Self, ConsoleError> {
        let Some(container) = container else {
            return Ok(Self {
                event,
                recipes: Vec::new(),
                unsatisfied_count: 0,
            });
        };

        let repository =
            container.repository().ok_or_else(|| ConsoleError::InvalidContainerKind {
                container: container.describe(),
            })?;

        let mut seen = HashSet::new();
        let mut recipes = Vec::new();
        for recipe in repository.all_recipes() {
            let snapshot = RecipeSnapshot::from_recipe(recipe.as_ref());
            if !seen.insert(snapshot.name().to_string()) {
                tracing::warn!(
                    "Duplicate recipe '{}' in container {} of module {}, keeping the first",
                    snapshot.name(),
                    container.describe(),
                    event.module.id
                );
                continue;
            }
            recipes.push(snapshot);
        }
        recipes.sort_by(compare_recipes);

        let unsatisfied_count = recipes.iter().filter(|r| r.is_unsatisfied()).count();

        Ok(Self {
            event,
            recipes,
            unsatisfied_count,
        })
    }

    /// The lifecycle event this snapshot was taken for.
    pub fn event(&self) -> &LifecycleEvent {
        &self.event
    }

    /// The module owning the container.
    pub fn module(&self) -> &ModuleInfo {
        &self.event.module
    }

    /// Identifier of the owning module.
    pub fn module_id(&self) -> ModuleId {
        self.event.module.id
    }

    /// Type of the captured event.
    pub fn event_kind(&self) -> EventKind {
        self.event.kind
    }

    /// When the event was emitted.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.event.timestamp
    }

    /// Error carried by a failure event.
    pub fn cause(&self) -> Option<&EventCause> {
        self.event.cause.as_ref()
    }

    /// Dependencies the container is waiting for, if the event reported any.
    pub fn missing_dependencies(&self) -> Option<&[String]> {
        self.event.dependencies.as_deref()
    }

    /// Recipes in display order, unique by name.
    pub fn recipes(&self) -> &[RecipeSnapshot] {
        &self.recipes
    }

    /// Number of satisfiable recipes whose resource is missing.
    pub fn unsatisfied_count(&self) -> usize {
        self.unsatisfied_count
    }

    /// Display label of the event type.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UnknownEventKind`] for unrecognised type codes.
    pub fn event_type_name(&self) -> Result<&'static str, ConsoleError> {
        self.event.kind.label()
    }

    /// Missing dependencies as `[a, b]`, or an empty string when none were reported.
    pub fn missing_dependencies_string(&self) -> String {
        match &self.event.dependencies {
            Some(dependencies) => format!("[{}]", dependencies.join(", ")),
            None => String::new(),
        }
    }

    /// Cause with its full chain, or an empty string when there is none.
    pub fn cause_stack_trace(&self) -> String {
        self.event.cause.as_ref().map(EventCause::stack_trace).unwrap_or_default()
    }

    /// Event timestamp rendered with a chrono format string.
    pub fn formatted_timestamp(&self, format: &str) -> String {
        self.event.timestamp.format(format).to_string()
    }
}

impl PartialEq for ContainerSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.module_id() == other.module_id() && self.timestamp() == other.timestamp()
    }
}

impl Eq for ContainerSnapshot {}

impl Hash for ContainerSnapshot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.module_id().hash(state);
        self.timestamp().hash(state);
    }
}

/// Display order of containers.
///
/// Oldest event first, then module symbolic name, then module version.
/// Containers equal on all three keys compare as equal and keep their
/// relative order under a stable sort. Both are listed: sorting never
/// collapses equal containers into one entry the way an ordered set would.
pub fn compare_containers(a: &ContainerSnapshot, b: &ContainerSnapshot) -> Ordering {
    a.timestamp()
        .cmp(&b.timestamp())
        .then_with(|| a.module().symbolic_name.cmp(&b.module().symbolic_name))
        .then_with(|| a.module().version.cmp(&b.module().version))
}
