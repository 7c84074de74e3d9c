//! Replayable notification scenarios.
//!
//! A scenario declares modules with their recipes and a list of steps that
//! are fed, in order, to the two notification traits of the registry. The CLI
//! uses it to render the page for a recorded or hand-written sequence of
//! platform notifications.
//!
//! ```toml
//! [[modules]]
//! id = 1
//! symbolic_name = "com.example.orders"
//! version = "1.2.0"
//!
//! [[modules.recipes]]
//! name = "dataSource"
//! satisfied = false
//! selector = "(objectClass=javax.sql.DataSource)"
//!
//! [[steps]]
//! action = "discover"
//! module = 1
//!
//! [[steps]]
//! action = "event"
//! module = 1
//! kind = "grace-period"
//! timestamp = 1700000000000
//! dependencies = ["(objectClass=javax.sql.DataSource)"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::ConsoleError;
use crate::engine::{
    Container, EventCause, EventKind, LifecycleEvent, ModuleId, ModuleInfo, StaticContainer,
    StaticRecipe,
};
use crate::registry::{ContainerDiscovery, LifecycleListener};

/// Parsed scenario file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A module and the container it would publish.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSpec {
    pub id: u64,
    pub symbolic_name: String,
    pub version: String,
    /// `false` publishes a container without a recipe repository.
    #[serde(default = "default_capable")]
    pub capable: bool,
    #[serde(default)]
    pub recipes: Vec<RecipeSpec>,
}

const fn default_capable() -> bool {
    true
}

/// A recipe. Plain unless `satisfied` is given.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeSpec {
    pub name: String,
    pub satisfied: Option<bool>,
    pub selector: Option<String>,
}

/// One notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase", deny_unknown_fields)]
pub enum Step {
    Discover {
        module: u64,
    },
    Lose {
        module: u64,
    },
    Event {
        module: u64,
        kind: KindSpec,
        timestamp: i64,
        dependencies: Option<Vec<String>>,
        cause: Option<Vec<String>>,
    },
}

/// Event type by name (`grace-period`) or raw code.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KindSpec {
    Code(i32),
    Name(String),
}

impl KindSpec {
    fn resolve(&self) -> Result<EventKind, ConsoleError> {
        match self {
            Self::Code(code) => Ok(EventKind::from_code(*code)),
            Self::Name(name) => EventKind::parse(name).ok_or_else(|| ConsoleError::ScenarioError {
                reason: format!("unknown event kind '{name}'"),
            }),
        }
    }
}

/// Step with every reference resolved.
enum Notification {
    Discover(ModuleId, Arc<dyn Container>),
    Lose(ModuleId),
    Event(LifecycleEvent),
}

impl Scenario {
    /// Read and parse a scenario file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load scenario from {}", path.display()))
    }

    /// Parse scenario TOML.
    pub fn parse(content: &str) -> Result<Self, ConsoleError> {
        Ok(toml::from_str(content)?)
    }

    /// Feed every step to the handlers, in order.
    ///
    /// All steps are resolved before the first one is delivered, so an
    /// inconsistent scenario leaves the handlers untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::ScenarioError`] for duplicate module ids,
    /// references to undeclared modules or unknown event kind names, and
    /// [`ConsoleError::SemverError`] for malformed versions.
    pub fn replay(
        &self,
        tracker: &dyn ContainerDiscovery,
        listener: &dyn LifecycleListener,
    ) -> Result<(), ConsoleError> {
        let notifications = self.resolve()?;
        tracing::debug!("Replaying {} steps", notifications.len());

        for notification in notifications {
            match notification {
                Notification::Discover(module, container) => {
                    tracker.on_discovered(module, container);
                }
                Notification::Lose(module) => tracker.on_lost(module),
                Notification::Event(event) => listener.on_event(event),
            }
        }
        Ok(())
    }

    fn resolve(&self) -> Result<Vec<Notification>, ConsoleError> {
        let mut modules: HashMap<u64, (ModuleInfo, &ModuleSpec)> = HashMap::new();
        for spec in &self.modules {
            let info = ModuleInfo::parse(spec.id, spec.symbolic_name.as_str(), &spec.version)?;
            if modules.insert(spec.id, (info, spec)).is_some() {
                return Err(ConsoleError::ScenarioError {
                    reason: format!("module {} declared twice", spec.id),
                });
            }
        }

        let lookup = |id: u64, step: usize| {
            modules.get(&id).ok_or_else(|| ConsoleError::ScenarioError {
                reason: format!("step {} references undeclared module {id}", step + 1),
            })
        };

        let mut notifications = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let notification = match step {
                Step::Discover {
                    module,
                } => {
                    let (info, spec) = lookup(*module, index)?;
                    Notification::Discover(info.id, build_container(info, spec))
                }
                Step::Lose {
                    module,
                } => Notification::Lose(lookup(*module, index)?.0.id),
                Step::Event {
                    module,
                    kind,
                    timestamp,
                    dependencies,
                    cause,
                } => {
                    let (info, _) = lookup(*module, index)?;
                    let mut event =
                        LifecycleEvent::at_millis(kind.resolve()?, info.clone(), *timestamp);
                    if let Some(dependencies) = dependencies {
                        event = event.with_dependencies(dependencies.iter().map(String::as_str));
                    }
                    if let Some(cause) =
                        cause.as_ref().and_then(|c| EventCause::from_chain(c.iter().map(String::as_str)))
                    {
                        event = event.with_cause(cause);
                    }
                    Notification::Event(event)
                }
            };
            notifications.push(notification);
        }
        Ok(notifications)
    }
}

fn build_container(info: &ModuleInfo, spec: &ModuleSpec) -> Arc<dyn Container> {
    let name = format!("{} container", info.symbolic_name);
    if !spec.capable {
        return Arc::new(StaticContainer::opaque(name));
    }

    let recipes = spec.recipes.iter().map(|recipe| match recipe.satisfied {
        Some(satisfied) => {
            StaticRecipe::satisfiable(recipe.name.as_str(), satisfied, recipe.selector.clone())
        }
        None => StaticRecipe::plain(recipe.name.as_str()),
    });
    Arc::new(StaticContainer::new(name, recipes))
}
