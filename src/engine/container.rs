//! Read-only capability traits over the engine's containers and recipes.
//!
//! The console never drives the engine. It only asks a container for its
//! recipe repository and asks each recipe for its name and, when the recipe
//! supports it, its satisfaction state. Everything is `Send + Sync` because
//! notifications and page renders arrive on different threads.

use std::fmt;
use std::sync::Arc;

/// A named node of the dependency graph inside a container.
pub trait Recipe: Send + Sync {
    /// Recipe name, unique within its container.
    fn name(&self) -> &str;

    /// The satisfiability capability, for recipe kinds that have one.
    fn as_satisfiable(&self) -> Option<&dyn Satisfiable> {
        None
    }
}

/// Capability of recipes that depend on an external resource being available.
pub trait Satisfiable {
    /// Whether the external resource is currently available.
    fn is_satisfied(&self) -> bool;

    /// Filter expression used to locate the external resource.
    fn selector(&self) -> Option<String>;
}

/// The engine's store of every recipe in a container.
pub trait RecipeRepository: Send + Sync {
    /// All recipes currently known to the repository.
    fn all_recipes(&self) -> Vec<Arc<dyn Recipe>>;
}

/// A per-module dependency-injection container.
pub trait Container: Send + Sync {
    /// The internal recipe repository.
    ///
    /// Containers of a kind that does not expose one return `None`; building a
    /// snapshot from such a container is a precondition violation.
    fn repository(&self) -> Option<&dyn RecipeRepository>;

    /// Short description used in error messages and logs.
    fn describe(&self) -> String;
}

impl fmt::Debug for dyn Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Container({})", self.describe())
    }
}

/// Satisfaction state of a [`StaticRecipe`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct StaticSatisfaction {
    satisfied: bool,
    selector: Option<String>,
}

/// A fixed recipe, used by scenario replay and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRecipe {
    name: String,
    satisfaction: Option<StaticSatisfaction>,
}

impl StaticRecipe {
    /// A recipe without satisfiability capability.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            satisfaction: None,
        }
    }

    /// A satisfiable recipe.
    pub fn satisfiable(name: impl Into<String>, satisfied: bool, selector: Option<String>) -> Self {
        Self {
            name: name.into(),
            satisfaction: Some(StaticSatisfaction {
                satisfied,
                selector,
            }),
        }
    }
}

impl Recipe for StaticRecipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_satisfiable(&self) -> Option<&dyn Satisfiable> {
        self.satisfaction.as_ref().map(|s| s as &dyn Satisfiable)
    }
}

impl Satisfiable for StaticSatisfaction {
    fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    fn selector(&self) -> Option<String> {
        self.selector.clone()
    }
}

/// Recipe repository backed by a vector.
#[derive(Default)]
pub struct StaticRepository {
    recipes: Vec<Arc<dyn Recipe>>,
}

impl StaticRepository {
    /// Create a repository from recipes.
    pub fn new(recipes: Vec<Arc<dyn Recipe>>) -> Self {
        Self {
            recipes,
        }
    }
}

impl RecipeRepository for StaticRepository {
    fn all_recipes(&self) -> Vec<Arc<dyn Recipe>> {
        self.recipes.clone()
    }
}

/// A container with a fixed recipe set, used by scenario replay and tests.
pub struct StaticContainer {
    name: String,
    repository: Option<StaticRepository>,
}

impl StaticContainer {
    /// A container exposing a repository holding `recipes`.
    pub fn new<I, R>(name: impl Into<String>, recipes: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Recipe + 'static,
    {
        let recipes = recipes.into_iter().map(|r| Arc::new(r) as Arc<dyn Recipe>).collect();
        Self {
            name: name.into(),
            repository: Some(StaticRepository::new(recipes)),
        }
    }

    /// A container without the repository capability.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repository: None,
        }
    }
}

impl Container for StaticContainer {
    fn repository(&self) -> Option<&dyn RecipeRepository> {
        self.repository.as_ref().map(|r| r as &dyn RecipeRepository)
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
