//! Immutable view of one recipe.

use std::cmp::Ordering;

use crate::engine::Recipe;

/// What the console knows about a recipe's dependency on an external resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecipeState {
    /// The recipe kind cannot report satisfaction.
    Plain,
    /// The recipe reported whether its external resource is available.
    Satisfiable {
        satisfied: bool,
        selector: Option<String>,
    },
}

impl RecipeState {
    /// Display rank: plain recipes first, then satisfied, then unsatisfied.
    const fn rank(&self) -> u8 {
        match self {
            Self::Plain => 0,
            Self::Satisfiable {
                satisfied: true,
                ..
            } => 1,
            Self::Satisfiable {
                satisfied: false,
                ..
            } => 2,
        }
    }
}

/// Read-only view of one dependency-graph node, taken once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeSnapshot {
    name: String,
    state: RecipeState,
}

impl RecipeSnapshot {
    /// Extract the name and, if the recipe is satisfiable, its state and selector.
    pub fn from_recipe(recipe: &dyn Recipe) -> Self {
        let state = match recipe.as_satisfiable() {
            Some(satisfiable) => RecipeState::Satisfiable {
                satisfied: satisfiable.is_satisfied(),
                selector: satisfiable.selector(),
            },
            None => RecipeState::Plain,
        };

        Self {
            name: recipe.name().to_string(),
            state,
        }
    }

    /// Build a snapshot directly from its parts.
    pub fn new(name: impl Into<String>, state: RecipeState) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &RecipeState {
        &self.state
    }

    /// `None` for recipes that cannot report satisfaction.
    pub fn satisfied(&self) -> Option<bool> {
        match &self.state {
            RecipeState::Plain => None,
            RecipeState::Satisfiable {
                satisfied,
                ..
            } => Some(*satisfied),
        }
    }

    /// Selector expression; only ever present alongside [`satisfied`](Self::satisfied).
    pub fn selector(&self) -> Option<&str> {
        match &self.state {
            RecipeState::Plain => None,
            RecipeState::Satisfiable {
                selector,
                ..
            } => selector.as_deref(),
        }
    }

    /// True for satisfiable recipes whose resource is missing.
    pub fn is_unsatisfied(&self) -> bool {
        self.satisfied() == Some(false)
    }
}

/// Display order of recipes.
///
/// Recipes without a satisfaction state come first, satisfied ones next and
/// unsatisfied ones last. Ties are broken by name. The selector only breaks
/// ties between otherwise identical entries so the order agrees with `Eq`.
pub fn compare_recipes(a: &RecipeSnapshot, b: &RecipeSnapshot) -> Ordering {
    a.state
        .rank()
        .cmp(&b.state.rank())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.selector().cmp(&b.selector()))
}

impl Ord for RecipeSnapshot {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_recipes(self, other)
    }
}

impl PartialOrd for RecipeSnapshot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
