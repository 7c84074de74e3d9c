//! Immutable snapshots of containers and their recipes.
//!
//! A [`ContainerSnapshot`] is built fresh for every lifecycle event except a
//! destroy. It copies everything the page needs out of the engine so that
//! rendering never touches a live container.
//!
//! Two explicit comparison functions define display order:
//! - [`compare_recipes`]: plain recipes, then satisfied, then unsatisfied; by name
//! - [`compare_containers`]: event timestamp, module symbolic name, module version

pub mod container;
pub mod recipe;

pub use container::{ContainerSnapshot, compare_containers};
pub use recipe::{RecipeSnapshot, RecipeState, compare_recipes};
