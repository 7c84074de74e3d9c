//! Model of the external dependency-injection engine and hosting platform.
//!
//! Nothing in here belongs to the console itself: these are the shapes of the
//! data the console observes. Events arrive as [`LifecycleEvent`] values and
//! containers are reached through the [`Container`] capability trait.
//!
//! The `Static*` types are plain in-memory implementations of the traits.
//! They back scenario replay and the test suite.

pub mod container;
pub mod event;
pub mod module;

pub use container::{
    Container, Recipe, RecipeRepository, Satisfiable, StaticContainer, StaticRecipe,
    StaticRepository,
};
pub use event::{EventCause, EventKind, LifecycleEvent};
pub use module::{ModuleId, ModuleInfo};
