//! HTML rendering of the container page.
//!
//! Snapshots are flattened into [`view_models`] and fed to a Tera template by
//! [`PageRenderer`]. Rendering never touches live containers.

pub mod renderer;
pub mod view_models;

pub use renderer::PageRenderer;
pub use view_models::{ContainerView, PageView, RecipeView};
