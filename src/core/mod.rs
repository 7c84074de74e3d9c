//! Core types and error handling for the blueprint console.
//!
//! The core module only carries the error taxonomy shared by every other
//! module. Domain types live next to the code that owns them: the engine
//! model in [`crate::engine`], snapshots in [`crate::snapshot`] and the
//! event cache in [`crate::registry`].

pub mod error;

pub use error::{ConsoleError, ErrorContext, user_friendly_error};
