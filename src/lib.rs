//! Blueprint container console
//!
//! A web console plugin that shows every blueprint container of a modular
//! runtime together with its latest lifecycle state and the satisfaction state
//! of its component recipes.
//!
//! # Architecture Overview
//!
//! The hosting platform pushes two kinds of notifications into the console:
//!
//! - container discovery (a container service appeared or disappeared)
//! - lifecycle events (a container changed state)
//!
//! Both are folded into a [`registry::Registry`] that keeps one immutable
//! [`snapshot::ContainerSnapshot`] per module. Rendering reads the registry,
//! orders the snapshots, flattens them into view models and feeds them to a
//! Tera template.
//!
//! ```text
//! discovery ──► ContainerTracker ─┐
//!                                 ├─► Registry ──► snapshot_all ──► PageRenderer ──► HTML
//! lifecycle ──► EventListener ────┘
//! ```
//!
//! # Modules
//!
//! - [`engine`] - Shapes of the observed engine: events, modules, containers, recipes
//! - [`snapshot`] - Immutable container and recipe snapshots and their ordering
//! - [`registry`] - Concurrent snapshot cache and the notification handlers
//! - [`render`] - View models and the HTML page renderer
//! - [`plugin`] - Activation lifecycle tying registry and renderer together
//! - [`config`] - `config.toml` loading
//! - [`scenario`] - Replay of recorded notification sequences
//! - [`cli`] - The `bpconsole` command line
//! - [`core`] - Error types and user-facing error reporting
//! - [`constants`] - Event codes and defaults

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod engine;
pub mod plugin;
pub mod registry;
pub mod render;
pub mod scenario;
pub mod snapshot;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
