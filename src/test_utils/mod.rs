//! Test utilities for the blueprint console
//!
//! Logging setup, engine model builders and file fixtures shared by unit and
//! integration tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use blueprint_console::test_utils::{ScenarioFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let dir = tempfile::TempDir::new().unwrap();
//! let path = ScenarioFixture::basic().write_to(dir.path()).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::{ConfigFixture, ScenarioFixture};

use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::engine::{
    Container, EventKind, LifecycleEvent, ModuleInfo, StaticContainer, StaticRecipe,
};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, otherwise `RUST_LOG`. Does nothing when neither is
/// set. Only the first call has any effect.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Module info with a valid version.
///
/// # Panics
///
/// Panics if `version` is not valid semver.
pub fn module(id: u64, symbolic_name: &str, version: &str) -> ModuleInfo {
    ModuleInfo::parse(id, symbolic_name, version).expect("test module version must be valid semver")
}

/// Lifecycle event stamped at `millis`.
pub fn event(kind: EventKind, module: ModuleInfo, millis: i64) -> LifecycleEvent {
    LifecycleEvent::at_millis(kind, module, millis)
}

/// Container with one plain, one satisfied and one unsatisfied recipe.
pub fn sample_container(name: &str) -> Arc<dyn Container> {
    Arc::new(StaticContainer::new(
        name,
        [
            StaticRecipe::plain("service"),
            StaticRecipe::satisfiable("present", true, Some("(objectClass=Present)".to_string())),
            StaticRecipe::satisfiable("absent", false, Some("(objectClass=Absent)".to_string())),
        ],
    ))
}
