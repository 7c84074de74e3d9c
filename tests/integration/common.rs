//! Shared helpers for integration tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use blueprint_console::registry::{ContainerTracker, EventListener, Registry};
use blueprint_console::test_utils::{ConfigFixture, ScenarioFixture};

/// Registry plus both handlers bound to it.
pub struct Harness {
    pub registry: Arc<Registry>,
    pub tracker: ContainerTracker,
    pub listener: EventListener,
}

impl Harness {
    pub fn new() -> Self {
        blueprint_console::test_utils::init_test_logging(None);
        let registry = Arc::new(Registry::new());
        Self {
            tracker: ContainerTracker::new(Arc::clone(&registry)),
            listener: EventListener::new(Arc::clone(&registry)),
            registry,
        }
    }
}

/// Temporary directory holding scenario and config files.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn scenario(&self, fixture: ScenarioFixture) -> PathBuf {
        fixture.write_to(self.path()).unwrap()
    }

    pub fn config(&self, fixture: ConfigFixture) -> PathBuf {
        fixture.write_to(self.path()).unwrap()
    }

    /// `bpconsole` pointed at a config path inside the temp dir, colors off.
    pub fn bpconsole(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_bpconsole"));
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env("BPCONSOLE_CONFIG", self.path().join("config.toml"));
        cmd
    }
}
