//! Test fixtures for scenario and configuration files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Sample scenario file
#[derive(Clone, Debug)]
pub struct ScenarioFixture {
    pub content: String,
    pub name: String,
}

impl ScenarioFixture {
    /// Two modules: a created one with satisfied references and one in its
    /// grace period waiting for `dep.Foo`.
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
[[modules]]
id = 10
symbolic_name = "com.example.orders"
version = "1.2.0"

[[modules.recipes]]
name = "orderService"

[[modules.recipes]]
name = "dataSource"
satisfied = true
selector = "(objectClass=javax.sql.DataSource)"

[[modules]]
id = 11
symbolic_name = "com.example.billing"
version = "0.9.0"

[[modules.recipes]]
name = "foo"
satisfied = false
selector = "(objectClass=dep.Foo)"

[[modules.recipes]]
name = "billingService"

[[steps]]
action = "discover"
module = 10

[[steps]]
action = "event"
module = 10
kind = "creating"
timestamp = 1700000000000

[[steps]]
action = "event"
module = 10
kind = "created"
timestamp = 1700000001000

[[steps]]
action = "discover"
module = 11

[[steps]]
action = "event"
module = 11
kind = "grace-period"
timestamp = 1700000002000
dependencies = ["dep.Foo"]
"#
            .trim()
            .to_string(),
        }
    }

    /// One module that failed with a two-level cause.
    pub fn failure() -> Self {
        Self {
            name: "failure".to_string(),
            content: r#"
[[modules]]
id = 3
symbolic_name = "com.example.broken"
version = "2.0.0"

[[steps]]
action = "discover"
module = 3

[[steps]]
action = "event"
module = 3
kind = "failure"
timestamp = 1700000000000
cause = ["Unable to start blueprint container", "Unresolved reference <dataSource>"]
"#
            .trim()
            .to_string(),
        }
    }

    /// A module that is created and then destroyed.
    pub fn destroyed() -> Self {
        Self {
            name: "destroyed".to_string(),
            content: r#"
[[modules]]
id = 1
symbolic_name = "com.example.gone"
version = "1.0.0"

[[steps]]
action = "discover"
module = 1

[[steps]]
action = "event"
module = 1
kind = "created"
timestamp = 1

[[steps]]
action = "event"
module = 1
kind = "destroyed"
timestamp = 2
"#
            .trim()
            .to_string(),
        }
    }

    /// An event with an event type code outside the recognised range.
    pub fn unknown_event_kind() -> Self {
        Self {
            name: "unknown_kind".to_string(),
            content: r#"
[[modules]]
id = 1
symbolic_name = "com.example.odd"
version = "1.0.0"

[[steps]]
action = "event"
module = 1
kind = 99
timestamp = 1
"#
            .trim()
            .to_string(),
        }
    }

    /// A step referencing a module that is never declared.
    pub fn undeclared_module() -> Self {
        Self {
            name: "undeclared".to_string(),
            content: r#"
[[steps]]
action = "discover"
module = 42
"#
            .trim()
            .to_string(),
        }
    }

    /// Not valid TOML.
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid".to_string(),
            content: "[[modules]\nid = ".to_string(),
        }
    }

    /// Write the scenario to `<dir>/<name>.toml`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.toml", self.name));
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write scenario {}", path.display()))?;
        Ok(path)
    }
}

/// Sample `config.toml`
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
}

impl ConfigFixture {
    pub fn labelled(label: &str, title: &str) -> Self {
        Self {
            content: format!("label = \"{label}\"\ntitle = \"{title}\"\n"),
        }
    }

    /// Config pointing at a template file.
    pub fn with_template(template: &Path) -> Self {
        Self {
            content: format!("template = '{}'\n", template.display()),
        }
    }

    pub fn unknown_key() -> Self {
        Self {
            content: "colour = \"blue\"\n".to_string(),
        }
    }

    /// Write to `<dir>/config.toml`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("config.toml");
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(path)
    }
}
