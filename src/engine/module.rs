//! Module identity as supplied by the hosting platform.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a hosted module.
///
/// The identifier never changes while the module is installed, which makes it
/// the key of both registry maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u64);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ModuleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// The owning module of a container, as reported alongside each lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleInfo {
    /// Stable module identifier
    pub id: ModuleId,
    /// Symbolic name, e.g. `com.example.orders`
    pub symbolic_name: String,
    /// Module version
    pub version: Version,
}

impl ModuleInfo {
    /// Create module information from its parts.
    pub fn new(id: impl Into<ModuleId>, symbolic_name: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            symbolic_name: symbolic_name.into(),
            version,
        }
    }

    /// Parse the version from a string, e.g. `"1.2.0"`.
    pub fn parse(
        id: impl Into<ModuleId>,
        symbolic_name: impl Into<String>,
        version: &str,
    ) -> Result<Self, semver::Error> {
        Ok(Self::new(id, symbolic_name, Version::parse(version)?))
    }
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.symbolic_name, self.version, self.id)
    }
}
