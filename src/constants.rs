//! Global constants used throughout the blueprint console.
//!
//! Event type codes follow the numbering used by blueprint lifecycle events.

/// Container creation has started.
pub const EVENT_CREATING: i32 = 1;

/// Container was created successfully.
pub const EVENT_CREATED: i32 = 2;

/// Container destruction has started.
pub const EVENT_DESTROYING: i32 = 3;

/// Container was destroyed.
pub const EVENT_DESTROYED: i32 = 4;

/// Container creation failed.
pub const EVENT_FAILURE: i32 = 5;

/// Container is in its grace period, waiting for mandatory references.
pub const EVENT_GRACE_PERIOD: i32 = 6;

/// Container is waiting on a service reference during a call.
pub const EVENT_WAITING: i32 = 7;

/// Default plugin label reported by [`crate::plugin::ConsolePlugin::info`].
///
/// Shortened from the Aries console's `"ariesblueprint"`; set `label` in the
/// config file to restore that name.
pub const DEFAULT_LABEL: &str = "blueprint";

/// Default page title.
pub const DEFAULT_TITLE: &str = "Blueprint Containers";

/// Default chrono format for event timestamps. Timestamps are always UTC.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f UTC";

/// Name under which the page template is registered with Tera.
pub const PAGE_TEMPLATE_NAME: &str = "blueprintcontainers.html";

/// Directory name under the home directory holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = ".bpconsole";
