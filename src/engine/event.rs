//! Lifecycle events emitted by the dependency-injection engine.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::sync::Arc;

use super::module::ModuleInfo;
use crate::constants::{
    EVENT_CREATED, EVENT_CREATING, EVENT_DESTROYED, EVENT_DESTROYING, EVENT_FAILURE,
    EVENT_GRACE_PERIOD, EVENT_WAITING,
};
use crate::core::ConsoleError;

/// Type of a lifecycle event.
///
/// Codes outside the recognised range are kept as [`EventKind::Unknown`] so
/// that the event can still be cached. They only fail once a label is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Creating,
    Created,
    Destroying,
    Destroyed,
    Failure,
    GracePeriod,
    Waiting,
    Unknown(i32),
}

impl EventKind {
    /// Map a raw event type code to a kind. Never fails.
    pub const fn from_code(code: i32) -> Self {
        match code {
            EVENT_CREATING => Self::Creating,
            EVENT_CREATED => Self::Created,
            EVENT_DESTROYING => Self::Destroying,
            EVENT_DESTROYED => Self::Destroyed,
            EVENT_FAILURE => Self::Failure,
            EVENT_GRACE_PERIOD => Self::GracePeriod,
            EVENT_WAITING => Self::Waiting,
            other => Self::Unknown(other),
        }
    }

    /// The raw event type code.
    pub const fn code(&self) -> i32 {
        match self {
            Self::Creating => EVENT_CREATING,
            Self::Created => EVENT_CREATED,
            Self::Destroying => EVENT_DESTROYING,
            Self::Destroyed => EVENT_DESTROYED,
            Self::Failure => EVENT_FAILURE,
            Self::GracePeriod => EVENT_GRACE_PERIOD,
            Self::Waiting => EVENT_WAITING,
            Self::Unknown(code) => *code,
        }
    }

    /// Human-readable label of the event type.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UnknownEventKind`] for codes without a label.
    pub fn label(&self) -> Result<&'static str, ConsoleError> {
        match self {
            Self::Created => Ok("Created"),
            Self::Creating => Ok("Creating"),
            Self::Destroyed => Ok("Destroyed"),
            Self::Destroying => Ok("Destroying"),
            Self::Failure => Ok("Failure"),
            Self::GracePeriod => Ok("Grace period"),
            Self::Waiting => Ok("Waiting"),
            Self::Unknown(code) => Err(ConsoleError::UnknownEventKind {
                code: *code,
            }),
        }
    }

    /// Parse a kebab-case name such as `grace-period`. Integer codes are accepted too.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "creating" => Some(Self::Creating),
            "created" => Some(Self::Created),
            "destroying" => Some(Self::Destroying),
            "destroyed" => Some(Self::Destroyed),
            "failure" => Some(Self::Failure),
            "grace-period" | "grace_period" | "graceperiod" => Some(Self::GracePeriod),
            "waiting" => Some(Self::Waiting),
            other => other.parse::<i32>().ok().map(Self::from_code),
        }
    }
}

/// Error that arrived with a failure event.
///
/// Cheap to clone; snapshots and views share the same underlying error.
#[derive(Clone)]
pub struct EventCause(Arc<anyhow::Error>);

impl EventCause {
    /// Wrap an error.
    pub fn new(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }

    /// Build a nested error from messages ordered outermost first.
    ///
    /// Returns `None` for an empty chain.
    pub fn from_chain<I, S>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        let mut iter = messages.into_iter().rev();
        let mut error = anyhow::Error::msg(iter.next()?);
        for outer in iter {
            error = error.context(outer);
        }
        Some(Self::new(error))
    }

    /// The wrapped error.
    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }

    /// The error followed by every `source()` in its chain, one per line.
    pub fn stack_trace(&self) -> String {
        let mut trace = String::new();
        for (i, cause) in self.0.chain().enumerate() {
            if i > 0 {
                trace.push_str("\nCaused by: ");
            }
            trace.push_str(&cause.to_string());
        }
        trace
    }
}

impl fmt::Debug for EventCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventCause").field(&self.0.to_string()).finish()
    }
}

impl fmt::Display for EventCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A state transition of one module's container.
#[derive(Debug, Clone)]
pub struct LifecycleEvent {
    /// Event type
    pub kind: EventKind,
    /// Instant the event was recorded
    pub timestamp: DateTime<Utc>,
    /// Owning module
    pub module: ModuleInfo,
    /// Failure cause, only set for [`EventKind::Failure`]
    pub cause: Option<EventCause>,
    /// Names of unmet dependencies, set while waiting
    pub dependencies: Option<Vec<String>>,
}

impl LifecycleEvent {
    /// Create an event without cause or dependencies.
    pub fn new(kind: EventKind, module: ModuleInfo, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            timestamp,
            module,
            cause: None,
            dependencies: None,
        }
    }

    /// Create an event stamped with epoch milliseconds.
    ///
    /// Out-of-range values fall back to the epoch.
    pub fn at_millis(kind: EventKind, module: ModuleInfo, millis: i64) -> Self {
        let timestamp = Utc.timestamp_millis_opt(millis).single().unwrap_or_default();
        Self::new(kind, module, timestamp)
    }

    /// Attach a failure cause.
    pub fn with_cause(mut self, cause: EventCause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Attach the list of missing dependencies.
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = Some(dependencies.into_iter().map(Into::into).collect());
        self
    }

    /// Event timestamp as epoch milliseconds.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
