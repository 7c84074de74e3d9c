//! Error handling for the blueprint console
//!
//! This module provides the error taxonomy of the console together with a
//! user-friendly presentation layer for the `bpconsole` binary. The error
//! system follows two principles:
//! 1. **Strongly-typed errors** for the few genuine failure modes of the core
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`ConsoleError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Precondition failures**: [`ConsoleError::InvalidContainerKind`] is raised when a
//!   collaborator hands over a container without a recipe repository. It is fatal to
//!   that single snapshot construction only; the registry keeps running.
//! - **Unexpected input**: [`ConsoleError::UnknownEventKind`] is raised at formatting
//!   time when an event carries a type code outside the seven recognised kinds.
//! - **Ambient**: template, configuration, scenario and I/O failures.
//!
//! Everything else in the core is a defensive default rather than an error: an absent
//! container reference yields an empty snapshot, and absent optional fields render as
//! empty strings.
//!
//! # Examples
//!
//! ```rust,no_run
//! use blueprint_console::core::{ConsoleError, user_friendly_error};
//!
//! let error = ConsoleError::UnknownEventKind { code: 42 };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for console operations.
///
/// # Error Categories
///
/// ## Core
/// - [`InvalidContainerKind`] - Container lacks the recipe repository capability
/// - [`UnknownEventKind`] - Event type code outside the recognised set
///
/// ## Rendering and Configuration
/// - [`TemplateError`] - Page template failed to compile or render
/// - [`ConfigError`] - Configuration file content is invalid
/// - [`ScenarioError`] - Replay scenario is inconsistent
///
/// ## Conversions
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
/// - [`TomlError`] - TOML parsing errors from [`toml::de::Error`]
/// - [`SemverError`] - Module version parsing from [`semver::Error`]
///
/// [`InvalidContainerKind`]: ConsoleError::InvalidContainerKind
/// [`UnknownEventKind`]: ConsoleError::UnknownEventKind
/// [`TemplateError`]: ConsoleError::TemplateError
/// [`ConfigError`]: ConsoleError::ConfigError
/// [`ScenarioError`]: ConsoleError::ScenarioError
/// [`IoError`]: ConsoleError::IoError
/// [`TomlError`]: ConsoleError::TomlError
/// [`SemverError`]: ConsoleError::SemverError
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Container reference does not expose a recipe repository
    ///
    /// Raised by snapshot construction when the discovery collaborator supplied a
    /// container of an unexpected kind. Only the affected snapshot is lost.
    #[error("Blueprint container does not expose a recipe repository: {container}")]
    InvalidContainerKind {
        /// Description of the offending container
        container: String,
    },

    /// Event type code outside the seven recognised kinds
    #[error("Unknown event type: {code}")]
    UnknownEventKind {
        /// The raw event type code
        code: i32,
    },

    /// Page template failed to compile or render
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Replay scenario is inconsistent
    #[error("Invalid scenario: {reason}")]
    ScenarioError {
        /// Reason the scenario was rejected
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Semver parsing error
    #[error("Semver parsing error: {0}")]
    SemverError(#[from] semver::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for ConsoleError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidContainerKind {
                container,
            } => Self::InvalidContainerKind {
                container: container.clone(),
            },
            Self::UnknownEventKind {
                code,
            } => Self::UnknownEventKind {
                code: *code,
            },
            Self::TemplateError {
                message,
            } => Self::TemplateError {
                message: message.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::ScenarioError {
                reason,
            } => Self::ScenarioError {
                reason: reason.clone(),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::SemverError(e) => Self::Other {
                message: format!("Semver parsing error: {e}"),
            },
        }
    }
}

impl From<tera::Error> for ConsoleError {
    fn from(error: tera::Error) -> Self {
        // Tera nests the interesting part of the message in its source chain
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::TemplateError {
            message,
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`ConsoleError`] with an optional suggestion and details, displayed in
/// color by the CLI.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying console error
    pub error: ConsoleError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`ConsoleError`]
    #[must_use]
    pub const fn new(error: ConsoleError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`ConsoleError`] variants get tailored suggestions. I/O and TOML errors
/// are recognised by downcasting. Anything else is reported with its full cause
/// chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(console_error) = error.downcast_ref::<ConsoleError>() {
        return with_context_chain(create_error_context(console_error.clone()), &error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ConsoleError::Other {
                    message: error_chain_message(&error),
                })
                .with_suggestion("Check file ownership and permissions")
                .with_details("bpconsole could not read or write one of the files involved");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ConsoleError::Other {
                    message: error_chain_message(&error),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        let ctx = ErrorContext::new(ConsoleError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and key names")
        .with_details("Both the configuration file and scenario files are parsed as TOML");
        return with_context_chain(ctx, &error);
    }

    ErrorContext::new(ConsoleError::Other {
        message: error_chain_message(&error),
    })
}

/// Prepend the `.context(..)` layers of `error` to the details of `ctx`.
///
/// Errors without added context are returned unchanged.
fn with_context_chain(mut ctx: ErrorContext, error: &anyhow::Error) -> ErrorContext {
    if error.chain().count() == 1 {
        return ctx;
    }

    let chain = error_chain_message(error);
    ctx.details = Some(match ctx.details.take() {
        Some(details) => format!("{chain}\n{details}"),
        None => chain,
    });
    ctx
}

/// Render an error with its `Caused by:` chain.
fn error_chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Create appropriate [`ErrorContext`] with suggestions for specific console errors
fn create_error_context(error: ConsoleError) -> ErrorContext {
    match &error {
        ConsoleError::InvalidContainerKind {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Only containers backed by a recipe repository can be displayed")
            .with_details(
                "The container was registered by the hosting platform but exposes no recipes",
            ),

        ConsoleError::UnknownEventKind {
            code,
        } => ErrorContext::new(error.clone())
            .with_suggestion(
                "Use one of the recognised event types: creating, created, destroying, destroyed, failure, grace-period, waiting",
            )
            .with_details(format!("Event type code {code} has no display label")),

        ConsoleError::TemplateError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(
                "Check template syntax: variables use {{ var }}, control flow uses {% %}. The page context exposes `title`, `label` and `containers`",
            ),

        ConsoleError::ScenarioError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Every step must reference a module declared in [[modules]]"),

        _ => ErrorContext::new(error),
    }
}
