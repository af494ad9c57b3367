//! Error handling for the project catalog server
//!
//! This module provides the error type shared by every layer of the server and
//! the user-friendly error reporting used by the CLI.
//!
//! # Architecture
//!
//! - [`CatalogError`] - Enumerated error types for all failure cases
//! - [`ErrorClass`] - Coarse classification used when deciding how far an error travels
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Propagation
//!
//! Errors on the root project lookup ([`CatalogError::ProjectNotFound`],
//! [`CatalogError::Validation`], or any upstream/transport failure of that first
//! request) abort the whole operation. Errors on an individual dependency lookup
//! are captured in that dependency's [`ResolvedDependency`] and rendered inline.
//!
//! [`ResolvedDependency`]: crate::resolver::ResolvedDependency
//!
//! # Examples
//!
//! ```rust,no_run
//! use project_catalog_mcp::core::{CatalogError, ErrorContext};
//!
//! let context = ErrorContext::new(CatalogError::ProjectNotFound {
//!     permalink: "billing".to_string(),
//! })
//! .with_suggestion("Check the permalink on the Cerebro project page");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for catalog operations
///
/// Every variant owns plain strings so the error can be cloned into each
/// [`ResolvedDependency`](crate::resolver::ResolvedDependency) it affects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The root project does not exist in the catalog
    #[error("project not found: {permalink}")]
    ProjectNotFound {
        /// Permalink that produced an empty result
        permalink: String,
    },

    /// Input rejected before any network activity
    #[error("validation error for {field}: {message}")]
    Validation {
        /// Name of the offending input field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// The catalog answered with a non-success status
    #[error("API error {status}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the catalog
        body: String,
    },

    /// The catalog answered with a payload that could not be decoded
    #[error("failed to parse JSON response: {reason}")]
    MalformedResponse {
        /// Decoder error message
        reason: String,
    },

    /// Request construction, connection, or body read failed
    #[error("failed to {operation}: {reason}")]
    Transport {
        /// Stage that failed (e.g. "execute request", "read response")
        operation: String,
        /// Underlying error message
        reason: String,
    },

    /// The request context was canceled while the lookup was outstanding
    #[error("request canceled")]
    Cancelled,

    /// The request context deadline elapsed while the lookup was outstanding
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// Configuration is missing or invalid
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// A tool name that the server does not provide
    #[error("Tool not found: {name}")]
    ToolNotFound {
        /// Requested tool name
        name: String,
    },
}

/// Coarse error classes from the catalog error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Root entity missing
    NotFound,
    /// Input rejected at the boundary
    Validation,
    /// Non-success status or malformed payload
    Upstream,
    /// Network, timeout, or cancellation
    Transport,
    /// Local setup problems (configuration, unknown tool)
    Local,
}

impl CatalogError {
    /// Build a [`CatalogError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a [`CatalogError::Config`] error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify a [`reqwest::Error`] raised while talking to the catalog.
    pub fn from_reqwest(operation: &str, error: &reqwest::Error) -> Self {
        let reason = if error.is_timeout() {
            "operation timed out".to_string()
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        Self::Transport {
            operation: operation.to_string(),
            reason,
        }
    }

    /// Which taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::ProjectNotFound {
                ..
            } => ErrorClass::NotFound,
            Self::Validation {
                ..
            } => ErrorClass::Validation,
            Self::Upstream {
                ..
            }
            | Self::MalformedResponse {
                ..
            } => ErrorClass::Upstream,
            Self::Transport {
                ..
            }
            | Self::Cancelled
            | Self::DeadlineExceeded => ErrorClass::Transport,
            Self::Config {
                ..
            }
            | Self::ToolNotFound {
                ..
            } => ErrorClass::Local,
        }
    }

    /// True for cancellation and deadline failures.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Pairs a [`CatalogError`] with an optional suggestion and details that the CLI
/// prints in color.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CatalogError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: CatalogError) -> Self {
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

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`CatalogError`] anywhere in the `anyhow` chain and attaches a
/// suggestion tailored to the failure. Other errors keep their full chain as the
/// message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(catalog_error) = error.chain().find_map(|e| e.downcast_ref::<CatalogError>()) {
        return create_error_context(catalog_error.clone());
    }

    let message = error.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ");
    ErrorContext::new(CatalogError::Transport {
        operation: "complete the operation".to_string(),
        reason: message,
    })
}

fn create_error_context(error: CatalogError) -> ErrorContext {
    match &error {
        CatalogError::ProjectNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the project permalink; it is the last path segment of the project's Cerebro URL")
            .with_details("The catalog returned no project for this permalink"),
        CatalogError::Validation {
            ..
        } => ErrorContext::new(error).with_suggestion("Pass a non-empty project permalink"),
        CatalogError::Upstream {
            status: 401 | 403,
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that CEREBRO_TOKEN holds a valid, unexpired API token")
            .with_details("The catalog rejected the request credentials"),
        CatalogError::Upstream {
            ..
        }
        | CatalogError::MalformedResponse {
            ..
        } => ErrorContext::new(error)
            .with_details("The catalog service answered, but not with a usable project listing"),
        CatalogError::Transport {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check your network connection and the configured catalog base URL"),
        CatalogError::Cancelled | CatalogError::DeadlineExceeded => ErrorContext::new(error)
            .with_suggestion("Increase the request timeout with --timeout or REQUEST_TIMEOUT_SECS"),
        CatalogError::Config {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Set CEREBRO_TOKEN in the environment or `token` in the configuration file",
        ),
        CatalogError::ToolNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Available tools: project_get_details, project_get_dependencies"),
    }
}
