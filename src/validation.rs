//! Boundary validation for tool and CLI input.
//!
//! Input is validated exactly once, where it enters the process. Downstream code
//! accepts only the validated types defined here, so the service and resolver
//! never re-check identifiers.

use std::fmt;

use serde_json::Value;

use crate::constants::{PERMALINK_ARGUMENT, TOOL_PROJECT_DEPENDENCIES, TOOL_PROJECT_DETAILS};
use crate::core::CatalogError;

/// A project permalink that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectPermalink(String);

impl ProjectPermalink {
    /// Validate a permalink.
    ///
    /// Blank values (empty or whitespace only) are rejected. Accepted values are
    /// kept exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for blank input.
    pub fn parse(value: impl Into<String>) -> Result<Self, CatalogError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CatalogError::validation(PERMALINK_ARGUMENT, "cannot be empty"));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectPermalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectPermalink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A typed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    /// `project_get_details`
    ProjectDetails(ProjectPermalink),
    /// `project_get_dependencies`
    ProjectDependencies(ProjectPermalink),
}

impl ToolRequest {
    /// Parse a tool name and its JSON arguments.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::ToolNotFound`] for unknown tool names
    /// - [`CatalogError::Validation`] when `project_permalink` is missing, not a
    ///   string, or blank
    pub fn parse(name: &str, arguments: &Value) -> Result<Self, CatalogError> {
        let build: fn(ProjectPermalink) -> Self = match name {
            TOOL_PROJECT_DETAILS => Self::ProjectDetails,
            TOOL_PROJECT_DEPENDENCIES => Self::ProjectDependencies,
            other => {
                return Err(CatalogError::ToolNotFound {
                    name: other.to_string(),
                });
            }
        };

        let permalink = arguments
            .get(PERMALINK_ARGUMENT)
            .and_then(Value::as_str)
            .ok_or_else(|| CatalogError::validation(PERMALINK_ARGUMENT, "must be a string"))?;

        Ok(build(ProjectPermalink::parse(permalink)?))
    }

    /// Tool name of this request.
    #[must_use]
    pub const fn tool_name(&self) -> &'static str {
        match self {
            Self::ProjectDetails(_) => TOOL_PROJECT_DETAILS,
            Self::ProjectDependencies(_) => TOOL_PROJECT_DEPENDENCIES,
        }
    }

    #[must_use]
    pub const fn permalink(&self) -> &ProjectPermalink {
        match self {
            Self::ProjectDetails(permalink) | Self::ProjectDependencies(permalink) => permalink,
        }
    }
}
