//! Core types shared by every layer of the server.
//!
//! - [`error`] - The [`CatalogError`] taxonomy and CLI-facing [`ErrorContext`]
//! - [`context`] - [`RequestContext`] cancellation and deadline propagation

pub mod context;
pub mod error;

pub use context::{CancelHandle, RequestContext};
pub use error::{CatalogError, ErrorClass, ErrorContext, user_friendly_error};
