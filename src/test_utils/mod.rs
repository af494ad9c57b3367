//! Test utilities for the project catalog server
//!
//! This module provides the helpers shared by unit tests and the integration
//! suite:
//! - [`MockCatalog`] - in-memory catalog with latencies, failures and call counters
//! - [`fixtures`] - constructors for projects, edges and repositories
//! - [`init_test_logging`] - one-time tracing setup honoring `RUST_LOG`
//!
//! # Example
//!
//! ```rust,no_run
//! use project_catalog_mcp::test_utils::{MockCatalog, fixtures};
//!
//! let catalog = MockCatalog::new()
//!     .with_project(fixtures::project(8, "Billing"))
//!     .with_project(fixtures::project(10, "Search"));
//! assert_eq!(catalog.id_calls(), 0);
//! ```

pub mod fixtures;
mod mock_catalog;

pub use mock_catalog::MockCatalog;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, else `RUST_LOG`
/// when it is set; otherwise logging stays off.
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
            .try_init();
    });
}
