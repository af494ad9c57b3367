//! Access to the remote project catalog.
//!
//! The [`ProjectCatalog`] trait is the seam between the service/resolver and the
//! transport. [`CerebroClient`] is the production implementation over HTTP; tests
//! substitute the in-memory mock from `test_utils`.
//!
//! # Queries
//!
//! The catalog supports two kinds of lookup:
//!
//! - **by id**: `search[id]=<id>`, no inlines, used once per dependency edge;
//! - **by permalink**: `search[permalink]=<permalink>` with the standard inlines
//!   and an optional include that attaches edges or repositories.
//!
//! Both return zero or one project; "zero" is a valid answer, not an error.

mod http;
mod query;

pub use http::CerebroClient;
pub use query::{CatalogQuery, Include, SearchKey};

use std::future::Future;
use std::sync::Arc;

use crate::core::{CatalogError, RequestContext};
use crate::models::{Project, ProjectDependency, ProjectId, Repository};
use crate::validation::ProjectPermalink;

/// Result of a permalink lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogLookup {
    /// First matching project, if any
    pub project: Option<Project>,
    /// Dependency edges attached by [`Include::Dependencies`], in catalog order
    pub dependencies: Vec<ProjectDependency>,
    /// Repositories attached by [`Include::Repositories`]
    pub repositories: Vec<Repository>,
}

/// Read-only access to catalog projects.
///
/// Implementations must be safe for concurrent use: the resolver issues many
/// `fetch_by_id` calls at once against the same instance.
pub trait ProjectCatalog: Send + Sync {
    /// Look up one project by catalog id. `Ok(None)` means no match.
    fn fetch_by_id(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
    ) -> impl Future<Output = Result<Option<Project>, CatalogError>> + Send;

    /// Look up one project by permalink, with optional attached records.
    fn fetch_by_permalink(
        &self,
        ctx: &RequestContext,
        permalink: &ProjectPermalink,
        include: Include,
    ) -> impl Future<Output = Result<CatalogLookup, CatalogError>> + Send;
}

impl<C: ProjectCatalog> ProjectCatalog for Arc<C> {
    fn fetch_by_id(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
    ) -> impl Future<Output = Result<Option<Project>, CatalogError>> + Send {
        (**self).fetch_by_id(ctx, id)
    }

    fn fetch_by_permalink(
        &self,
        ctx: &RequestContext,
        permalink: &ProjectPermalink,
        include: Include,
    ) -> impl Future<Output = Result<CatalogLookup, CatalogError>> + Send {
        (**self).fetch_by_permalink(ctx, permalink, include)
    }
}
