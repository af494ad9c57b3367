//! Concurrent dependency resolution.
//!
//! Given the outgoing dependency edges of a root project, the
//! [`DependencyResolver`] looks up every edge's providing project concurrently
//! and returns one [`ResolvedDependency`] per edge.
//!
//! # Guarantees
//!
//! - **Count**: N edges in, N results out, including N = 0 (no lookups issued).
//! - **Order**: result `i` belongs to edge `i`, whatever order the lookups
//!   complete in.
//! - **Isolation**: a failing lookup only affects its own result; the call
//!   itself never fails.
//! - **Cancellation**: the [`RequestContext`] governs every lookup. Once it is
//!   canceled or past its deadline, each unfinished lookup records its own
//!   cancellation failure and finished lookups keep their results.
//!
//! # Algorithm
//!
//! Lookups are driven as a `buffer_unordered` stream whose items carry the edge
//! index. Each completed item is written into slot `index` of a preallocated
//! vector, and the vector is returned once the stream is drained. The optional
//! concurrency cap only bounds how many lookups are in flight; it has no effect
//! on the slot each result lands in.
//!
//! # Example
//!
//! ```rust,no_run
//! use project_catalog_mcp::catalog::CerebroClient;
//! use project_catalog_mcp::core::RequestContext;
//! use project_catalog_mcp::models::ProjectDependency;
//! use project_catalog_mcp::resolver::{DependencyResolver, filter_dependencies};
//!
//! # async fn example(client: CerebroClient, edges: Vec<ProjectDependency>) {
//! let ctx = RequestContext::background();
//! let relevant = filter_dependencies(&edges, 1);
//! let resolved = DependencyResolver::new(&client).resolve(&ctx, 1, &relevant).await;
//! assert_eq!(resolved.len(), relevant.len());
//! # }
//! ```

use std::num::NonZeroUsize;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::catalog::ProjectCatalog;
use crate::core::{CatalogError, RequestContext};
use crate::models::{Project, ProjectDependency, ProjectId};


/// Outcome of resolving one edge's providing project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The catalog returned the providing project
    Found(Project),
    /// The catalog has no project with the providing id (dangling reference)
    NotFound,
    /// The lookup failed; see the error's [`class`](CatalogError::class)
    Failed(CatalogError),
}

/// One dependency edge paired with the outcome of resolving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    pub dependency: ProjectDependency,
    pub resolution: Resolution,
}

impl ResolvedDependency {
    /// The providing project, if it was found.
    #[must_use]
    pub const fn project(&self) -> Option<&Project> {
        match &self.resolution {
            Resolution::Found(project) => Some(project),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.resolution, Resolution::NotFound)
    }

    /// The failure, if the lookup failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&CatalogError> {
        match &self.resolution {
            Resolution::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Select the edges whose dependent is `project_id`, preserving catalog order.
#[must_use]
pub fn filter_dependencies(
    dependencies: &[ProjectDependency],
    project_id: ProjectId,
) -> Vec<ProjectDependency> {
    dependencies.iter().filter(|dep| dep.dependent_project_id == project_id).cloned().collect()
}

/// Resolves dependency edges against a [`ProjectCatalog`].
#[derive(Debug)]
pub struct DependencyResolver<'a, C> {
    catalog: &'a C,
    max_concurrency: Option<NonZeroUsize>,
}

impl<'a, C: ProjectCatalog> DependencyResolver<'a, C> {
    /// A resolver with unbounded fan-out: one in-flight lookup per edge.
    pub const fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            max_concurrency: None,
        }
    }

    /// Cap the number of in-flight lookups. `None` restores unbounded fan-out.
    #[must_use]
    pub const fn with_max_concurrency(mut self, max_concurrency: Option<NonZeroUsize>) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Resolve every edge's providing project.
    ///
    /// `edges` should already be filtered to those whose dependent is
    /// `root_id` (see [`filter_dependencies`]); `root_id` is only used for
    /// logging. The result has the same length and order as `edges`.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        root_id: ProjectId,
        edges: &[ProjectDependency],
    ) -> Vec<ResolvedDependency> {
        if edges.is_empty() {
            return Vec::new();
        }

        let limit = self.max_concurrency.map_or(edges.len(), |cap| cap.get().min(edges.len()));
        debug!(
            "Resolving {} dependencies of project {} ({} in flight at most)",
            edges.len(),
            root_id,
            limit
        );

        let mut slots: Vec<Option<ResolvedDependency>> = Vec::with_capacity(edges.len());
        slots.resize_with(edges.len(), || None);

        let mut lookups = stream::iter(edges.iter().cloned().enumerate())
            .map(|(index, edge)| async move { (index, self.resolve_edge(ctx, edge).await) })
            .buffer_unordered(limit);

        while let Some((index, resolved)) = lookups.next().await {
            slots[index] = Some(resolved);
        }

        // buffer_unordered yields each lookup exactly once, so every slot is filled.
        slots.into_iter().flatten().collect()
    }

    async fn resolve_edge(&self, ctx: &RequestContext, edge: ProjectDependency) -> ResolvedDependency {
        let providing_id = edge.providing_project_id;
        let resolution = match ctx.run(self.catalog.fetch_by_id(ctx, providing_id)).await {
            Ok(Some(project)) => {
                debug!("Dependency {} resolved to project {} ({})", edge.id, project.id, project.name);
                Resolution::Found(project)
            }
            Ok(None) => {
                debug!("Dependency {} references missing project {}", edge.id, providing_id);
                Resolution::NotFound
            }
            Err(err) => {
                warn!("Failed to fetch project {} for dependency {}: {}", providing_id, edge.id, err);
                Resolution::Failed(err)
            }
        };

        ResolvedDependency {
            dependency: edge,
            resolution,
        }
    }
}
