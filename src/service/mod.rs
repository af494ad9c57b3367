//! Project operations behind the MCP tools.
//!
//! [`ProjectService`] combines one permalink lookup with, for dependencies, the
//! concurrent [`DependencyResolver`], and renders the outcome through
//! [`crate::report`].

use std::num::NonZeroUsize;

use tracing::{debug, info};

use crate::catalog::{Include, ProjectCatalog};
use crate::core::{CatalogError, RequestContext};
use crate::models::{Project, Repository};
use crate::report;
use crate::resolver::{DependencyResolver, ResolvedDependency, filter_dependencies};
use crate::validation::ProjectPermalink;

/// A project with the repositories deployed under its permalink.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub project: Project,
    /// Repositories whose `kube_project` equals the requested permalink
    pub repositories: Vec<Repository>,
    /// Markdown report
    pub text: String,
}

/// A project with its resolved outgoing dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDependencies {
    pub project: Project,
    /// One entry per edge whose dependent is `project`, in catalog order
    pub resolved: Vec<ResolvedDependency>,
    /// Markdown report
    pub text: String,
}

/// Catalog operations exposed as tools.
#[derive(Debug, Clone)]
pub struct ProjectService<C> {
    catalog: C,
    max_concurrency: Option<NonZeroUsize>,
}

impl<C: ProjectCatalog> ProjectService<C> {
    pub const fn new(catalog: C) -> Self {
        Self {
            catalog,
            max_concurrency: None,
        }
    }

    /// Cap concurrent dependency lookups per request.
    #[must_use]
    pub const fn with_max_concurrency(mut self, max_concurrency: Option<NonZeroUsize>) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Look up a project and the repositories linked to it.
    ///
    /// # Errors
    ///
    /// [`CatalogError::ProjectNotFound`] when no project has `permalink`, or the
    /// lookup's own failure.
    pub async fn project_details(
        &self,
        ctx: &RequestContext,
        permalink: &ProjectPermalink,
    ) -> Result<ProjectDetails, CatalogError> {
        info!("Fetching details for project {}", permalink);
        let lookup = ctx
            .run(self.catalog.fetch_by_permalink(ctx, permalink, Include::Repositories))
            .await?;
        let project = lookup.project.ok_or_else(|| CatalogError::ProjectNotFound {
            permalink: permalink.to_string(),
        })?;

        let repositories: Vec<Repository> = lookup
            .repositories
            .into_iter()
            .filter(|repo| repo.kube_project.as_deref() == Some(permalink.as_str()))
            .collect();
        debug!("{} repositories linked to {}", repositories.len(), permalink);

        let text = report::format_project_details(&project, permalink.as_str(), &repositories);
        Ok(ProjectDetails {
            project,
            repositories,
            text,
        })
    }

    /// Look up a project and resolve each of its outgoing dependencies.
    ///
    /// Individual dependency failures are part of the result, not errors.
    ///
    /// # Errors
    ///
    /// [`CatalogError::ProjectNotFound`] when no project has `permalink`, or the
    /// root lookup's own failure.
    pub async fn project_dependencies(
        &self,
        ctx: &RequestContext,
        permalink: &ProjectPermalink,
    ) -> Result<ProjectDependencies, CatalogError> {
        info!("Fetching dependencies for project {}", permalink);
        let lookup = ctx
            .run(self.catalog.fetch_by_permalink(ctx, permalink, Include::Dependencies))
            .await?;
        let project = lookup.project.ok_or_else(|| CatalogError::ProjectNotFound {
            permalink: permalink.to_string(),
        })?;

        if lookup.dependencies.is_empty() {
            let text = report::format_no_dependencies(&project);
            return Ok(ProjectDependencies {
                project,
                resolved: Vec::new(),
                text,
            });
        }

        let edges = filter_dependencies(&lookup.dependencies, project.id);
        let resolved = DependencyResolver::new(&self.catalog)
            .with_max_concurrency(self.max_concurrency)
            .resolve(ctx, project.id, &edges)
            .await;

        let text = report::format_dependencies(&project, &resolved);
        Ok(ProjectDependencies {
            project,
            resolved,
            text,
        })
    }
}
