//! In-memory [`ProjectCatalog`] for tests.
//!
//! Lookups can be given per-id latencies and failures, and the mock records how
//! many calls were made, how many were in flight at once, and the order in
//! which id lookups completed.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::catalog::{CatalogLookup, Include, ProjectCatalog};
use crate::core::{CatalogError, RequestContext};
use crate::models::{Project, ProjectDependency, ProjectId, Repository};
use crate::validation::ProjectPermalink;

#[derive(Debug, Clone)]
enum IdBehavior {
    Found(Project),
    Fail(CatalogError),
}

#[derive(Debug, Clone)]
struct PermalinkEntry {
    project: Project,
    dependencies: Vec<ProjectDependency>,
    repositories: Vec<Repository>,
}

/// Configurable in-memory catalog.
#[derive(Debug, Default)]
pub struct MockCatalog {
    by_id: HashMap<ProjectId, IdBehavior>,
    delays: HashMap<ProjectId, Duration>,
    by_permalink: HashMap<String, PermalinkEntry>,
    permalink_failure: Option<CatalogError>,
    id_calls: AtomicUsize,
    permalink_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    completion_order: Mutex<Vec<ProjectId>>,
    last_include: Mutex<Option<Include>>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `project` for id lookups.
    pub fn with_project(mut self, project: Project) -> Self {
        self.by_id.insert(project.id, IdBehavior::Found(project));
        self
    }

    /// Fail id lookups for `id` with `error`.
    pub fn with_failure(mut self, id: ProjectId, error: CatalogError) -> Self {
        self.by_id.insert(id, IdBehavior::Fail(error));
        self
    }

    /// Delay id lookups for `id` by `delay`.
    pub fn with_delay(mut self, id: ProjectId, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    /// Serve `project` with `dependencies` and `repositories` for permalink lookups.
    pub fn with_root(
        mut self,
        project: Project,
        dependencies: Vec<ProjectDependency>,
        repositories: Vec<Repository>,
    ) -> Self {
        self.by_permalink.insert(
            project.permalink.clone(),
            PermalinkEntry {
                project,
                dependencies,
                repositories,
            },
        );
        self
    }

    /// Fail every permalink lookup with `error`.
    pub fn with_permalink_failure(mut self, error: CatalogError) -> Self {
        self.permalink_failure = Some(error);
        self
    }

    pub fn id_calls(&self) -> usize {
        self.id_calls.load(Ordering::SeqCst)
    }

    pub fn permalink_calls(&self) -> usize {
        self.permalink_calls.load(Ordering::SeqCst)
    }

    /// Highest number of id lookups observed in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Ids in the order their lookups completed.
    pub fn completion_order(&self) -> Vec<ProjectId> {
        self.completion_order.lock().map(|order| order.clone()).unwrap_or_default()
    }

    /// Include requested by the most recent permalink lookup.
    pub fn last_include(&self) -> Option<Include> {
        self.last_include.lock().ok().and_then(|include| *include)
    }
}

impl ProjectCatalog for MockCatalog {
    async fn fetch_by_id(
        &self,
        _ctx: &RequestContext,
        id: ProjectId,
    ) -> Result<Option<Project>, CatalogError> {
        self.id_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if let Some(delay) = self.delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }

        if let Ok(mut order) = self.completion_order.lock() {
            order.push(id);
        }

        match self.by_id.get(&id) {
            Some(IdBehavior::Found(project)) => Ok(Some(project.clone())),
            Some(IdBehavior::Fail(error)) => Err(error.clone()),
            None => Ok(None),
        }
    }

    async fn fetch_by_permalink(
        &self,
        _ctx: &RequestContext,
        permalink: &ProjectPermalink,
        include: Include,
    ) -> Result<CatalogLookup, CatalogError> {
        self.permalink_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_include.lock() {
            *last = Some(include);
        }

        if let Some(error) = &self.permalink_failure {
            return Err(error.clone());
        }

        let Some(entry) = self.by_permalink.get(permalink.as_str()) else {
            return Ok(CatalogLookup::default());
        };

        Ok(CatalogLookup {
            project: Some(entry.project.clone()),
            dependencies: match include {
                Include::Dependencies => entry.dependencies.clone(),
                _ => Vec::new(),
            },
            repositories: match include {
                Include::Repositories => entry.repositories.clone(),
                _ => Vec::new(),
            },
        })
    }
}
