//! Test fixtures for catalog records
//!
//! Small constructors for the projects and dependency edges used throughout the
//! unit and integration tests.

use crate::models::{Project, ProjectDependency, ProjectId, Repository};

/// A project with predictable descriptive attributes derived from its name.
pub fn project(id: ProjectId, name: &str) -> Project {
    let permalink = name.to_lowercase().replace(' ', "-");
    Project {
        id,
        name: name.to_string(),
        description: format!("{name} service"),
        category: "service".to_string(),
        calculated_criticality_tier: "tier_2".to_string(),
        release_state: "released".to_string(),
        owner: format!("Team {name}"),
        slack_channel: format!("#{permalink}"),
        permalink,
        ..Project::default()
    }
}

/// An edge from `dependent` to `providing` with id `id`.
pub fn edge(id: i64, dependent: ProjectId, providing: ProjectId) -> ProjectDependency {
    ProjectDependency {
        id,
        dependent_project_id: dependent,
        providing_project_id: providing,
        ..ProjectDependency::default()
    }
}

/// Edges from `dependent` to each of `providing`, with ids starting at 100.
pub fn edges(dependent: ProjectId, providing: &[ProjectId]) -> Vec<ProjectDependency> {
    providing
        .iter()
        .zip(100..)
        .map(|(&providing_id, id)| edge(id, dependent, providing_id))
        .collect()
}

/// A repository deployed as `kube_project`.
pub fn repository(id: i64, name: &str, kube_project: Option<&str>) -> Repository {
    Repository {
        id,
        name: name.to_string(),
        permalink: name.to_string(),
        url: format!("https://github.com/acme/{name}"),
        updated_at: "2024-05-01T12:00:00Z".to_string(),
        kube_project: kube_project.map(str::to_string),
        ..Repository::default()
    }
}
