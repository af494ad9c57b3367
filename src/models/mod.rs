//! Catalog data models.
//!
//! These types mirror the JSON documents returned by the Cerebro projects
//! endpoint. They are read-only facts: the server never mutates them after
//! decoding. Attributes the catalog may send as `null` decode to their empty
//! value so that rendering never has to special-case them.

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog identifier of a project.
pub type ProjectId = i64;

/// Decode `null` as `T::default()`.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A project record from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "nullable")]
    pub id: ProjectId,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub permalink: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub started_on: String,
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slack_channel: String,
    #[serde(default, deserialize_with = "nullable")]
    pub nickname: String,
    #[serde(default, deserialize_with = "nullable")]
    pub cpu_usage: String,
    #[serde(default, deserialize_with = "nullable")]
    pub memory_usage: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub deploy_target: String,
    #[serde(default, deserialize_with = "nullable")]
    pub in_scope_for_soc2: String,
    #[serde(default, deserialize_with = "nullable")]
    pub runs_on: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tfa: String,
    #[serde(default, deserialize_with = "nullable")]
    pub criticality_tier: String,
    #[serde(default, deserialize_with = "nullable")]
    pub calculated_criticality_tier: String,
    #[serde(default, deserialize_with = "nullable")]
    pub release_state: String,
    #[serde(default, deserialize_with = "nullable")]
    pub link_repository_urls: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub project_repository_urls: Vec<String>,
    /// Owning team name (inlined attribute)
    #[serde(rename = "project_stakeholder_owner_name", default, deserialize_with = "nullable")]
    pub owner: String,
    /// On-call rotation name (inlined attribute)
    #[serde(rename = "project_stakeholder_oncall_name", default, deserialize_with = "nullable")]
    pub oncall: String,
    #[serde(default, deserialize_with = "nullable")]
    pub dependent_project_dependencies_ids: Vec<ProjectId>,
    #[serde(rename = "link_deployment_url", default, deserialize_with = "nullable")]
    pub primary_deployment_url: String,
    #[serde(rename = "link_deployment_urls", default, deserialize_with = "nullable")]
    pub additional_deployment_urls: Vec<String>,
}

/// A directed dependency edge: `dependent_project_id` depends on `providing_project_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDependency {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub dependent_project_id: ProjectId,
    #[serde(default, deserialize_with = "nullable")]
    pub providing_project_id: ProjectId,
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub optional: bool,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// A source repository record, attached by the `project_repositories` include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub open_source: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub fork: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub permalink: String,
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub updated_at: String,
    #[serde(default)]
    pub deprecated_on: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub synced_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub started_on: String,
    #[serde(default, deserialize_with = "nullable")]
    pub github_sync_error: bool,
    /// Permalink of the project this repository deploys as
    #[serde(default)]
    pub kube_project: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub archived: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
}

/// The complete body of a projects query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub pagination: serde_json::Map<String, serde_json::Value>,
    #[serde(default, deserialize_with = "nullable")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "nullable")]
    pub repositories: Vec<Repository>,
    #[serde(default, deserialize_with = "nullable")]
    pub project_dependencies: Vec<ProjectDependency>,
}

impl CatalogResponse {
    /// The first matching project, which is the only one a unique-key search can return.
    #[must_use]
    pub fn into_first_project(self) -> Option<Project> {
        self.projects.into_iter().next()
    }
}
