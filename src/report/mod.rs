//! Markdown rendering of project details and resolved dependencies.
//!
//! Pure functions of their inputs; the output is what MCP clients display.
//! Each report is a borrowed view implementing [`fmt::Display`].

use std::fmt;

use crate::models::{Project, Repository};
use crate::resolver::{Resolution, ResolvedDependency};

/// Details of one project plus the repositories linked to it.
#[derive(Debug, Clone, Copy)]
pub struct ProjectDetailsReport<'a> {
    pub project: &'a Project,
    /// Permalink the project was looked up by
    pub permalink: &'a str,
    pub repositories: &'a [Repository],
}

impl fmt::Display for ProjectDetailsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let project = self.project;
        let permalink = self.permalink;
        writeln!(f, "# Project Details for: {permalink}\n")?;

        writeln!(f, "**Project Name:** {}", project.name)?;
        writeln!(f, "**Description:** {}", project.description)?;
        writeln!(f, "**Category:** {}", project.category)?;
        writeln!(f, "**Calculated Criticality Tier:** {}", project.calculated_criticality_tier)?;
        writeln!(f, "**Release State:** {}", project.release_state)?;
        writeln!(f, "**Owner:** {}", project.owner)?;
        writeln!(f, "**Slack Channel:** {}", project.slack_channel)?;

        if project.project_repository_urls.is_empty() {
            writeln!(f, "No project repository URLs found.")?;
        } else {
            writeln!(f, "\n**Project Repository URLs ({}):**", project.project_repository_urls.len())?;
            for (i, url) in project.project_repository_urls.iter().enumerate() {
                writeln!(f, "{}. {url}", i + 1)?;
            }
        }

        if self.repositories.is_empty() {
            return writeln!(f, "\nNo repositories found with matching kube_project.");
        }

        writeln!(
            f,
            "\n{} repositories linked to kube_project '{permalink}'\n",
            self.repositories.len()
        )?;
        for (i, repo) in self.repositories.iter().enumerate() {
            writeln!(f, "### {}. {}", i + 1, repo.name)?;
            writeln!(f, "- **Permalink:** {}", repo.permalink)?;
            writeln!(f, "- **URL:** {}", repo.url)?;
            writeln!(f, "- **Archived:** {}", repo.archived)?;
            if let Some(deprecated_on) = &repo.deprecated_on {
                writeln!(f, "- **Deprecated On:** {deprecated_on}")?;
            }
            writeln!(f, "- **Last Updated:** {}\n", repo.updated_at)?;
        }
        Ok(())
    }
}

/// A project and its resolved dependencies in edge order.
#[derive(Debug, Clone, Copy)]
pub struct DependenciesReport<'a> {
    pub project: &'a Project,
    pub resolved: &'a [ResolvedDependency],
}

impl fmt::Display for DependenciesReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let project = self.project;
        writeln!(f, "# Dependencies for Project: {}\n", project.name)?;
        writeln!(f, "**Project ID:** {}", project.id)?;
        writeln!(f, "**Permalink:** {}", project.permalink)?;
        writeln!(f, "**Description:** {}\n", project.description)?;
        writeln!(f, "## Dependencies ({})\n", self.resolved.len())?;

        for (i, item) in self.resolved.iter().enumerate() {
            let position = i + 1;
            let dep = &item.dependency;

            match &item.resolution {
                Resolution::Failed(err) => {
                    writeln!(f, "### {position}. Error fetching project ID {}", dep.providing_project_id)?;
                    writeln!(f, "- **Error:** {err}\n")?;
                }
                Resolution::NotFound => {
                    writeln!(f, "### {position}. Project ID {} (Not Found)", dep.providing_project_id)?;
                    writeln!(f, "- **Dependency ID:** {}", dep.id)?;
                    writeln!(f, "- **Optional:** {}\n", dep.optional)?;
                }
                Resolution::Found(providing) => {
                    writeln!(f, "### {position}. {}", providing.name)?;
                    writeln!(f, "- **Dependency ID:** {}", dep.id)?;
                    writeln!(f, "- **Providing Project ID:** {}", dep.providing_project_id)?;
                    writeln!(f, "- **Permalink:** {}", providing.permalink)?;
                    writeln!(f, "- **Description:** {}", providing.description)?;
                    writeln!(f, "- **Category:** {}", providing.category)?;
                    writeln!(f, "- **Criticality Tier:** {}", providing.calculated_criticality_tier)?;
                    writeln!(f, "- **Release State:** {}", providing.release_state)?;
                    writeln!(f, "- **Owner Team:** {}", providing.owner)?;
                    writeln!(f, "- **Slack Channel:** {}", providing.slack_channel)?;
                    writeln!(f, "- **Optional Dependency:** {}", dep.optional)?;
                    if !dep.description.is_empty() {
                        writeln!(f, "- **Dependency Description:** {}", dep.description)?;
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

/// Render the details of `project`, looked up by `permalink`.
#[must_use]
pub fn format_project_details(
    project: &Project,
    permalink: &str,
    repositories: &[Repository],
) -> String {
    ProjectDetailsReport {
        project,
        permalink,
        repositories,
    }
    .to_string()
}

/// Text returned when the catalog lists no dependency edges at all.
#[must_use]
pub fn format_no_dependencies(project: &Project) -> String {
    format!("# No dependencies found for project: {}\n\n", project.name)
}

/// Render `project` and its resolved dependencies in edge order.
#[must_use]
pub fn format_dependencies(project: &Project, resolved: &[ResolvedDependency]) -> String {
    DependenciesReport { project, resolved }.to_string()
}
