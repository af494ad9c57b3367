use reqwest::Url;

use crate::constants::{DEPENDENCIES_INCLUDE, PROJECT_INLINES, REPOSITORIES_INCLUDE};
use crate::models::ProjectId;
use crate::validation::ProjectPermalink;

/// Attribute a query searches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Id,
    Permalink,
}

impl SearchKey {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Permalink => "permalink",
        }
    }
}

/// Related records to attach to a permalink lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Include {
    #[default]
    Nothing,
    /// `project_repositories`
    Repositories,
    /// `dependent_project_dependencies`
    Dependencies,
}

impl Include {
    const fn as_param(self) -> Option<&'static str> {
        match self {
            Self::Nothing => None,
            Self::Repositories => Some(REPOSITORIES_INCLUDE),
            Self::Dependencies => Some(DEPENDENCIES_INCLUDE),
        }
    }
}

/// Parameters of one projects query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search_key: SearchKey,
    pub search_value: String,
    pub inlines: &'static [&'static str],
    pub include: Include,
}

impl CatalogQuery {
    /// Query for a single project by id, without inlines.
    #[must_use]
    pub fn by_id(id: ProjectId) -> Self {
        Self {
            search_key: SearchKey::Id,
            search_value: id.to_string(),
            inlines: &[],
            include: Include::Nothing,
        }
    }

    /// Query for a single project by permalink with the standard inlines.
    #[must_use]
    pub fn by_permalink(permalink: &ProjectPermalink, include: Include) -> Self {
        Self {
            search_key: SearchKey::Permalink,
            search_value: permalink.as_str().to_string(),
            inlines: PROJECT_INLINES,
            include,
        }
    }

    /// Render the query onto `base`.
    ///
    /// Parameters are emitted in key order (`includes`, `inlines`, `search[..]`)
    /// and form-url-encoded, replacing any query already present on `base`.
    #[must_use]
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(include) = self.include.as_param() {
                pairs.append_pair("includes", include);
            }
            if !self.inlines.is_empty() {
                pairs.append_pair("inlines", &self.inlines.join(","));
            }
            pairs.append_pair(&format!("search[{}]", self.search_key.as_str()), &self.search_value);
        }
        url
    }
}
