use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use super::{CatalogLookup, CatalogQuery, Include, ProjectCatalog};
use crate::config::Config;
use crate::core::{CatalogError, RequestContext};
use crate::models::{CatalogResponse, Project, ProjectId};
use crate::validation::ProjectPermalink;

/// HTTP client for the Cerebro projects endpoint.
///
/// Cloning is cheap: clones share the underlying connection pool, which is
/// safe for any number of concurrent requests.
#[derive(Clone)]
pub struct CerebroClient {
    base_url: Url,
    http: reqwest::Client,
}

impl std::fmt::Debug for CerebroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CerebroClient").field("base_url", &self.base_url.as_str()).finish()
    }
}

impl CerebroClient {
    /// Build a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the base URL does not parse, the token
    /// is not a valid header value, or the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.catalog_base_url).map_err(|e| {
            CatalogError::config(format!("invalid catalog base URL '{}': {e}", config.catalog_base_url))
        })?;

        let mut authorization = HeaderValue::from_str(&format!("Token {}", config.token()))
            .map_err(|_| CatalogError::config("CEREBRO_TOKEN contains invalid characters"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| CatalogError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            http,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute one query and decode the response body.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Transport`] when the request cannot be sent or the body read
    /// - [`CatalogError::Upstream`] for non-2xx statuses
    /// - [`CatalogError::MalformedResponse`] for bodies that are not a projects listing
    /// - [`CatalogError::Cancelled`] / [`CatalogError::DeadlineExceeded`] from `ctx`
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        query: &CatalogQuery,
    ) -> Result<CatalogResponse, CatalogError> {
        let url = query.to_url(&self.base_url);
        debug!("GET {}", url);

        ctx.run(async {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| CatalogError::from_reqwest("execute request", &e))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| CatalogError::from_reqwest("read response", &e))?;

            if !status.is_success() {
                return Err(CatalogError::Upstream {
                    status: status.as_u16(),
                    body,
                });
            }

            serde_json::from_str::<CatalogResponse>(&body).map_err(|e| {
                CatalogError::MalformedResponse {
                    reason: e.to_string(),
                }
            })
        })
        .await
    }
}

impl ProjectCatalog for CerebroClient {
    async fn fetch_by_id(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
    ) -> Result<Option<Project>, CatalogError> {
        let response = self.execute(ctx, &CatalogQuery::by_id(id)).await?;
        Ok(response.into_first_project())
    }

    async fn fetch_by_permalink(
        &self,
        ctx: &RequestContext,
        permalink: &ProjectPermalink,
        include: Include,
    ) -> Result<CatalogLookup, CatalogError> {
        let response = self.execute(ctx, &CatalogQuery::by_permalink(permalink, include)).await?;
        Ok(CatalogLookup {
            project: response.projects.into_iter().next(),
            dependencies: response.project_dependencies,
            repositories: response.repositories,
        })
    }
}
