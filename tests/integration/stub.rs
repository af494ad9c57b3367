//! In-process stub of the catalog projects endpoint.
//!
//! Serves `GET /projects.json` from a fixed set of projects, edges and
//! repositories, and records every request it receives.

// Not every helper is used by every test module
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use project_catalog_mcp::config::Config;
use project_catalog_mcp::models::{Project, ProjectDependency, Repository};
use reqwest::Url;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TOKEN: &str = "stub-token";

/// One request seen by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub accept: Option<String>,
    /// Query parameters in wire order, decoded
    pub params: Vec<(String, String)>,
    /// Raw query string as sent
    pub raw_query: String,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Canned behavior for one projects response.
#[derive(Debug, Clone)]
enum Reply {
    Body(Value),
    Status(StatusCode, String),
    Raw(String),
}

#[derive(Debug, Default)]
struct StubState {
    by_id: HashMap<String, Reply>,
    by_permalink: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<Recorded>>,
}

/// Builder for a [`StubCatalog`].
#[derive(Debug, Default)]
pub struct StubBuilder {
    state: StubState,
}

impl StubBuilder {
    pub fn project(mut self, project: &Project) -> Self {
        self.state
            .by_id
            .insert(project.id.to_string(), Reply::Body(json!({ "projects": [project] })));
        self
    }

    pub fn root(
        mut self,
        project: &Project,
        dependencies: &[ProjectDependency],
        repositories: &[Repository],
    ) -> Self {
        self.state.by_permalink.insert(
            project.permalink.clone(),
            Reply::Body(json!({
                "pagination": {"current_page": 1},
                "projects": [project],
                "project_dependencies": dependencies,
                "repositories": repositories,
            })),
        );
        self
    }

    pub fn id_status(mut self, id: i64, status: StatusCode, body: &str) -> Self {
        self.state.by_id.insert(id.to_string(), Reply::Status(status, body.to_string()));
        self
    }

    pub fn permalink_status(mut self, permalink: &str, status: StatusCode, body: &str) -> Self {
        self.state
            .by_permalink
            .insert(permalink.to_string(), Reply::Status(status, body.to_string()));
        self
    }

    pub fn permalink_raw(mut self, permalink: &str, body: &str) -> Self {
        self.state.by_permalink.insert(permalink.to_string(), Reply::Raw(body.to_string()));
        self
    }

    pub fn id_delay(mut self, id: i64, delay: Duration) -> Self {
        self.state.delays.insert(id.to_string(), delay);
        self
    }

    pub async fn start(self) -> StubCatalog {
        let state = Arc::new(self.state);
        let app = Router::new()
            .route("/projects.json", get(projects))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubCatalog {
            base_url: format!("http://{addr}/projects.json"),
            state,
        }
    }
}

/// A running stub.
pub struct StubCatalog {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubCatalog {
    pub fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    /// Configuration pointing at this stub with the stub token.
    pub fn config(&self) -> Config {
        let mut config = Config::with_token(TOKEN);
        config.catalog_base_url = self.base_url.clone();
        config
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests that searched by id.
    pub fn id_requests(&self) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.param("search[id]").is_some()).collect()
    }
}

async fn projects(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> (StatusCode, String) {
    let raw_query = raw.unwrap_or_default();
    let params: Vec<(String, String)> = Url::parse(&format!("http://stub/?{raw_query}"))
        .map(|url| url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect())
        .unwrap_or_default();
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);

    let recorded = Recorded {
        authorization: header("authorization"),
        accept: header("accept"),
        params,
        raw_query,
    };
    state.requests.lock().unwrap().push(recorded.clone());

    if recorded.authorization.as_deref() != Some(format!("Token {TOKEN}").as_str()) {
        return (StatusCode::UNAUTHORIZED, "invalid token".to_string());
    }

    let reply = if let Some(id) = recorded.param("search[id]") {
        if let Some(delay) = state.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        state.by_id.get(id).cloned()
    } else if let Some(permalink) = recorded.param("search[permalink]") {
        state.by_permalink.get(permalink).cloned()
    } else {
        return (StatusCode::BAD_REQUEST, "missing search".to_string());
    };

    match reply {
        Some(Reply::Body(body)) => (StatusCode::OK, body.to_string()),
        Some(Reply::Status(status, body)) => (status, body),
        Some(Reply::Raw(body)) => (StatusCode::OK, body),
        None => (StatusCode::OK, json!({"projects": []}).to_string()),
    }
}
