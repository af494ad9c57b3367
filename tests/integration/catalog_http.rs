//! The HTTP catalog client against the stub.

use std::time::Duration;

use axum::http::StatusCode;
use project_catalog_mcp::catalog::{CerebroClient, Include, ProjectCatalog};
use project_catalog_mcp::config::Config;
use project_catalog_mcp::core::{CatalogError, ErrorClass, RequestContext};
use project_catalog_mcp::service::ProjectService;
use project_catalog_mcp::test_utils::fixtures;
use project_catalog_mcp::validation::ProjectPermalink;

use crate::stub::{StubCatalog, TOKEN};

fn permalink(value: &str) -> ProjectPermalink {
    ProjectPermalink::parse(value).unwrap()
}

#[tokio::test]
async fn test_permalink_lookup_sends_token_and_query() {
    let root = fixtures::project(1, "Checkout");
    let edges = fixtures::edges(1, &[8]);
    let stub = StubCatalog::builder().root(&root, &edges, &[]).start().await;
    let client = CerebroClient::new(&stub.config()).unwrap();

    let lookup = client
        .fetch_by_permalink(&RequestContext::background(), &permalink("checkout"), Include::Dependencies)
        .await
        .unwrap();

    assert_eq!(lookup.project, Some(root));
    assert_eq!(lookup.dependencies, edges);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.authorization.as_deref(), Some(format!("Token {TOKEN}").as_str()));
    assert_eq!(request.accept.as_deref(), Some("application/json"));
    let keys: Vec<&str> = request.params.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["includes", "inlines", "search[permalink]"]);
    assert_eq!(request.param("includes"), Some("dependent_project_dependencies"));
    assert_eq!(
        request.param("inlines"),
        Some(
            "project_repository_urls,project_stakeholder_owner_name,project_stakeholder_oncall_name,link_deployment_url,link_deployment_urls"
        )
    );
    assert!(request.raw_query.contains("search%5Bpermalink%5D=checkout"));
}

#[tokio::test]
async fn test_id_lookup_has_no_inlines() {
    let stub = StubCatalog::builder().project(&fixtures::project(8, "Billing")).start().await;
    let client = CerebroClient::new(&stub.config()).unwrap();

    let found = client.fetch_by_id(&RequestContext::background(), 8).await.unwrap();
    let missing = client.fetch_by_id(&RequestContext::background(), 999).await.unwrap();

    assert_eq!(found.map(|p| p.name), Some("Billing".to_string()));
    assert_eq!(missing, None);
    let requests = stub.requests();
    assert_eq!(requests[0].raw_query, "search%5Bid%5D=8");
    assert!(requests[0].param("inlines").is_none());
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let stub = StubCatalog::builder()
        .permalink_status("checkout", StatusCode::INTERNAL_SERVER_ERROR, "database down")
        .start()
        .await;
    let client = CerebroClient::new(&stub.config()).unwrap();

    let err = client
        .fetch_by_permalink(&RequestContext::background(), &permalink("checkout"), Include::Nothing)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CatalogError::Upstream {
            status: 500,
            body: "database down".to_string()
        }
    );
    assert_eq!(err.to_string(), "API error 500: database down");
}

#[tokio::test]
async fn test_wrong_token_is_rejected_upstream() {
    let stub = StubCatalog::builder().project(&fixtures::project(8, "Billing")).start().await;
    let mut config = Config::with_token("wrong");
    config.catalog_base_url = stub.base_url.clone();
    let client = CerebroClient::new(&config).unwrap();

    let err = client.fetch_by_id(&RequestContext::background(), 8).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Upstream);
}

#[tokio::test]
async fn test_invalid_json_is_malformed_response() {
    let stub = StubCatalog::builder().permalink_raw("checkout", "<html>oops</html>").start().await;
    let client = CerebroClient::new(&stub.config()).unwrap();

    let err = client
        .fetch_by_permalink(&RequestContext::background(), &permalink("checkout"), Include::Nothing)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::MalformedResponse { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("failed to parse JSON response: "));
}

#[tokio::test]
async fn test_unreachable_catalog_is_transport_error() {
    let mut config = Config::with_token(TOKEN);
    // Port 9 (discard) on localhost is not expected to accept connections.
    config.catalog_base_url = "http://127.0.0.1:9/projects.json".to_string();
    config.http_timeout = Duration::from_secs(5);
    let client = CerebroClient::new(&config).unwrap();

    let err = client.fetch_by_id(&RequestContext::background(), 1).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Transport);
    assert!(err.to_string().starts_with("failed to execute request: "));
}

#[tokio::test]
async fn test_deadline_aborts_slow_request() {
    let stub = StubCatalog::builder()
        .project(&fixtures::project(8, "Billing"))
        .id_delay(8, Duration::from_secs(10))
        .start()
        .await;
    let client = CerebroClient::new(&stub.config()).unwrap();
    let ctx = RequestContext::background().with_timeout(Duration::from_millis(100));

    let err = client.fetch_by_id(&ctx, 8).await.unwrap_err();
    assert_eq!(err, CatalogError::DeadlineExceeded);
}

#[tokio::test]
async fn test_dependencies_end_to_end_with_mixed_outcomes() {
    let root = fixtures::project(1, "Checkout");
    let stub = StubCatalog::builder()
        .root(&root, &fixtures::edges(1, &[8, 10, 999]), &[])
        .project(&fixtures::project(8, "Billing"))
        .id_status(10, StatusCode::BAD_GATEWAY, "upstream hiccup")
        .id_delay(8, Duration::from_millis(100))
        .start()
        .await;
    let service = ProjectService::new(CerebroClient::new(&stub.config()).unwrap());

    let deps = service
        .project_dependencies(&RequestContext::background(), &permalink("checkout"))
        .await
        .unwrap();

    assert_eq!(deps.resolved.len(), 3);
    assert_eq!(deps.resolved[0].project().map(|p| p.id), Some(8));
    assert_eq!(
        deps.resolved[1].failure().map(ToString::to_string),
        Some("API error 502: upstream hiccup".to_string())
    );
    assert!(deps.resolved[2].is_not_found());
    assert_eq!(stub.id_requests().len(), 3);

    assert!(deps.text.contains("### 1. Billing"));
    assert!(deps.text.contains("### 2. Error fetching project ID 10\n- **Error:** API error 502: upstream hiccup\n"));
    assert!(deps.text.contains("### 3. Project ID 999 (Not Found)"));
}

#[tokio::test]
async fn test_details_end_to_end_filters_repositories() {
    let mut root = fixtures::project(1, "Checkout");
    root.project_repository_urls = vec!["https://github.com/acme/checkout".to_string()];
    let repos = vec![
        fixtures::repository(1, "checkout-web", Some("checkout")),
        fixtures::repository(2, "cart", Some("cart")),
    ];
    let stub = StubCatalog::builder().root(&root, &[], &repos).start().await;
    let service = ProjectService::new(CerebroClient::new(&stub.config()).unwrap());

    let details = service
        .project_details(&RequestContext::background(), &permalink("checkout"))
        .await
        .unwrap();

    assert_eq!(details.repositories, vec![repos[0].clone()]);
    assert_eq!(stub.requests()[0].param("includes"), Some("project_repositories"));
    assert!(details.text.contains("1 repositories linked to kube_project 'checkout'"));
}
