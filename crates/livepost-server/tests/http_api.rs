//! HTTP-level tests for the GraphQL endpoint, health check and client bundle.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use livepost_server::{create_router, AppState, ServerConfig};
use serde_json::{json, Value};

struct TestContext {
    server: TestServer,
    state: AppState,
    client_dir: tempfile::TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self::with_config(|_| {})
    }

    fn with_config(configure: impl FnOnce(&mut ServerConfig)) -> Self {
        let client_dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig {
            client_dir: client_dir.path().to_path_buf(),
            ..Default::default()
        };
        configure(&mut config);

        let state = AppState::new(config);
        let server = TestServer::new(create_router(state.clone())).unwrap();

        Self {
            server,
            state,
            client_dir,
        }
    }

    async fn graphql(&self, body: Value) -> Value {
        let response = self.server.post("/graphql").json(&body).await;
        response.assert_status_ok();
        response.json::<Value>()
    }
}

const LIST_POSTS: &str = "{ posts { author comment } }";

#[tokio::test]
async fn test_fresh_server_lists_seed_post() {
    let ctx = TestContext::new();

    let body = ctx.graphql(json!({ "query": LIST_POSTS })).await;

    assert_eq!(
        body,
        json!({"data": {"posts": [{"author": "Bob", "comment": "Cool Post Bro!"}]}})
    );
}

#[tokio::test]
async fn test_no_seed_starts_empty() {
    let ctx = TestContext::with_config(|config| config.seed = false);

    let body = ctx.graphql(json!({ "query": LIST_POSTS })).await;

    assert_eq!(body, json!({"data": {"posts": []}}));
}

#[tokio::test]
async fn test_add_post_then_list_in_call_order() {
    let ctx = TestContext::new();
    let mutation = "mutation Add($author: String!, $comment: String!) { \
        addPost(author: $author, comment: $comment) { author comment } }";

    let body = ctx
        .graphql(json!({
            "query": mutation,
            "operationName": "Add",
            "variables": {"author": "Alice", "comment": "Hi"},
        }))
        .await;
    assert_eq!(
        body["data"]["addPost"],
        json!({"author": "Alice", "comment": "Hi"})
    );

    ctx.graphql(json!({
        "query": mutation,
        "variables": {"author": "Carol", "comment": "Second"},
    }))
    .await;

    let body = ctx.graphql(json!({ "query": LIST_POSTS })).await;
    assert_eq!(
        body["data"]["posts"],
        json!([
            {"author": "Bob", "comment": "Cool Post Bro!"},
            {"author": "Alice", "comment": "Hi"},
            {"author": "Carol", "comment": "Second"},
        ])
    );
}

#[tokio::test]
async fn test_blank_comment_returns_graphql_error() {
    let ctx = TestContext::new();

    let body = ctx
        .graphql(json!({
            "query": r#"mutation { addPost(author: "Alice", comment: " ") { author } }"#
        }))
        .await;

    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["errors"][0]["extensions"]["code"], "BAD_USER_INPUT");
    assert_eq!(body["errors"][0]["extensions"]["field"], "comment");
    assert_eq!(ctx.state.store.len(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let ctx = TestContext::new();

    let response = ctx.server.post("/graphql").text("{ posts }").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "TRANSPORT_ERROR");
    assert_eq!(ctx.state.store.len(), 1);
}

#[tokio::test]
async fn test_broken_json_body_is_transport_error() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/graphql")
        .bytes(Bytes::from_static(br#"{"query": "{ posts }""#))
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "TRANSPORT_ERROR");
    assert!(body["error"]["message"].as_str().is_some());
    assert_eq!(ctx.state.store.len(), 1);
}

#[tokio::test]
async fn test_get_without_upgrade_serves_playground() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/graphql").await;

    response.assert_status_ok();
    assert!(response.text().to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn test_get_without_upgrade_rejected_when_playground_disabled() {
    let ctx = TestContext::with_config(|config| config.playground = false);

    let response = ctx.server.get("/graphql").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "TRANSPORT_ERROR");
}

#[tokio::test]
async fn test_custom_endpoint_path() {
    let ctx = TestContext::with_config(|config| config.endpoint = "/api".to_string());

    let response = ctx
        .server
        .post("/api")
        .json(&json!({ "query": LIST_POSTS }))
        .await;
    response.assert_status_ok();

    let response = ctx
        .server
        .post("/graphql")
        .json(&json!({ "query": LIST_POSTS }))
        .await;
    response.assert_status_not_ok();
}

#[tokio::test]
async fn test_health_reports_counts() {
    let ctx = TestContext::new();
    let _listener = ctx.state.bus.subscribe(livepost_server::graphql::POST_ADDED);

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["posts"], 1);
    assert_eq!(body["subscribers"], 1);
}

#[tokio::test]
async fn test_root_serves_client_index() {
    let ctx = TestContext::new();
    std::fs::write(
        ctx.client_dir.path().join("index.html"),
        "<html><body>client bundle</body></html>",
    )
    .unwrap();
    std::fs::write(ctx.client_dir.path().join("app.js"), "console.log('hi');").unwrap();

    let response = ctx.server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("client bundle"));

    let response = ctx.server.get("/app.js").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "console.log('hi');");
}

#[tokio::test]
async fn test_root_without_bundle_serves_placeholder() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("No client bundle found"));
    assert!(text.contains("/graphql"));
}
