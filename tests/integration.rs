use ask_gemini::{
    server::{router, FUNCTION_PATH},
    AskHandler, Config,
};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_CONTENT_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn app(server: &MockServer, api_key: Option<&str>) -> Router {
    let mut config = Config::default();
    config.gemini_base_url = server.uri();
    config.gemini_api_key = api_key.map(str::to_string);
    router(AskHandler::from_config(config))
}

async fn call(app: Router, method: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(FUNCTION_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn mount_upstream(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GENERATE_CONTENT_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_non_post_methods_are_rejected() {
    let server = MockServer::start().await;

    for verb in ["GET", "PUT", "PATCH", "DELETE"] {
        let (status, body) = call(app(&server, Some("test-key")), verb, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Use POST" }));
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_question() {
    let server = MockServer::start().await;

    for payload in ["{}", r#"{"topic":"optics"}"#, r#"{"question":""}"#] {
        let (status, body) = call(app(&server, Some("test-key")), "POST", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing question" }));
    }
}

#[tokio::test]
async fn test_missing_credential() {
    let server = MockServer::start().await;

    let (status, body) = call(app(&server, None), "POST", r#"{"question":"What is a joule?"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Missing GEMINI_API_KEY" }));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_relayed() {
    let server = MockServer::start().await;
    mount_upstream(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let (status, body) = call(
        app(&server, Some("test-key")),
        "POST",
        r#"{"question":"What is entropy?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "Upstream error", "detail": "boom" }));
}

#[tokio::test]
async fn test_successful_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_CONTENT_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [{
                    "text": "You are a clear, friendly physics tutor. Explain briefly, show a formula when useful.\n\nQ: What is mass-energy equivalence?"
                }]
            }],
            "generationConfig": { "temperature": 0.4 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "E=mc^2" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = call(
        app(&server, Some("test-key")),
        "POST",
        r#"{"question":"What is mass-energy equivalence?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "answer": "E=mc^2" }));
}

#[tokio::test]
async fn test_empty_candidates_fall_back() {
    let server = MockServer::start().await;
    mount_upstream(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })),
    )
    .await;

    let (status, body) = call(
        app(&server, Some("test-key")),
        "POST",
        r#"{"question":"What is dark matter?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "answer": "No answer." }));
}

#[tokio::test]
async fn test_null_upstream_levels_fall_back() {
    for upstream in [json!(null), json!({ "candidates": [null] })] {
        let server = MockServer::start().await;
        mount_upstream(&server, ResponseTemplate::new(200).set_body_json(upstream.clone())).await;

        let (status, body) = call(
            app(&server, Some("test-key")),
            "POST",
            r#"{"question":"What is a photon?"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK, "upstream: {}", upstream);
        assert_eq!(body, json!({ "answer": "No answer." }));
    }
}

#[tokio::test]
async fn test_multiple_parts_are_newline_joined() {
    let server = MockServer::start().await;
    mount_upstream(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "A" }, { "text": "B" }] } }]
        })),
    )
    .await;

    let (status, body) = call(
        app(&server, Some("test-key")),
        "POST",
        r#"{"question":"Two parts please"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "answer": "A\nB" }));
}

#[tokio::test]
async fn test_malformed_request_json_is_internal_fault() {
    let server = MockServer::start().await;

    let (status, body) = call(app(&server, Some("test-key")), "POST", "{\"question\": ").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_fault() {
    // Grab a free port and release it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut config = Config::default().with_api_key("test-key");
    config.gemini_base_url = base_url;
    let app = router(AskHandler::from_config(config));

    let (status, body) = call(app, "POST", r#"{"question":"Anyone there?"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(!message.contains("test-key"));
}
