//! Integration tests for the Gemini client against a local fake upstream

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use feedback_server::generator::{GeminiClient, OracleError, ResponseGenerator, TextOracle};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Fake `generateContent`: checks the key and echoes the prompt back
async fn fake_generate(
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
        return Err((StatusCode::FORBIDDEN, "API key not valid".to_string()));
    }
    if model_action != "test-model:generateContent" {
        return Err((StatusCode::NOT_FOUND, format!("unknown model {}", model_action)));
    }

    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    let reply = if prompt.contains("Rating: 5 stars") {
        "USER_RESPONSE:\nThanks!\n\nADMIN_SUMMARY:\nHappy customer\n\nADMIN_ACTION:\nNone needed\n"
    } else {
        "no markers here"
    };

    Ok(Json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": reply }] }
        }]
    })))
}

async fn empty_generate() -> Json<Value> {
    Json(json!({ "candidates": [] }))
}

/// Test helper: spawn a fake upstream on an ephemeral port, return base URL
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1beta", addr)
}

fn client(key: &str, base_url: &str) -> GeminiClient {
    GeminiClient::new(key, "test-model", base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_generate_text_success() {
    let base = spawn_upstream(Router::new().route("/v1beta/models/:model_action", post(fake_generate))).await;

    let text = client("test-key", &base)
        .generate_text("Rating: 5 stars")
        .await
        .unwrap();

    assert!(text.starts_with("USER_RESPONSE:"));
}

#[tokio::test]
async fn test_bad_key_maps_to_api_error() {
    let base = spawn_upstream(Router::new().route("/v1beta/models/:model_action", post(fake_generate))).await;

    let err = client("wrong", &base).generate_text("hi").await.unwrap_err();

    match err {
        OracleError::Api(status, body) => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let base = spawn_upstream(Router::new().route("/v1beta/models/:model_action", post(empty_generate))).await;

    let err = client("test-key", &base).generate_text("hi").await.unwrap_err();

    assert!(matches!(err, OracleError::EmptyResponse));
}

#[tokio::test]
async fn test_unreachable_upstream_is_network_error() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client("test-key", &format!("http://{}/v1beta", addr))
        .generate_text("hi")
        .await
        .unwrap_err();

    assert!(matches!(err, OracleError::Network(_)));
}

#[tokio::test]
async fn test_generator_end_to_end_with_client() {
    let base = spawn_upstream(Router::new().route("/v1beta/models/:model_action", post(fake_generate))).await;
    let generator = ResponseGenerator::new(Arc::new(client("test-key", &base)));

    let outputs = generator.generate("Great service!", 5).await;
    assert_eq!(outputs.user_response, "Thanks!");
    assert_eq!(outputs.summary, "Happy customer");
    assert_eq!(outputs.action, "None needed");

    // Unstructured reply: empty fields, not fallback
    let outputs = generator.generate("meh", 2).await;
    assert_eq!(outputs.user_response, "");
    assert_eq!(outputs.summary, "");
    assert_eq!(outputs.action, "");
}

#[tokio::test]
async fn test_generator_falls_back_when_upstream_rejects() {
    let base = spawn_upstream(Router::new().route("/v1beta/models/:model_action", post(fake_generate))).await;
    let generator = ResponseGenerator::new(Arc::new(client("wrong", &base)));

    let outputs = generator.generate("Great service!", 5).await;

    assert_eq!(outputs, feedback_server::generator::AiOutputs::fallback());
}
