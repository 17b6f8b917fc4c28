//! Provider adapter against an in-process upstream on 127.0.0.1.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use chat_core::fallback::GREETING_REPLY;
use chat_core::ports::CompletionPort;
use chat_core::resolver::ReplyResolver;
use chat_server::middleware::cors_layer;
use chat_server::provider::OpenAiCompatProvider;
use chat_server::routes;
use chat_server::state::AppState;
use chat_types::config::{ProviderConfig, ProviderKind};
use chat_types::ProviderError;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_fixed(status: StatusCode, body: &'static str) -> String {
    spawn_upstream(Router::new().route(
        COMPLETIONS_PATH,
        post(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    ))
    .await
}

fn provider_for(base: &str, timeout_secs: Option<u64>) -> OpenAiCompatProvider {
    OpenAiCompatProvider::new(ProviderConfig {
        provider: ProviderKind::Custom,
        api_key: "test-key".to_string(),
        api_base: Some(base.to_string()),
        timeout_secs,
        ..Default::default()
    })
    .unwrap()
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn success_returns_trimmed_content() {
    let captured: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();
    let router = Router::new().route(
        COMPLETIONS_PATH,
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                *sink.lock().unwrap() = Some((auth, body));
                Json(completion("  ¡Hola! ¿En qué te ayudo?\n"))
            }
        }),
    );
    let base = spawn_upstream(router).await;
    let provider = provider_for(&base, Some(5));

    let text = provider.complete("sé breve", "hola").await.unwrap();
    assert_eq!(text, "¡Hola! ¿En qué te ayudo?");

    let (auth, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(auth, "Bearer test-key");
    assert_eq!(body["model"], "gemma2-9b-it");
    assert_eq!(body["max_tokens"], 150);
    assert_eq!(body["messages"][0]["content"], "sé breve");
    assert_eq!(body["messages"][1]["content"], "hola");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let base = spawn_fixed(StatusCode::UNAUTHORIZED, r#"{"error":"invalid key"}"#).await;
    let err = provider_for(&base, Some(5)).complete("s", "hola").await.unwrap_err();
    match err {
        ProviderError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid key"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(
        ProviderError::Status { status: 401, body: String::new() }.kind(),
        "status"
    );
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let base = spawn_fixed(StatusCode::OK, "not json at all").await;
    let err = provider_for(&base, Some(5)).complete("s", "hola").await.unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)), "{:?}", err);
}

#[tokio::test]
async fn no_choices_is_parse_error() {
    let base = spawn_fixed(StatusCode::OK, r#"{"choices":[]}"#).await;
    let err = provider_for(&base, Some(5)).complete("s", "hola").await.unwrap_err();
    assert_eq!(err, ProviderError::Parse("No choices in response".to_string()));
}

#[tokio::test]
async fn blank_content_is_empty_reply() {
    let base = spawn_fixed(
        StatusCode::OK,
        r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#,
    )
    .await;
    let err = provider_for(&base, Some(5)).complete("s", "hola").await.unwrap_err();
    assert_eq!(err, ProviderError::EmptyReply);

    let base = spawn_fixed(
        StatusCode::OK,
        r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
    )
    .await;
    let err = provider_for(&base, Some(5)).complete("s", "hola").await.unwrap_err();
    assert_eq!(err, ProviderError::EmptyReply);
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider_for(&format!("http://{}", addr), Some(5))
        .complete("s", "hola")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Transport(_)), "{:?}", err);
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let router = Router::new().route(
        COMPLETIONS_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(completion("demasiado tarde")).into_response()
        }),
    );
    let base = spawn_upstream(router).await;
    let err = provider_for(&base, Some(1)).complete("s", "hola").await.unwrap_err();
    assert_eq!(err, ProviderError::Timeout(1));
    assert_eq!(err.kind(), "timeout");
}

#[tokio::test]
async fn failing_upstream_falls_back_end_to_end() {
    let base = spawn_fixed(StatusCode::INTERNAL_SERVER_ERROR, "upstream down").await;
    let resolver = ReplyResolver::new(Arc::new(provider_for(&base, Some(5))), "sistema");
    let app = routes::build(
        AppState::new(Arc::new(resolver), Duration::ZERO),
        cors_layer(None),
    );

    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"message":"Hola, buen día"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["message"], GREETING_REPLY);
}

#[tokio::test]
async fn working_upstream_end_to_end() {
    let base = spawn_upstream(Router::new().route(
        COMPLETIONS_PATH,
        post(|| async { Json(completion("Todo bien por aquí.")) }),
    ))
    .await;
    let resolver = ReplyResolver::new(Arc::new(provider_for(&base, Some(5))), "sistema");
    let app = routes::build(
        AppState::new(Arc::new(resolver), Duration::ZERO),
        cors_layer(None),
    );

    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"message":"¿cómo estás?"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["message"], "Todo bien por aquí. 🤖");
}
