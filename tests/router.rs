//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_echo::config::EchoConfig;
use http_echo::http::EchoServer;
use http_echo::parser::{JsonParser, ParserRegistry};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

async fn echo(server: &EchoServer, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = server.router().oneshot(request).await.unwrap();
    let status = response.status();
    let error = response
        .headers()
        .get("x-error")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, error, body)
}

#[tokio::test]
async fn test_unknown_scheme_passes_through() {
    let server = EchoServer::new(EchoConfig::default(), common::default_registry());
    let request = Request::builder()
        .uri("/")
        .header("Authorization", "foo bar")
        .body(Body::empty())
        .unwrap();

    let (status, error, body) = echo(&server, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(error, None);
    assert_eq!(body["authorization"], json!({"foo": "bar"}));
}

#[tokio::test]
async fn test_jwt_body_is_decoded() {
    let server = EchoServer::new(EchoConfig::default(), common::default_registry());
    let request = Request::builder()
        .method("POST")
        .uri("/token")
        .header("Content-Type", "application/jwt")
        .body(Body::from("eyJhbGciOiJub25lIn0.eyJzdWIiOiIxMjMifQ."))
        .unwrap();

    let (status, _, body) = echo(&server, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["body"],
        json!({"header": {"alg": "none"}, "payload": {"sub": "123"}, "verified": false})
    );
}

#[tokio::test]
async fn test_failing_parsers_are_joined_in_order() {
    let registry = ParserRegistry::new();
    registry.register_content_type("application/json", JsonParser).unwrap();
    registry.register_auth_scheme("Strict", JsonParser);
    let server = EchoServer::new(EchoConfig::default(), Arc::new(registry));

    let request = Request::builder()
        .method("POST")
        .uri("/?q=%zz")
        .header("Content-Type", "application/json")
        .header("Authorization", "Strict nope")
        .body(Body::from(r#"{"foo""#))
        .unwrap();

    let (status, error, body) = echo(&server, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // form, body, authorization
    assert_eq!(
        error.unwrap(),
        "parse error,\"invalid URL escape \"\"%zz\"\"\",\
         EOF while parsing an object at line 1 column 6,\
         expected ident at line 1 column 2"
    );
    assert_eq!(body["path"], "/");
    assert!(body.get("body").is_none());
    assert!(body.get("authorization").is_none());
}

#[tokio::test]
async fn test_numbers_keep_their_text() {
    let server = EchoServer::new(EchoConfig::default(), common::default_registry());
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"big":123456789012345678901234567890}"#))
        .unwrap();

    let response = server.router().oneshot(request).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(r#""big":123456789012345678901234567890"#));
}
