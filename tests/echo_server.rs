//! End-to-end tests against a running echo server.

use http_echo::config::EchoConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_json_body_and_bearer_token() {
    let (addr, shutdown) =
        common::start_echo_server(EchoConfig::default(), common::default_registry()).await;

    let res = common::client()
        .post(format!("http://{}/", addr))
        .header("Content-Type", "application/json")
        .header("Authorization", "Bearer dummy")
        .body(r#"{"foo":"bar"}"#)
        .send()
        .await
        .expect("echo server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("x-error").is_none());
    assert!(res.headers().get("x-request-id").is_some());
    assert_eq!(
        res.headers()["content-type"],
        "application/json; charset=utf-8"
    );

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "POST");
    assert_eq!(body["version"], "HTTP/1.1");
    assert_eq!(body["path"], "/");
    assert_eq!(body["body"], json!({"foo": "bar"}));
    assert_eq!(body["authorization"], json!({"Bearer": "dummy"}));
    assert_eq!(body["headers"]["Content-Type"], "application/json");

    shutdown.trigger();
}

#[tokio::test]
async fn test_form_and_query_parameters() {
    let (addr, shutdown) =
        common::start_echo_server(EchoConfig::default(), common::default_registry()).await;

    let res = common::client()
        .post(format!("http://{}/submit?dummy=yes", addr))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("foo=bar&foo=baz")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["path"], "/submit");
    assert_eq!(body["query"], json!({"dummy": "yes"}));
    assert_eq!(body["form"], json!({"foo": ["bar", "baz"]}));
    assert!(body.get("body").is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_form_reports_x_error() {
    let (addr, shutdown) =
        common::start_echo_server(EchoConfig::default(), common::default_registry()).await;

    let res = common::client()
        .post(format!("http://{}/", addr))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("%1")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers()["x-error"],
        "parse error,\"invalid URL escape \"\"%1\"\"\""
    );

    // partial result still comes back
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "POST");
    assert!(body.get("form").is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn test_bad_content_type_keeps_partial_echo() {
    let (addr, shutdown) =
        common::start_echo_server(EchoConfig::default(), common::default_registry()).await;

    let res = common::client()
        .put(format!("http://{}/things/1", addr))
        .header("Content-Type", "?")
        .body("Hi")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().get("x-error").is_some());

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/things/1");
    assert_eq!(body["headers"]["Content-Type"], "?");

    shutdown.trigger();
}

#[tokio::test]
async fn test_body_inspection_can_be_disabled() {
    let mut config = EchoConfig::default();
    config.echo.inspect_body = false;
    let (addr, shutdown) = common::start_echo_server(config, common::default_registry()).await;

    let res = common::client()
        .post(format!("http://{}/", addr))
        .header("Content-Type", "application/json")
        .body("not json at all")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("body").is_none());

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = EchoConfig::default();
    config.echo.body_limit_bytes = 16;
    let (addr, shutdown) = common::start_echo_server(config, common::default_registry()).await;

    let res = common::client()
        .post(format!("http://{}/", addr))
        .header("Content-Type", "application/json")
        .body(format!(r#"{{"padding":"{}"}}"#, "x".repeat(64)))
        .send()
        .await
        .unwrap();

    assert!(res.status().is_client_error());

    shutdown.trigger();
}
