//! Response mapping.
//!
//! Same shape as request mapping, minus method, path, query and form; the
//! status code is recorded instead.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::Response;
use serde_json::Value;

use crate::error::EchoError;
use crate::mapping::body::buffer_body;
use crate::mapping::dict::{insert_non_empty, Dict, Mapping};
use crate::mapping::headers::{first_value, map_headers, response_cookies};
use crate::parser::dispatch::parse_content;
use crate::parser::registry::ParserRegistry;

/// Map a response into its canonical representation.
///
/// With `inspect_body` the body is dispatched to the content parsers and put
/// back unread afterwards. Unlike requests, an empty body is still dispatched.
pub async fn map_response(
    response: &mut Response<Body>,
    registry: &ParserRegistry,
    inspect_body: bool,
) -> Result<Mapping, EchoError> {
    let mut out = Dict::new();
    let mut errors = Vec::new();

    out.insert("version".into(), Value::String(format!("{:?}", response.version())));
    out.insert("status".into(), Value::from(response.status().as_u16()));

    insert_non_empty(&mut out, "headers", map_headers(response.headers()));
    insert_non_empty(&mut out, "cookies", response_cookies(response.headers()));

    if inspect_body {
        let content = buffer_body(response.body_mut()).await?;
        let content_type = first_value(response.headers(), CONTENT_TYPE).unwrap_or_default();
        match parse_content(registry, &content_type, &content) {
            Ok(parsed) => insert_non_empty(&mut out, "body", parsed),
            Err(e) => {
                tracing::debug!(error = %e, kind = e.kind(), "Response body dispatch failed");
                errors.push(e);
            }
        }
    }

    Ok(Mapping::new(out, errors))
}
