//! Request mapping.
//!
//! # Responsibilities
//! - Record protocol, method, path, headers, cookies, query
//! - Decode urlencoded forms (strict escapes)
//! - Dispatch the body and the `Authorization` header to registered parsers
//! - Collect every non-fatal failure into one composite error
//!
//! # Design Decisions
//! - The body is buffered only when something needs it and is always put
//!   back unread for later consumers
//! - A body read failure aborts; every other failure is collected
//! - Failures are collected in step order: form, body, authorization

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, Request};
use serde_json::Value;

use crate::error::EchoError;
use crate::mapping::body::buffer_body;
use crate::mapping::dict::{insert_non_empty, map_values, Dict, Mapping};
use crate::mapping::form::{parse_lenient, parse_strict, validate_escapes};
use crate::mapping::headers::{first_value, map_headers, request_cookies};
use crate::parser::dispatch::{parse_authorization, parse_content};
use crate::parser::media_type::{parse_media_type, MediaType};
use crate::parser::registry::ParserRegistry;

/// Content type assumed for form decoding when the request declares none.
const DEFAULT_FORM_CONTENT_TYPE: &str = "application/octet-stream";

/// Map a request into its canonical representation.
///
/// With `inspect_body` the body is dispatched to the content parsers. The
/// request body stays readable afterwards.
pub async fn map_request(
    request: &mut Request<Body>,
    registry: &ParserRegistry,
    inspect_body: bool,
) -> Result<Mapping, EchoError> {
    let mut out = Dict::new();
    let mut errors = Vec::new();

    // protocol
    out.insert("version".into(), Value::String(format!("{:?}", request.version())));
    out.insert("method".into(), Value::String(request.method().to_string()));

    insert_non_empty(&mut out, "headers", map_headers(request.headers()));
    insert_non_empty(&mut out, "cookies", request_cookies(request.headers()));

    // path and query
    let uri = request.uri().clone();
    out.insert("path".into(), Value::String(uri.path().to_string()));
    let query = uri.query().unwrap_or_default();
    insert_non_empty(&mut out, "query", map_values(parse_lenient(query.as_bytes())));

    let form_type = declared_form_type(request.method(), request.headers());
    let wants_form = matches!(&form_type, Some(Ok(Some(media))) if is_urlencoded(media));

    let body = if inspect_body || wants_form {
        Some(buffer_body(request.body_mut()).await?)
    } else {
        None
    };

    // form
    match decode_form(form_type, query, body.as_deref()) {
        Ok(form) => insert_non_empty(&mut out, "form", form),
        Err(e) => {
            tracing::debug!(error = %e, kind = e.kind(), "Form decoding failed");
            errors.push(e);
        }
    }

    // body
    if inspect_body {
        if let Some(content) = body.as_deref().filter(|b| !b.is_empty()) {
            let content_type = first_value(request.headers(), CONTENT_TYPE).unwrap_or_default();
            match parse_content(registry, &content_type, content) {
                Ok(parsed) => insert_non_empty(&mut out, "body", parsed),
                Err(e) => {
                    tracing::debug!(error = %e, kind = e.kind(), "Body dispatch failed");
                    errors.push(e);
                }
            }
        }
    }

    // authorization
    let authorization = first_value(request.headers(), AUTHORIZATION).unwrap_or_default();
    match parse_authorization(registry, &authorization) {
        Ok(parsed) => insert_non_empty(&mut out, "authorization", parsed),
        Err(e) => {
            tracing::debug!(error = %e, kind = e.kind(), "Authorization dispatch failed");
            errors.push(e);
        }
    }

    Ok(Mapping::new(out, errors))
}

/// Methods whose bodies are decoded as forms.
fn carries_form(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT || method == Method::PATCH
}

fn is_urlencoded(media: &MediaType) -> bool {
    media.primary == "application" && media.sub == "x-www-form-urlencoded"
}

/// Parsed content type of a form-carrying request, `None` for other methods.
fn declared_form_type(
    method: &Method,
    headers: &HeaderMap,
) -> Option<Result<Option<MediaType>, EchoError>> {
    if !carries_form(method) {
        return None;
    }

    let declared = first_value(headers, CONTENT_TYPE).filter(|v| !v.is_empty());
    Some(parse_media_type(
        declared.as_deref().unwrap_or(DEFAULT_FORM_CONTENT_TYPE),
    ))
}

/// Strictly decode the form body, then validate the query string.
///
/// Only the first failure is reported and it suppresses the form.
fn decode_form(
    form_type: Option<Result<Option<MediaType>, EchoError>>,
    query: &str,
    body: Option<&[u8]>,
) -> Result<Option<Dict>, EchoError> {
    let form = match form_type {
        Some(Ok(Some(media))) if is_urlencoded(&media) => {
            Some(map_values(parse_strict(body.unwrap_or_default())?))
        }
        Some(Err(e)) => return Err(e),
        _ => None,
    };

    validate_escapes(query.as_bytes())?;

    Ok(form)
}
