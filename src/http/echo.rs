//! Echo responder.
//!
//! # Responsibilities
//! - Map the incoming request through the parser registry
//! - Serialize the canonical map as JSON
//! - Report collected parse errors in `X-Error` with a 400 status
//!
//! # Design Decisions
//! - The partial map is still returned when parsing failed somewhere
//! - A body that cannot be read at all gets a 400 with an empty body

use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ParseErrors;
use crate::http::server::AppState;
use crate::mapping::{map_request, Mapping};
use crate::observability::metrics;

/// Header carrying the composite error text.
pub const X_ERROR: &str = "x-error";

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Handler answering every request with its own canonical representation.
pub async fn echo_handler(State(state): State<AppState>, mut request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = match map_request(&mut request, &state.registry, state.inspect_body).await {
        Ok(mapping) => respond(mapping),
        Err(e) => {
            tracing::warn!(method = %method, path = %path, error = %e, "Failed to read request body");
            let mut headers = HeaderMap::new();
            add_error(&mut headers, &ParseErrors::from(e).to_string());
            (StatusCode::BAD_REQUEST, headers, Body::empty()).into_response()
        }
    };

    tracing::debug!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        "Echoed request"
    );
    metrics::record_request(&method, response.status().as_u16(), start);

    response
}

/// Turn a mapping into the echo response.
pub fn respond(mapping: Mapping) -> Response {
    let mut headers = HeaderMap::new();
    let mut status = StatusCode::OK;

    if let Some(err) = &mapping.error {
        tracing::warn!(errors = err.len(), error = %err, "Request mapped with parse errors");
        metrics::record_parse_errors(err.len());
        add_error(&mut headers, &err.to_string());
        status = StatusCode::BAD_REQUEST;
    }

    match serde_json::to_vec(&mapping.dict) {
        Ok(data) => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            (status, headers, data).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize echo response");
            add_error(&mut headers, &e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, headers).into_response()
        }
    }
}

/// Append an `X-Error` value, replacing characters a header cannot carry.
fn add_error(headers: &mut HeaderMap, message: &str) {
    let cleaned: String = message
        .chars()
        .map(|c| if c.is_control() && c != '\t' { ' ' } else { c })
        .collect();

    let value = HeaderValue::from_str(&cleaned)
        .unwrap_or_else(|_| HeaderValue::from_static(crate::error::PARSE_ERROR_TAG));
    headers.append(X_ERROR, value);
}
