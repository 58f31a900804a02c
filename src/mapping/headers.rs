//! Header and cookie extraction.
//!
//! # Design Decisions
//! - Header names are echoed in canonical MIME form (`Content-Type`), values
//!   keep their wire order
//! - Request cookies come from `Cookie`, response cookies from `Set-Cookie`
//! - Malformed cookie pairs are skipped, later duplicates win

use axum::http::header::{AsHeaderName, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::mapping::dict::{map_values, Dict};

/// Normalize all headers into a canonical map.
pub fn map_headers(headers: &HeaderMap) -> Dict {
    map_values(headers.keys().map(|name| {
        let values = headers.get_all(name).iter().map(value_string).collect();
        (canonical_key(name.as_str()), values)
    }))
}

/// First value of a header as text, if present.
pub fn first_value<K: AsHeaderName>(headers: &HeaderMap, name: K) -> Option<String> {
    headers.get(name).map(value_string)
}

/// Canonical MIME form of a header name: `x-request-id` → `X-Request-Id`.
///
/// Names containing anything but token characters are returned unchanged.
pub fn canonical_key(name: &str) -> String {
    if !name.bytes().all(is_token_char) {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// Cookies sent by a client, flattened into `name → value`.
pub fn request_cookies(headers: &HeaderMap) -> Dict {
    let mut out = Dict::new();

    for header in headers.get_all(COOKIE) {
        let line = value_string(header);
        for part in line.split(';') {
            if let Some((name, value)) = cookie_pair(part) {
                out.insert(name.to_string(), Value::String(value.to_string()));
            }
        }
    }

    out
}

/// Cookies set by a server, flattened into `name → value`.
pub fn response_cookies(headers: &HeaderMap) -> Dict {
    let mut out = Dict::new();

    for header in headers.get_all(SET_COOKIE) {
        let line = value_string(header);
        let first = line.split(';').next().unwrap_or_default();
        if let Some((name, value)) = cookie_pair(first) {
            out.insert(name.to_string(), Value::String(value.to_string()));
        }
    }

    out
}

fn cookie_pair(part: &str) -> Option<(&str, &str)> {
    let (name, value) = part.trim().split_once('=')?;
    let name = name.trim();

    if name.is_empty() || !name.bytes().all(is_token_char) {
        return None;
    }

    Some((name, cookie_value(value.trim())?))
}

fn cookie_value(raw: &str) -> Option<&str> {
    let value = match raw.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(unquoted) => unquoted,
        None => raw,
    };

    value
        .bytes()
        .all(|b| (0x20..0x7f).contains(&b) && b != b'"' && b != b';' && b != b'\\')
        .then_some(value)
}

fn value_string(value: &HeaderValue) -> String {
    match value.to_str() {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
    }
}

fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
