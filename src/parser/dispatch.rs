//! Content and authorization dispatch.
//!
//! Thin façades over [`ParserRegistry`] lookups that only extract the match
//! key from the raw header value.

use serde_json::Value;

use crate::error::EchoError;
use crate::mapping::{omit_empty, Dict};
use crate::parser::media_type::parse_media_type;
use crate::parser::registry::ParserRegistry;

/// Dispatch a body to the first matching content parser.
///
/// A malformed content type is an error; a lone token such as `application`
/// is silently unmatched.
pub fn parse_content(
    registry: &ParserRegistry,
    content_type: &str,
    content: &[u8],
) -> Result<Option<Dict>, EchoError> {
    let Some(media_type) = parse_media_type(content_type)? else {
        return Ok(None);
    };

    registry.lookup_content(&media_type, content).into_result()
}

/// Dispatch an `Authorization` header value to its scheme parser.
///
/// The result is a single entry map keyed by the scheme. When no parser
/// produced anything, the raw credentials are echoed instead.
pub fn parse_authorization(
    registry: &ParserRegistry,
    header: &str,
) -> Result<Option<Dict>, EchoError> {
    if header.is_empty() {
        return Ok(None);
    }

    let (scheme, credentials) = header.split_once(' ').unwrap_or((header, ""));

    let value = match omit_empty(registry.lookup_auth(scheme, credentials).into_result()?) {
        Some(parsed) => Value::Object(parsed),
        None => Value::String(credentials.to_string()),
    };

    let mut out = Dict::new();
    out.insert(scheme.to_string(), value);
    Ok(Some(out))
}
