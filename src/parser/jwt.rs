//! Signed token (JWT) parser.
//!
//! Decodes the header and payload segments of a compact JWT. The signature is
//! never checked, so the result always reports `verified: false`.

use base64::Engine as _;
use serde_json::Value;

use crate::error::EchoError;
use crate::mapping::Dict;
use crate::parser::json::decode_object;
use crate::parser::outcome::{ParseOutcome, Parser};

#[derive(Debug, Clone, Copy, Default)]
pub struct JwtParser;

impl Parser for JwtParser {
    fn parse(&self, input: &[u8]) -> ParseOutcome {
        decode_token(input).into()
    }
}

/// Split a compact token into `{header, payload, verified}`.
pub fn decode_token(input: &[u8]) -> Result<Dict, EchoError> {
    let token = std::str::from_utf8(input)
        .map_err(|e| EchoError::ParserFailure(format!("token is not valid UTF-8: {}", e)))?;

    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(EchoError::ParserFailure(
            "token contains an invalid number of segments".to_string(),
        ));
    }

    let header = decode_segment(segments[0], "header")?;
    let payload = decode_segment(segments[1], "payload")?;

    let mut out = Dict::new();
    out.insert("header".into(), Value::Object(header));
    out.insert("payload".into(), Value::Object(payload));
    out.insert("verified".into(), Value::Bool(false));
    Ok(out)
}

fn decode_segment(segment: &str, name: &str) -> Result<Dict, EchoError> {
    // base64url, padding tolerated
    let raw = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| EchoError::ParserFailure(format!("failed to decode token {}: {}", name, e)))?;

    decode_object(&raw).map_err(|e| {
        EchoError::ParserFailure(format!("failed to parse token {} as JSON: {}", name, e))
    })
}
