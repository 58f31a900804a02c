//! JSON body parser.

use serde_json::Deserializer;

use crate::error::EchoError;
use crate::mapping::Dict;
use crate::parser::outcome::{ParseOutcome, Parser};

/// Decodes the first JSON value of the input as an object.
///
/// Data after the first value is ignored. Numbers keep their exact decimal
/// text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, input: &[u8]) -> ParseOutcome {
        match decode_nullable(input) {
            Ok(Some(dict)) => ParseOutcome::Matched(dict),
            Ok(None) => ParseOutcome::NoOpinion,
            Err(e) => ParseOutcome::Failed(e),
        }
    }
}

/// Decode `input` into a [`Dict`]; a top-level `null` is an error.
pub fn decode_object(input: &[u8]) -> Result<Dict, EchoError> {
    decode_nullable(input)?
        .ok_or_else(|| EchoError::ParserFailure("invalid type: null, expected a map".to_string()))
}

/// Decode `input` into a [`Dict`], `None` for a top-level `null`.
pub fn decode_nullable(input: &[u8]) -> Result<Option<Dict>, EchoError> {
    let mut stream = Deserializer::from_slice(input).into_iter::<Option<Dict>>();

    match stream.next() {
        Some(Ok(dict)) => Ok(dict),
        Some(Err(e)) => Err(EchoError::ParserFailure(e.to_string())),
        None => Err(EchoError::ParserFailure("unexpected end of JSON input".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_numbers_keep_exact_text() {
        let dict =
            decode_object(br#"{"iss":"joe","exp":1300819380,"http://example.com/is_root":true}"#)
                .unwrap();
        assert_eq!(
            Value::Object(dict.clone()),
            json!({"iss": "joe", "exp": 1300819380, "http://example.com/is_root": true})
        );

        let big = decode_object(br#"{"n":12345678901234567890.000000000001}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&big).unwrap(),
            r#"{"n":12345678901234567890.000000000001}"#
        );
    }

    #[test]
    fn test_trailing_data_is_ignored() {
        let dict = decode_object(br#"{"foo":"bar"} trailing"#).unwrap();
        assert_eq!(dict["foo"], "bar");
    }

    #[test]
    fn test_null_has_no_opinion() {
        assert_eq!(JsonParser.parse(b"null"), ParseOutcome::NoOpinion);
        assert_eq!(JsonParser.parse(b" null {\"foo\":1}"), ParseOutcome::NoOpinion);
        assert!(decode_object(b"null").is_err());
    }

    #[test]
    fn test_rejects_invalid_input() {
        for input in [&b"not a json"[..], b"", b"[1,2]", br#"{"foo""#] {
            assert!(
                matches!(JsonParser.parse(input), ParseOutcome::Failed(_)),
                "{:?} should fail",
                String::from_utf8_lossy(input)
            );
        }
    }
}
