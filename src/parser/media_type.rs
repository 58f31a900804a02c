//! Media type parsing for registration and dispatch.
//!
//! # Design Decisions
//! - Full media types go through the `mime` crate (type and subtype lowercased,
//!   parameters validated and dropped)
//! - A bare token without a slash is accepted and yields no pair at all; the
//!   dispatcher treats that as "no match" rather than an error

use std::fmt;

use mime::Mime;

use crate::error::EchoError;

/// The `(primary, sub)` pair used as a match key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    pub primary: String,
    pub sub: String,
}

impl MediaType {
    /// Wildcard style match against a registered key: the primary type must be
    /// equal and the registered subtype must be a prefix or a suffix of ours.
    ///
    /// A registered `json` therefore also matches `nonjson`; the rule is kept
    /// permissive on purpose so `foo+json` and `json+foo` both match.
    pub fn matches(&self, registered: &MediaType) -> bool {
        self.primary == registered.primary
            && (self.sub.starts_with(&registered.sub) || self.sub.ends_with(&registered.sub))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.primary, self.sub)
    }
}

/// Parse a `Content-Type` style value.
///
/// Returns `Ok(None)` for a lone token such as `application`.
pub fn parse_media_type(value: &str) -> Result<Option<MediaType>, EchoError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(EchoError::InvalidTypeFormat("mime: no media type".to_string()));
    }

    let (essence, params) = match trimmed.split_once(';') {
        Some((essence, params)) => (essence.trim(), Some(params.trim_start())),
        None => (trimmed, None),
    };
    if !essence.contains('/') {
        if !essence.is_empty() && essence.bytes().all(is_token_char) {
            return Ok(None);
        }
        return Err(invalid(trimmed));
    }

    // `mime` rejects whitespace before the `;`
    let normalized = match params {
        Some(params) => format!("{essence};{params}"),
        None => essence.to_string(),
    };
    let mime: Mime = normalized.parse().map_err(|_| invalid(trimmed))?;
    match mime.essence_str().split_once('/') {
        Some((primary, sub)) if !primary.is_empty() && !sub.is_empty() => Ok(Some(MediaType {
            primary: primary.to_string(),
            sub: sub.to_string(),
        })),
        _ => Err(invalid(trimmed)),
    }
}

fn invalid(value: &str) -> EchoError {
    EchoError::InvalidTypeFormat(format!("mime: invalid media type {:?}", value))
}

fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(primary: &str, sub: &str) -> Option<MediaType> {
        Some(MediaType {
            primary: primary.into(),
            sub: sub.into(),
        })
    }

    #[test]
    fn test_full_media_type() {
        assert_eq!(parse_media_type("application/json").unwrap(), pair("application", "json"));
        assert_eq!(
            parse_media_type("Application/Foo+JSON; charset=utf-8").unwrap(),
            pair("application", "foo+json")
        );
    }

    #[test]
    fn test_whitespace_around_parameters() {
        assert_eq!(
            parse_media_type("application/json ; charset=utf-8").unwrap(),
            pair("application", "json")
        );
        assert_eq!(
            parse_media_type("text/plain\t;  charset=\"utf-8\"").unwrap(),
            pair("text", "plain")
        );
        assert_eq!(parse_media_type("text/plain ;").unwrap(), pair("text", "plain"));
        assert_eq!(parse_media_type("application ; charset=utf-8").unwrap(), None);
    }

    #[test]
    fn test_lone_token_is_no_pair() {
        assert_eq!(parse_media_type("application").unwrap(), None);
    }

    #[test]
    fn test_malformed_types() {
        for value in ["?", "", "foo bar", "   "] {
            assert!(
                matches!(parse_media_type(value), Err(EchoError::InvalidTypeFormat(_))),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_prefix_and_suffix_matching() {
        let registered = MediaType {
            primary: "application".into(),
            sub: "json".into(),
        };
        for sub in ["json", "foo+json", "json+foo", "nonjson"] {
            let requested = MediaType {
                primary: "application".into(),
                sub: sub.into(),
            };
            assert!(requested.matches(&registered), "{sub} should match");
        }

        let other_primary = MediaType {
            primary: "text".into(),
            sub: "json".into(),
        };
        assert!(!other_primary.matches(&registered));

        let unrelated = MediaType {
            primary: "application".into(),
            sub: "xml".into(),
        };
        assert!(!unrelated.matches(&registered));
    }
}
