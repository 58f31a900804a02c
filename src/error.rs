//! Error kinds produced while mapping a request or response.
//!
//! # Propagation
//! - `BodyReadFailure` aborts the whole mapping call
//! - every other kind is collected into a [`ParseErrors`] composite and the
//!   caller still receives the best-effort map
//!
//! The `Display` of each kind is its bare message so that the composite can
//! join messages without nesting prefixes.

use std::fmt;

use thiserror::Error;

/// Tag that opens every composite error message.
pub const PARSE_ERROR_TAG: &str = "parse error";

/// A single failure raised while classifying or decoding part of a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EchoError {
    /// A content-type or media-type string failed to parse.
    #[error("{0}")]
    InvalidTypeFormat(String),

    /// A urlencoded body or query string contains a malformed escape.
    #[error("{0}")]
    InvalidForm(String),

    /// A registered parser rejected otherwise matched input.
    #[error("{0}")]
    ParserFailure(String),

    /// The underlying byte stream could not be read to the end.
    #[error("{0}")]
    BodyReadFailure(String),
}

impl EchoError {
    /// Short kind name used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            EchoError::InvalidTypeFormat(_) => "invalid_type_format",
            EchoError::InvalidForm(_) => "invalid_form",
            EchoError::ParserFailure(_) => "parser_failure",
            EchoError::BodyReadFailure(_) => "body_read_failure",
        }
    }
}

/// The join of all non-fatal errors collected by one mapping call.
///
/// Formatted as `parse error,` followed by the CSV encoded messages in
/// collection order. An empty composite still renders the tag and the
/// separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseErrors {
    messages: Vec<String>,
}

impl ParseErrors {
    /// Build a composite from individual errors.
    pub fn new<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = EchoError>,
    {
        Self {
            messages: errors.into_iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<EchoError> for ParseErrors {
    fn from(error: EchoError) -> Self {
        Self::new([error])
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},", PARSE_ERROR_TAG)?;
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write_csv_field(f, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

fn write_csv_field(f: &mut fmt::Formatter<'_>, field: &str) -> fmt::Result {
    let needs_quotes = field.starts_with([' ', '\t'])
        || field.contains([',', '"', '\r', '\n']);

    if !needs_quotes {
        return f.write_str(field);
    }

    f.write_str("\"")?;
    f.write_str(&field.replace('"', "\"\""))?;
    f.write_str("\"")
}
