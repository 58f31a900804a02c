//! The parser capability shared by content-type and auth-scheme handlers.

use crate::error::EchoError;
use crate::mapping::Dict;

/// Result of offering input to a single parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Handled; stop scanning and use this map.
    Matched(Dict),
    /// Not handled; try the next candidate.
    NoOpinion,
    /// Handled but rejected; stop scanning and surface the error.
    Failed(EchoError),
}

impl ParseOutcome {
    /// `true` for outcomes that end a registry scan.
    pub fn is_decisive(&self) -> bool {
        !matches!(self, ParseOutcome::NoOpinion)
    }

    /// Convert into the dispatcher shape: `None` means nothing handled it.
    pub fn into_result(self) -> Result<Option<Dict>, EchoError> {
        match self {
            ParseOutcome::Matched(dict) => Ok(Some(dict)),
            ParseOutcome::NoOpinion => Ok(None),
            ParseOutcome::Failed(err) => Err(err),
        }
    }
}

impl From<Result<Dict, EchoError>> for ParseOutcome {
    fn from(result: Result<Dict, EchoError>) -> Self {
        match result {
            Ok(dict) => ParseOutcome::Matched(dict),
            Err(err) => ParseOutcome::Failed(err),
        }
    }
}

/// A body or credential parser.
pub trait Parser: Send + Sync {
    fn parse(&self, input: &[u8]) -> ParseOutcome;

    /// Wrap this parser so that failures turn into [`ParseOutcome::NoOpinion`].
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional(self)
    }
}

impl<F> Parser for F
where
    F: Fn(&[u8]) -> ParseOutcome + Send + Sync,
{
    fn parse(&self, input: &[u8]) -> ParseOutcome {
        self(input)
    }
}

/// Parser adapter that silently ignores failures of the inner parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optional<P>(pub P);

impl<P: Parser> Parser for Optional<P> {
    fn parse(&self, input: &[u8]) -> ParseOutcome {
        match self.0.parse(input) {
            ParseOutcome::Failed(err) => {
                tracing::trace!(error = %err, "Optional parser declined input");
                ParseOutcome::NoOpinion
            }
            other => other,
        }
    }
}
