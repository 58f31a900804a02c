//! Catalog of content-type and auth-scheme parsers.
//!
//! # Responsibilities
//! - Append parsers in registration order (no uniqueness, never removed)
//! - Resolve the first decisive parser for a media type or scheme
//!
//! # Design Decisions
//! - Readers load an immutable `Arc<Vec<_>>` snapshot and never lock
//! - Writers serialize on a mutex, copy the snapshot, append and swap
//! - Registration is rare (startup), lookup happens on every request

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::error::EchoError;
use crate::parser::media_type::{parse_media_type, MediaType};
use crate::parser::outcome::{ParseOutcome, Parser};

/// A registered body parser and the media type it answers for.
#[derive(Clone)]
pub struct ContentTypeEntry {
    pub media_type: MediaType,
    parser: Arc<dyn Parser>,
}

/// A registered credential parser and its authentication scheme.
#[derive(Clone)]
pub struct AuthSchemeEntry {
    pub scheme: String,
    parser: Arc<dyn Parser>,
}

impl fmt::Debug for ContentTypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentTypeEntry")
            .field("media_type", &self.media_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AuthSchemeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSchemeEntry")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

/// Registry of parsers shared by every mapping call.
///
/// Constructed once at startup and handed around as `Arc<ParserRegistry>`.
pub struct ParserRegistry {
    content_types: ArcSwap<Vec<ContentTypeEntry>>,
    content_types_lock: Mutex<()>,
    auth_schemes: ArcSwap<Vec<AuthSchemeEntry>>,
    auth_schemes_lock: Mutex<()>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            content_types: ArcSwap::from_pointee(Vec::new()),
            content_types_lock: Mutex::new(()),
            auth_schemes: ArcSwap::from_pointee(Vec::new()),
            auth_schemes_lock: Mutex::new(()),
        }
    }

    /// Register a body parser for a media type such as `application/json`.
    pub fn register_content_type<P>(&self, content_type: &str, parser: P) -> Result<(), EchoError>
    where
        P: Parser + 'static,
    {
        let media_type = parse_media_type(content_type)?.ok_or_else(|| {
            EchoError::InvalidTypeFormat(format!("mime: missing subtype in {:?}", content_type))
        })?;

        tracing::debug!(media_type = %media_type, "Registering content parser");

        let entry = ContentTypeEntry {
            media_type,
            parser: Arc::new(parser),
        };

        let _guard = self
            .content_types_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::clone(&self.content_types.load());
        next.push(entry);
        self.content_types.store(Arc::new(next));

        Ok(())
    }

    /// Register a credential parser for an authentication scheme.
    ///
    /// The scheme is taken verbatim and compared case-sensitively.
    pub fn register_auth_scheme<P>(&self, scheme: impl Into<String>, parser: P)
    where
        P: Parser + 'static,
    {
        let entry = AuthSchemeEntry {
            scheme: scheme.into(),
            parser: Arc::new(parser),
        };

        tracing::debug!(scheme = %entry.scheme, "Registering auth scheme parser");

        let _guard = self
            .auth_schemes_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::clone(&self.auth_schemes.load());
        next.push(entry);
        self.auth_schemes.store(Arc::new(next));
    }

    /// Offer `content` to every parser whose media type matches, in
    /// registration order, until one is decisive.
    pub fn lookup_content(&self, media_type: &MediaType, content: &[u8]) -> ParseOutcome {
        let snapshot = self.content_types.load_full();

        snapshot
            .iter()
            .filter(|entry| media_type.matches(&entry.media_type))
            .map(|entry| entry.parser.parse(content))
            .find(ParseOutcome::is_decisive)
            .unwrap_or(ParseOutcome::NoOpinion)
    }

    /// Offer `credentials` to every parser registered for exactly `scheme`.
    pub fn lookup_auth(&self, scheme: &str, credentials: &str) -> ParseOutcome {
        let snapshot = self.auth_schemes.load_full();

        snapshot
            .iter()
            .filter(|entry| entry.scheme == scheme)
            .map(|entry| entry.parser.parse(credentials.as_bytes()))
            .find(ParseOutcome::is_decisive)
            .unwrap_or(ParseOutcome::NoOpinion)
    }

    /// Current content-type entries in registration order.
    pub fn content_types(&self) -> Arc<Vec<ContentTypeEntry>> {
        self.content_types.load_full()
    }

    /// Current auth-scheme entries in registration order.
    pub fn auth_schemes(&self) -> Arc<Vec<AuthSchemeEntry>> {
        self.auth_schemes.load_full()
    }

    pub fn content_type_count(&self) -> usize {
        self.content_types.load().len()
    }

    pub fn auth_scheme_count(&self) -> usize {
        self.auth_schemes.load().len()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("content_types", &self.content_types.load())
            .field("auth_schemes", &self.auth_schemes.load())
            .finish()
    }
}
