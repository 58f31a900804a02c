//! Parser registry and dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Content-Type + body bytes
//!     → media_type.rs (primary/sub pair)
//!     → dispatch.rs (parse_content)
//!     → registry.rs (first decisive content parser, registration order)
//!
//! Authorization header
//!     → dispatch.rs (split scheme / credentials)
//!     → registry.rs (first decisive auth parser, exact scheme)
//!     → raw credentials when nothing matched
//! ```
//!
//! # Design Decisions
//! - The registry is an explicit object, built at startup and shared via `Arc`
//! - Parsers report one of three outcomes: matched, no opinion, failed
//! - Built-in parsers are registered by the application, not by the registry

pub mod builtin;
pub mod dispatch;
pub mod json;
pub mod jwt;
pub mod media_type;
pub mod outcome;
pub mod registry;

pub use builtin::{register_defaults, registry_from_config, BuiltinParser};
pub use dispatch::{parse_authorization, parse_content};
pub use json::JsonParser;
pub use jwt::JwtParser;
pub use media_type::{parse_media_type, MediaType};
pub use outcome::{Optional, ParseOutcome, Parser};
pub use registry::ParserRegistry;
