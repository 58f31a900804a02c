//! HTTP echo library: canonical request/response introspection with
//! pluggable body and authorization parsers.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod mapping;
pub mod observability;
pub mod parser;

pub use config::EchoConfig;
pub use error::{EchoError, ParseErrors};
pub use http::EchoServer;
pub use lifecycle::Shutdown;
pub use mapping::{map_request, map_response, map_values, Dict, Mapping};
pub use parser::{ParseOutcome, Parser, ParserRegistry};
