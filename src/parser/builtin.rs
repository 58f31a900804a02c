//! Built-in parsers and their default registrations.

use serde::{Deserialize, Serialize};

use crate::config::ParsersConfig;
use crate::error::EchoError;
use crate::parser::json::JsonParser;
use crate::parser::jwt::JwtParser;
use crate::parser::outcome::{ParseOutcome, Parser};
use crate::parser::registry::ParserRegistry;

/// Names of the parsers shipped with the crate, as used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinParser {
    Json,
    Jwt,
}

impl Parser for BuiltinParser {
    fn parse(&self, input: &[u8]) -> ParseOutcome {
        match self {
            BuiltinParser::Json => JsonParser.parse(input),
            BuiltinParser::Jwt => JwtParser.parse(input),
        }
    }
}

impl BuiltinParser {
    /// Register this parser for a media type, optionally ignoring its failures.
    pub fn register_content_type(
        self,
        registry: &ParserRegistry,
        content_type: &str,
        optional: bool,
    ) -> Result<(), EchoError> {
        if optional {
            registry.register_content_type(content_type, self.optional())
        } else {
            registry.register_content_type(content_type, self)
        }
    }

    /// Register this parser for an authentication scheme.
    pub fn register_auth_scheme(self, registry: &ParserRegistry, scheme: &str, optional: bool) {
        if optional {
            registry.register_auth_scheme(scheme, self.optional());
        } else {
            registry.register_auth_scheme(scheme, self);
        }
    }
}

/// Register the default catalog:
/// - `application/json` → JSON
/// - `application/jwt` → JWT
/// - `Bearer` → JWT, falling back to the raw token when it is not a JWT
pub fn register_defaults(registry: &ParserRegistry) -> Result<(), EchoError> {
    registry.register_content_type("application/json", JsonParser)?;
    registry.register_content_type("application/jwt", JwtParser)?;
    registry.register_auth_scheme("Bearer", JwtParser.optional());

    Ok(())
}

/// Build a registry from configuration: defaults first (when enabled), then
/// the configured entries in file order.
pub fn registry_from_config(config: &ParsersConfig) -> Result<ParserRegistry, EchoError> {
    let registry = ParserRegistry::new();

    if config.builtins {
        register_defaults(&registry)?;
    }

    for entry in &config.content_types {
        entry
            .parser
            .register_content_type(&registry, &entry.content_type, entry.optional)?;
    }

    for entry in &config.auth_schemes {
        entry
            .parser
            .register_auth_scheme(&registry, &entry.scheme, entry.optional);
    }

    tracing::info!(
        content_types = registry.content_type_count(),
        auth_schemes = registry.auth_scheme_count(),
        "Parser registry ready"
    );

    Ok(registry)
}
