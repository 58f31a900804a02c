//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. Every section has defaults so an empty file is a valid config.

use serde::{Deserialize, Serialize};

use crate::parser::BuiltinParser;

/// Root configuration for the echo service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EchoConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// What the echo handler inspects.
    pub echo: EchoSettings,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Parser registrations.
    pub parsers: ParsersConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Echo handler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EchoSettings {
    /// Dispatch request bodies to content parsers.
    pub inspect_body: bool,

    /// Largest request body read, in bytes.
    pub body_limit_bytes: usize,
}

impl Default for EchoSettings {
    fn default() -> Self {
        Self {
            inspect_body: true,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,

    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Metrics endpoint address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "http_echo=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Parser registrations applied at startup, in file order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParsersConfig {
    /// Register the built-in JSON, JWT and Bearer parsers first.
    pub builtins: bool,

    /// Extra content-type registrations.
    pub content_types: Vec<ContentTypeRegistration>,

    /// Extra auth-scheme registrations.
    pub auth_schemes: Vec<AuthSchemeRegistration>,
}

impl Default for ParsersConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            content_types: Vec::new(),
            auth_schemes: Vec::new(),
        }
    }
}

/// Maps a media type to a built-in parser.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentTypeRegistration {
    /// Media type, e.g. "application/vnd.api+json".
    pub content_type: String,

    /// Parser to use.
    pub parser: BuiltinParser,

    /// Ignore parser failures instead of reporting them.
    #[serde(default)]
    pub optional: bool,
}

/// Maps an authentication scheme to a built-in parser.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSchemeRegistration {
    /// Scheme as it appears in the `Authorization` header (case-sensitive).
    pub scheme: String,

    /// Parser to use.
    pub parser: BuiltinParser,

    /// Ignore parser failures and echo the raw credentials instead.
    #[serde(default)]
    pub optional: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: EchoConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.echo.inspect_body);
        assert!(config.parsers.builtins);
        assert!(config.parsers.content_types.is_empty());
    }

    #[test]
    fn test_parser_sections() {
        let config: EchoConfig = toml::from_str(
            r#"
            [echo]
            inspect_body = false

            [parsers]
            builtins = false

            [[parsers.content_types]]
            content_type = "application/vnd.api+json"
            parser = "json"

            [[parsers.auth_schemes]]
            scheme = "Token"
            parser = "jwt"
            optional = true
            "#,
        )
        .unwrap();

        assert!(!config.echo.inspect_body);
        assert!(!config.parsers.builtins);
        assert_eq!(config.parsers.content_types[0].parser, BuiltinParser::Json);
        assert!(!config.parsers.content_types[0].optional);
        assert_eq!(config.parsers.auth_schemes[0].scheme, "Token");
        assert!(config.parsers.auth_schemes[0].optional);
    }
}
