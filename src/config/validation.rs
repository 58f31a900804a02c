//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts and limits > 0, addresses parse)
//! - Check that configured content types are usable registry keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EchoConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::EchoConfig;
use crate::parser::parse_media_type;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("invalid content type {content_type:?}: {reason}")]
    ContentType { content_type: String, reason: String },

    #[error("auth scheme must not be empty or contain spaces: {0:?}")]
    AuthScheme(String),
}

/// Check the configuration, collecting every problem.
pub fn validate_config(config: &EchoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.echo.body_limit_bytes == 0 {
        errors.push(ValidationError::Zero("echo.body_limit_bytes"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    for registration in &config.parsers.content_types {
        let reason = match parse_media_type(&registration.content_type) {
            Ok(Some(_)) => continue,
            Ok(None) => "missing subtype".to_string(),
            Err(e) => e.to_string(),
        };
        errors.push(ValidationError::ContentType {
            content_type: registration.content_type.clone(),
            reason,
        });
    }

    // a scheme with a space could never be split out of the header
    for registration in &config.parsers.auth_schemes {
        if registration.scheme.is_empty() || registration.scheme.contains(' ') {
            errors.push(ValidationError::AuthScheme(registration.scheme.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
