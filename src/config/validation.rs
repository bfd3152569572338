//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check that outbound metadata is representable on the wire
//! - Refuse plaintext upstreams that leave the host
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tonic::metadata::{AsciiMetadataKey, AsciiMetadataValue};

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream.address '{0}' must be host:port")]
    InvalidUpstreamAddress(String),

    #[error("upstream.tls = false is only allowed for loopback hosts, got '{0}'")]
    PlaintextUpstream(String),

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("upstream.metadata key '{0}' is not a valid ASCII metadata key")]
    InvalidMetadataKey(String),

    #[error("upstream.metadata value for '{0}' is not visible ASCII")]
    InvalidMetadataValue(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let upstream = &config.upstream;
    if !is_host_port(&upstream.address) {
        errors.push(ValidationError::InvalidUpstreamAddress(upstream.address.clone()));
    } else if !upstream.tls && !is_loopback(upstream.host()) {
        errors.push(ValidationError::PlaintextUpstream(upstream.address.clone()));
    }

    if upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "upstream.connect_timeout_secs",
        });
    }
    if upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "upstream.request_timeout_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        });
    }

    for (key, value) in &upstream.metadata {
        if key.is_empty()
            || key.bytes().any(|b| b.is_ascii_uppercase())
            || AsciiMetadataKey::from_bytes(key.as_bytes()).is_err()
        {
            errors.push(ValidationError::InvalidMetadataKey(key.clone()));
        } else if AsciiMetadataValue::try_from(value.as_str()).is_err() {
            errors.push(ValidationError::InvalidMetadataValue(key.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

fn is_loopback(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost")
        || host.parse::<IpAddr>().map(|ip| ip.is_loopback()).unwrap_or(false)
}
