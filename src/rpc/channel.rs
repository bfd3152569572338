//! Upstream connection establishment.

use std::time::Duration;

use thiserror::Error;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use crate::config::UpstreamConfig;

/// Failure to reach the upstream RPC endpoint.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid upstream endpoint '{address}': {source}")]
    Endpoint {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("failed to connect to upstream '{address}': {source}")]
    Connect {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// Build the endpoint description for `config` without dialing it.
pub fn endpoint(config: &UpstreamConfig) -> Result<Endpoint, ConnectError> {
    let scheme = if config.tls { "https" } else { "http" };
    let uri = format!("{}://{}", scheme, config.address);
    let invalid = |source| ConnectError::Endpoint {
        address: config.address.clone(),
        source,
    };

    let endpoint = Endpoint::from_shared(uri)
        .map_err(invalid)?
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs));

    if !config.tls {
        return Ok(endpoint);
    }

    let domain = config
        .domain_name
        .clone()
        .unwrap_or_else(|| config.host().to_string());
    let tls = ClientTlsConfig::new()
        .domain_name(domain)
        .with_webpki_roots();

    endpoint.tls_config(tls).map_err(invalid)
}

/// Open the single long-lived channel shared by every stub.
///
/// With `lazy_connect` the handshake happens on first use; otherwise an
/// unreachable upstream is reported here.
pub async fn connect(config: &UpstreamConfig) -> Result<Channel, ConnectError> {
    let endpoint = endpoint(config)?;

    if config.lazy_connect {
        tracing::info!(address = %config.address, tls = config.tls, "Upstream channel created lazily");
        return Ok(endpoint.connect_lazy());
    }

    let channel = endpoint
        .connect()
        .await
        .map_err(|source| ConnectError::Connect {
            address: config.address.clone(),
            source,
        })?;

    tracing::info!(address = %config.address, tls = config.tls, "Connected to upstream");
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tls_endpoint_uses_https() {
        let config = UpstreamConfig::default();
        let endpoint = endpoint(&config).unwrap();
        assert_eq!(endpoint.uri().scheme_str(), Some("https"));
        assert_eq!(endpoint.uri().host(), Some("stage.nekom.com"));
    }

    #[test]
    fn test_plaintext_endpoint() {
        let config = UpstreamConfig {
            address: "127.0.0.1:50051".to_string(),
            tls: false,
            ..Default::default()
        };
        let endpoint = endpoint(&config).unwrap();
        assert_eq!(endpoint.uri().scheme_str(), Some("http"));
        assert_eq!(endpoint.uri().port_u16(), Some(50051));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_fatal() {
        let config = UpstreamConfig {
            // Port 1 on loopback is never served in test environments.
            address: "127.0.0.1:1".to_string(),
            tls: false,
            connect_timeout_secs: 1,
            ..Default::default()
        };
        let err = connect(&config).await.unwrap_err();
        assert!(matches!(err, ConnectError::Connect { .. }));
    }
}
