//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "ORDERS_GATEWAY_";

const METADATA_PREFIX: &str = "METADATA_";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides from the process environment, then validate.
pub fn load(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, std::env::vars());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file, without consulting
/// the environment.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let config = parse_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply `ORDERS_GATEWAY_*` overrides on top of `config`.
///
/// `ORDERS_GATEWAY_METADATA_<KEY>` sets upstream metadata key `<key>`
/// (lowercased, `_` mapped to `-`).
pub fn apply_env_overrides<I>(config: &mut GatewayConfig, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (name, value) in vars {
        let Some(name) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };

        match name {
            "BIND_ADDRESS" => config.listener.bind_address = value,
            "UPSTREAM_ADDRESS" => config.upstream.address = value,
            "LOG_LEVEL" => config.observability.log_level = value,
            _ => {
                if let Some(key) = name.strip_prefix(METADATA_PREFIX) {
                    let key = key.to_ascii_lowercase().replace('_', "-");
                    config.upstream.metadata.insert(key, value);
                } else {
                    tracing::debug!(variable = %name, "Ignoring unknown override");
                }
            }
        }
    }
}
