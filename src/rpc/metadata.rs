//! Static call metadata injected into every outbound RPC.

use std::collections::BTreeMap;

use thiserror::Error;
use tonic::metadata::{AsciiMetadataKey, AsciiMetadataValue, MetadataMap};
use tonic::service::Interceptor;
use tonic::{Request, Status};

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("invalid metadata key '{0}'")]
    Key(String),

    #[error("invalid metadata value for '{0}'")]
    Value(String),
}

/// Attaches a fixed set of key/value pairs to each request.
///
/// Entries are parsed once at construction.
#[derive(Debug, Clone, Default)]
pub struct MetadataInterceptor {
    entries: Vec<(AsciiMetadataKey, AsciiMetadataValue)>,
}

impl MetadataInterceptor {
    pub fn new(metadata: &BTreeMap<String, String>) -> Result<Self, MetadataError> {
        let entries = metadata
            .iter()
            .map(|(key, value)| {
                let parsed_key = AsciiMetadataKey::from_bytes(key.as_bytes())
                    .map_err(|_| MetadataError::Key(key.clone()))?;
                let parsed_value = AsciiMetadataValue::try_from(value.as_str())
                    .map_err(|_| MetadataError::Value(key.clone()))?;
                Ok((parsed_key, parsed_value))
            })
            .collect::<Result<Vec<_>, MetadataError>>()?;

        Ok(Self { entries })
    }

    /// Keys attached to every call, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    fn apply(&self, metadata: &mut MetadataMap) {
        for (key, value) in &self.entries {
            metadata.insert(key.clone(), value.clone());
        }
    }
}

impl Interceptor for MetadataInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        self.apply(request.metadata_mut());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("token".to_string(), "storer-token".to_string());
        map.insert("clientuuid".to_string(), "fdfd4978".to_string());
        map
    }

    #[test]
    fn test_attaches_every_entry() {
        let mut interceptor = MetadataInterceptor::new(&credentials()).unwrap();
        let request = interceptor.call(Request::new(())).unwrap();

        let metadata = request.metadata();
        assert_eq!(metadata.get("token").unwrap(), "storer-token");
        assert_eq!(metadata.get("clientuuid").unwrap(), "fdfd4978");
    }

    #[test]
    fn test_overrides_caller_supplied_value() {
        let mut interceptor = MetadataInterceptor::new(&credentials()).unwrap();
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert("token", AsciiMetadataValue::from_static("forged"));

        let request = interceptor.call(request).unwrap();
        let tokens: Vec<_> = request.metadata().get_all("token").iter().collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], "storer-token");
    }

    #[test]
    fn test_rejects_binary_key() {
        let mut map = credentials();
        map.insert("blob-bin".to_string(), "x".to_string());
        assert!(matches!(
            MetadataInterceptor::new(&map),
            Err(MetadataError::Key(key)) if key == "blob-bin"
        ));
    }
}
