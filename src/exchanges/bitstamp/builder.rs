use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    ExchangeRest, NonceSource, ReqwestTransport, RestClientBuilder, RestClientConfig, Transport,
};
use crate::exchanges::bitstamp::{connector::BitstampConnector, signer::BitstampSigner};
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://www.bitstamp.net";

/// Builder for creating Bitstamp connectors
///
/// Credentials are optional: without them public market data still works and
/// every private call fails with a credential error before any I/O.
pub struct BitstampBuilder {
    config: ExchangeConfig,
    rest_timeout: u64,
    nonce_source: Option<Arc<dyn NonceSource>>,
}

impl Default for BitstampBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BitstampBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            rest_timeout: 30,
            nonce_source: None,
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials
    pub fn with_credentials(
        mut self,
        api_key: String,
        secret_key: String,
        customer_id: String,
    ) -> Self {
        let base_url = self.config.base_url.take();
        self.config = ExchangeConfig::new(api_key, secret_key, customer_id);
        self.config.base_url = base_url;
        self
    }

    /// Set base URL for REST API
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Set REST client timeout in seconds
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = timeout;
        self
    }

    /// Replace the wall-clock nonce source
    pub fn with_nonce_source(mut self, nonce_source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = Some(nonce_source);
        self
    }

    fn rest_builder(self) -> RestClientBuilder {
        let base_url = self
            .config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let rest_config =
            RestClientConfig::new(base_url, "bitstamp".to_string()).with_timeout(self.rest_timeout);

        let mut rest_builder = RestClientBuilder::new(rest_config);

        if self.config.has_credentials() {
            let signer = Arc::new(BitstampSigner::new(self.config.credentials.clone()));
            rest_builder = rest_builder.with_signer(signer);
        }

        if let Some(nonce_source) = self.nonce_source {
            rest_builder = rest_builder.with_nonce_source(nonce_source);
        }

        rest_builder
    }

    /// Build a connector on top of reqwest
    pub fn build(self) -> Result<BitstampConnector<ExchangeRest<ReqwestTransport>>, ExchangeError> {
        let rest = self.rest_builder().build()?;
        Ok(BitstampConnector::new(rest))
    }

    /// Build a connector on top of a caller-supplied transport
    pub fn build_with_transport<T: Transport + Clone>(
        self,
        transport: T,
    ) -> BitstampConnector<ExchangeRest<T>> {
        let rest = self.rest_builder().build_with_transport(transport);
        BitstampConnector::new(rest)
    }
}

/// Build a Bitstamp connector from a configuration
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<BitstampConnector<ExchangeRest<ReqwestTransport>>, ExchangeError> {
    BitstampBuilder::new().with_config(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_credentials() {
        let result = build_connector(ExchangeConfig::read_only());
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_with_credentials() {
        let builder = BitstampBuilder::new()
            .with_base_url("http://localhost:8080".to_string())
            .with_credentials(
                "test_key".to_string(),
                "test_secret".to_string(),
                "987654".to_string(),
            )
            .with_rest_timeout(10);

        assert_eq!(
            builder.config.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert!(builder.config.has_credentials());
        assert!(builder.build().is_ok());
    }
}
