use crate::core::errors::ExchangeError;
use crate::core::kernel::envelope;
use crate::core::kernel::nonce::{ClockNonce, NonceSource};
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, trace};

/// Status and fully-read body of an HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// HTTP transport collaborator
///
/// Implementations must read the whole body even for non-200 responses so
/// the underlying connection can be reused.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, ExchangeError>;

    async fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: Vec<u8>,
    ) -> Result<RawResponse, ExchangeError>;
}

/// `Transport` over a reqwest connection pool
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, ExchangeError> {
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            ExchangeError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ExchangeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("Request failed: {}", e)))?;

        Self::read(response).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: Vec<u8>,
    ) -> Result<RawResponse, ExchangeError> {
        let mut request = self.client.post(url);
        for (key, value) in headers {
            request = request.header(*key, value);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("Request failed: {}", e)))?;

        Self::read(response).await
    }
}

/// REST client trait for the exchange's two calling conventions
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Unauthenticated GET of `path` below the API prefix
    async fn call_public(&self, path: &str) -> Result<Value, ExchangeError>;

    /// Signed, form-encoded POST of `params` to `path` below the API prefix
    ///
    /// Callers must not pass `key`, `signature` or `nonce`; those are injected.
    async fn call_private(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Scheme and host, e.g. `https://www.bitstamp.net`
    pub base_url: String,
    /// Fixed path prefix every endpoint is appended to
    pub api_prefix: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            api_prefix: "/api/v2/".to_string(),
            exchange_name,
            timeout_seconds: 30,
            user_agent: "stampx/0.1".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_api_prefix(mut self, api_prefix: String) -> Self {
        self.api_prefix = api_prefix;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    nonce: Arc<dyn NonceSource>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
            nonce: Arc::new(ClockNonce),
        }
    }

    /// Set the signer for private requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Replace the wall-clock nonce source
    pub fn with_nonce_source(mut self, nonce: Arc<dyn NonceSource>) -> Self {
        self.nonce = nonce;
        self
    }

    /// Build a client on top of reqwest
    pub fn build(self) -> Result<ExchangeRest<ReqwestTransport>, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()?;

        Ok(self.build_with_transport(ReqwestTransport::new(client)))
    }

    /// Build a client on top of a caller-supplied transport
    pub fn build_with_transport<T: Transport>(self, transport: T) -> ExchangeRest<T> {
        ExchangeRest {
            transport,
            config: self.config,
            signer: self.signer,
            nonce: self.nonce,
        }
    }
}

/// `RestClient` implementation over any `Transport`
#[derive(Clone)]
pub struct ExchangeRest<T = ReqwestTransport> {
    transport: T,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    nonce: Arc<dyn NonceSource>,
}

impl<T> std::fmt::Debug for ExchangeRest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> ExchangeRest<T> {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    pub fn can_sign(&self) -> bool {
        self.signer.is_some()
    }

    /// Build the full URL for an endpoint path
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_prefix,
            path.trim_start_matches('/')
        )
    }
}

/// Form-encode caller params followed by the auth fields
pub fn encode_form(params: &[(&str, String)], auth: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
        .extend_pairs(auth.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

#[async_trait]
impl<T: Transport> RestClient for ExchangeRest<T> {
    #[instrument(skip(self), fields(exchange = %self.config.exchange_name))]
    async fn call_public(&self, path: &str) -> Result<Value, ExchangeError> {
        let url = self.build_url(path);
        let response = self.transport.get(&url).await?;
        trace!(status = response.status, bytes = response.body.len(), "public response");

        envelope::parse(&response.body, response.status)
    }

    #[instrument(skip(self, params), fields(exchange = %self.config.exchange_name, param_count = params.len()))]
    async fn call_private(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ExchangeError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            ExchangeError::AuthError(
                "Authentication required but no credentials configured".to_string(),
            )
        })?;

        let nonce = self.nonce.next_nonce();
        let auth = signer.sign_request(nonce)?;
        let body = encode_form(params, &auth);

        let headers = [
            (
                "Content-Type",
                "application/x-www-form-urlencoded".to_string(),
            ),
            ("Content-Length", body.len().to_string()),
            ("Accept", "application/json".to_string()),
        ];

        let url = self.build_url(path);
        let response = self.transport.post(&url, &headers, body.into_bytes()).await?;
        trace!(status = response.status, bytes = response.body.len(), "private response");

        envelope::parse(&response.body, response.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_prefix() {
        let rest = RestClientBuilder::new(RestClientConfig::new(
            "https://www.bitstamp.net/".to_string(),
            "bitstamp".to_string(),
        ))
        .build()
        .unwrap();
        assert_eq!(
            rest.build_url("ticker/btcusd/"),
            "https://www.bitstamp.net/api/v2/ticker/btcusd/"
        );
        assert_eq!(
            rest.build_url("/balance/"),
            "https://www.bitstamp.net/api/v2/balance/"
        );
    }

    #[test]
    fn test_encode_form_orders_params_before_auth() {
        let body = encode_form(
            &[("amount", "0.5".to_string()), ("price", "100".to_string())],
            &[
                ("key".to_string(), "k".to_string()),
                ("signature".to_string(), "AB".to_string()),
                ("nonce".to_string(), "1".to_string()),
            ],
        );
        assert_eq!(body, "amount=0.5&price=100&key=k&signature=AB&nonce=1");
    }

    #[test]
    fn test_encode_form_escapes_values() {
        let body = encode_form(&[("note", "a b&c".to_string())], &[]);
        assert_eq!(body, "note=a+b%26c");
    }
}
