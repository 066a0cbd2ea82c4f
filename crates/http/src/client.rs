//! The shared client: one connection pool for every request the app sends.

use std::sync::Arc;

use {
    reqwest::{IntoUrl, Method, Request, RequestBuilder, Response},
    rustls::crypto::CryptoProvider,
    tracing::debug,
};

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    gating::RequestGate,
    trust,
};

/// The process-wide HTTP(S) client.
///
/// Owns the pooled transport, the configuration it was built from, and the
/// request gate. Obtained from [`ClientProvider::get`] as an `Arc` and never
/// rebuilt for the life of the process; pooled connections amortize the
/// TCP/TLS handshake across requests to the same host.
///
/// [`ClientProvider::get`]: crate::ClientProvider::get
#[derive(Debug)]
pub struct SharedClient {
    http: reqwest::Client,
    config: ClientConfig,
    gate: RequestGate,
}

impl SharedClient {
    /// Assemble the TLS context, transport pool, and request gate.
    ///
    /// Purely local setup: no connection is opened here. Connections are
    /// established lazily per request and parked in the pool afterwards.
    pub(crate) fn build(config: ClientConfig, provider: &Arc<CryptoProvider>) -> Result<Self> {
        let tls = trust::tls_config(provider)?;
        // hyper exposes no discrete per-write deadline, so only the connect
        // and read budgets reach the transport; the write budget stays
        // observable through `ClientConfig::write_timeout`.
        let http = reqwest::Client::builder()
            .use_preconfigured_tls(tls)
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .build()
            .map_err(|source| Error::ClientBuild { source })?;
        let gate = RequestGate::new(config.max_requests(), config.max_requests_per_host());
        debug!(
            connect_timeout_s = config.connect_timeout().as_secs(),
            read_timeout_s = config.read_timeout().as_secs(),
            max_requests = config.max_requests(),
            max_requests_per_host = config.max_requests_per_host(),
            "built shared HTTP client"
        );
        Ok(Self { http, config, gate })
    }

    /// Start a request on the shared pool.
    ///
    /// The returned builder's own `send` bypasses the gate; pass the built
    /// request to [`execute`](Self::execute) for the gated path.
    pub fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Shorthand for [`request`](Self::request) with `GET`.
    pub fn get(&self, url: impl IntoUrl) -> RequestBuilder {
        self.http.get(url)
    }

    /// Shorthand for [`request`](Self::request) with `POST`.
    pub fn post(&self, url: impl IntoUrl) -> RequestBuilder {
        self.http.post(url)
    }

    /// Send a request through the gate and the shared pool.
    ///
    /// Waits for a permit covering the request's host, then performs the
    /// exchange. The permit is released once the response headers arrive;
    /// body streaming is not gated.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let host = request.url().host_str().map(str::to_owned);
        let _permit = self.gate.acquire(host.as_deref()).await?;
        let response = self.http.execute(request).await?;
        Ok(response)
    }

    /// Configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The in-flight request gate.
    #[must_use]
    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn ring() -> Arc<CryptoProvider> {
        Arc::new(rustls::crypto::ring::default_provider())
    }

    #[test]
    fn build_applies_config() {
        let client = SharedClient::build(ClientConfig::default(), &ring()).unwrap();
        assert_eq!(client.config().connect_timeout(), Duration::from_secs(15));
        assert_eq!(client.config().write_timeout(), Duration::from_secs(10));
        assert_eq!(client.config().read_timeout(), Duration::from_secs(10));
        assert_eq!(client.config().max_requests(), 200);
        assert_eq!(client.config().max_requests_per_host(), 200);
        assert_eq!(client.gate().available(), 200);
    }

    #[test]
    fn build_fails_on_unusable_crypto_provider() {
        let broken = Arc::new(CryptoProvider {
            cipher_suites: Vec::new(),
            ..rustls::crypto::ring::default_provider()
        });
        let result = SharedClient::build(ClientConfig::default(), &broken);
        assert!(matches!(result, Err(Error::TlsSetup { .. })));
    }
}
