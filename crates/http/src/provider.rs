//! Lazy, at-most-once construction of the shared client.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use {once_cell::sync::OnceCell, rustls::crypto::CryptoProvider, tracing::debug};

use crate::{client::SharedClient, config::ClientConfig, error::Result};

/// Hands out the process-wide [`SharedClient`], building it on first use.
///
/// Owned by the application's composition root and passed to whatever needs
/// to issue requests; there is no hidden global. The first [`get`](Self::get)
/// builds the client, every later call returns the same instance, and a
/// failed build memoizes nothing so the next call tries again.
#[derive(Debug)]
pub struct ClientProvider {
    config: ClientConfig,
    crypto: Arc<CryptoProvider>,
    slot: OnceCell<Arc<SharedClient>>,
    builds: AtomicUsize,
}

impl ClientProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_crypto_provider(config, Arc::new(rustls::crypto::ring::default_provider()))
    }

    /// Use a specific rustls crypto provider instead of `ring`.
    #[must_use]
    pub fn with_crypto_provider(config: ClientConfig, crypto: Arc<CryptoProvider>) -> Self {
        Self {
            config,
            crypto,
            slot: OnceCell::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// The shared client, built on first call.
    ///
    /// Concurrent first-time callers race on the cell: one runs the build,
    /// the rest block until the winner stores the result, and every caller
    /// observes the same fully-built instance. Once initialized the call is
    /// a lock-free read.
    pub fn get(&self) -> Result<Arc<SharedClient>> {
        self.slot
            .get_or_try_init(|| {
                let attempt = self.builds.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(attempt, "building shared HTTP client");
                SharedClient::build(self.config.clone(), &self.crypto).map(Arc::new)
            })
            .cloned()
    }

    /// Build attempts so far, successful or not.
    #[cfg(test)]
    pub(crate) fn build_attempts(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

impl Default for ClientProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::error::Error;

    fn broken_provider() -> Arc<CryptoProvider> {
        Arc::new(CryptoProvider {
            cipher_suites: Vec::new(),
            ..rustls::crypto::ring::default_provider()
        })
    }

    #[test]
    fn repeated_gets_return_the_same_instance() {
        let provider = ClientProvider::new();
        let a = provider.get().unwrap();
        let b = provider.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(provider.build_attempts(), 1);
    }

    #[test]
    fn concurrent_first_callers_build_once() {
        let provider = Arc::new(ClientProvider::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let provider = provider.clone();
            handles.push(thread::spawn(move || provider.get().unwrap()));
        }
        let clients: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for pair in clients.windows(2) {
            assert!(Arc::ptr_eq(&pair[0], &pair[1]));
        }
        assert_eq!(provider.build_attempts(), 1);
    }

    #[test]
    fn failed_build_is_not_memoized() {
        let provider =
            ClientProvider::with_crypto_provider(ClientConfig::default(), broken_provider());
        assert!(provider.get().is_err());
        assert!(provider.get().is_err());
        // Both calls reached the builder; nothing broken was cached.
        assert_eq!(provider.build_attempts(), 2);
    }

    #[test]
    fn failure_surfaces_as_tls_setup() {
        let provider =
            ClientProvider::with_crypto_provider(ClientConfig::default(), broken_provider());
        let err = provider.get().unwrap_err();
        assert!(matches!(err, Error::TlsSetup { .. }));
    }
}
