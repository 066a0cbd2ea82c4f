/// Crate-wide result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed errors for client construction and request dispatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The TLS context could not be initialized from the crypto provider.
    ///
    /// Nothing is memoized after this; the next [`ClientProvider::get`]
    /// attempts construction again.
    ///
    /// [`ClientProvider::get`]: crate::ClientProvider::get
    #[error("TLS setup failed: {source}")]
    TlsSetup {
        #[source]
        source: rustls::Error,
    },

    /// The transport builder rejected the client configuration.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    /// The request gate was torn down while a caller was waiting on it.
    /// Cannot happen while the owning client is alive.
    #[error("request gate closed")]
    GateClosed,

    /// A request issued through the shared client failed in the transport.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<rustls::Error> for Error {
    fn from(source: rustls::Error) -> Self {
        Self::TlsSetup { source }
    }
}
