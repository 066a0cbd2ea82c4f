//! Shared HTTP(S) client core for the chatwithme app.
//!
//! One connection pool for the whole process, built lazily on first use and
//! reused for every request. TLS server-identity verification is
//! deliberately disabled (see [`TrustPolicy`]) so the app can talk to a chat
//! server running on a self-signed certificate.
//!
//! The UI and chat layers hold a [`ClientProvider`] injected from the
//! composition root and ask it for the client whenever they need to issue a
//! request:
//!
//! ```no_run
//! # fn main() -> chatwithme_http::Result<()> {
//! let provider = chatwithme_http::ClientProvider::new();
//! let client = provider.get()?;
//! let request = client.get("https://chat.internal/api/messages").build()?;
//! // client.execute(request).await? from async code
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod gating;
pub mod provider;
pub mod trust;

pub use client::SharedClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use gating::{RequestGate, RequestPermit};
pub use provider::ClientProvider;
pub use trust::TrustPolicy;
