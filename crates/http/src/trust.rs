//! Trust-all TLS verification for outbound connections.
//!
//! The chat server ships a self-signed certificate, so the client disables
//! server-identity verification entirely: every certificate chain and every
//! hostname is accepted. This removes the authentication guarantee TLS
//! normally provides; anything that can intercept the connection can
//! impersonate the server. Keep that in mind before pointing this client at
//! an endpoint that matters.
//!
//! Handshake signatures are still checked with the crypto provider's real
//! algorithms, so the negotiated session keys are sound even though the
//! peer's identity is not.

use std::sync::Arc;

use rustls::{
    DigitallySignedStruct, SignatureScheme,
    client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
    crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature},
    pki_types::{CertificateDer, ServerName, UnixTime},
};

use crate::error::Result;

/// Certificate and hostname checks for outbound TLS connections.
///
/// Both checks accept unconditionally; see the module docs. Installed into
/// the rustls client configuration by [`tls_config`].
#[derive(Debug)]
pub struct TrustPolicy {
    provider: Arc<CryptoProvider>,
}

impl TrustPolicy {
    #[must_use]
    pub fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }

    /// Certificate-chain check. Accepts any chain: expired, self-signed,
    /// wrong issuer, or bytes that do not parse as a certificate at all.
    #[must_use]
    pub fn chain_is_trusted(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
    ) -> bool {
        true
    }

    /// Hostname check. Accepts any server name regardless of the
    /// certificate's subject or SAN entries.
    #[must_use]
    pub fn hostname_is_allowed(&self, _server_name: &ServerName<'_>) -> bool {
        true
    }
}

impl ServerCertVerifier for TrustPolicy {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        if self.chain_is_trusted(end_entity, intermediates)
            && self.hostname_is_allowed(server_name)
        {
            Ok(ServerCertVerified::assertion())
        } else {
            Err(rustls::Error::General("server certificate rejected".into()))
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Build the rustls client configuration with [`TrustPolicy`] installed.
///
/// Fails when the crypto provider cannot back the default protocol versions
/// (for example a provider with no usable cipher suites).
pub fn tls_config(provider: &Arc<CryptoProvider>) -> Result<rustls::ClientConfig> {
    let verifier = Arc::new(TrustPolicy::new(provider.clone()));
    let config = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(verifier)
        .with_no_client_auth();
    Ok(config)
}

// ── Tests ───────────────────────────────────────────────────────────────────
