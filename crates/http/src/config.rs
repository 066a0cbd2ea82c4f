//! Timeouts and concurrency limits for the shared client.

use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REQUESTS: usize = 200;
const MAX_REQUESTS_PER_HOST: usize = 200;

/// Configuration the shared client is built from.
///
/// Fixed for the life of the client; `Default` carries the process-wide
/// values every deployment uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    connect_timeout: Duration,
    write_timeout: Duration,
    read_timeout: Duration,
    max_requests: usize,
    max_requests_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
            read_timeout: READ_TIMEOUT,
            max_requests: MAX_REQUESTS,
            max_requests_per_host: MAX_REQUESTS_PER_HOST,
        }
    }
}

impl ClientConfig {
    /// Budget for establishing a TCP connection plus the TLS handshake.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Budget for writing a request body.
    ///
    /// hyper exposes no discrete per-write deadline, so this value does not
    /// reach the transport; it stays observable here for callers that stream
    /// bodies and want to enforce it per request.
    #[must_use]
    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    /// Idle budget between reads of the response.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Maximum concurrent in-flight requests process-wide.
    #[must_use]
    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Maximum concurrent in-flight requests to any single host.
    #[must_use]
    pub fn max_requests_per_host(&self) -> usize {
        self.max_requests_per_host
    }
}
