//! In-flight request limits for the shared client.
//!
//! The transport's idle pool reuses connections on its own; what it does not
//! do is bound concurrency. [`RequestGate`] adds that bound: at most
//! `max_requests` requests in flight process-wide and at most
//! `max_requests_per_host` to any single host. A permit is taken before a
//! request is sent and released when the permit drops.

use std::sync::Arc;

use {
    dashmap::DashMap,
    tokio::sync::{OwnedSemaphorePermit, Semaphore},
};

use crate::error::{Error, Result};

/// Concurrency gate for requests issued through the shared client.
///
/// Per-host budgets are created on first use, keyed by lowercased host name.
#[derive(Debug)]
pub struct RequestGate {
    total: Arc<Semaphore>,
    hosts: DashMap<String, Arc<Semaphore>>,
    max_per_host: usize,
}

impl RequestGate {
    #[must_use]
    pub fn new(max_requests: usize, max_requests_per_host: usize) -> Self {
        Self {
            total: Arc::new(Semaphore::new(max_requests)),
            hosts: DashMap::new(),
            max_per_host: max_requests_per_host,
        }
    }

    /// Wait until a request may be sent to `host`.
    ///
    /// The host permit is taken before the total permit so a caller queued
    /// on one saturated host does not sit on process-wide capacity while it
    /// waits. Requests without a host component take only the total permit.
    pub async fn acquire(&self, host: Option<&str>) -> Result<RequestPermit> {
        let host_permit = match host {
            Some(host) => Some(
                self.host_semaphore(host)
                    .acquire_owned()
                    .await
                    .map_err(|_| Error::GateClosed)?,
            ),
            None => None,
        };
        let total_permit = self
            .total
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| Error::GateClosed)?;
        Ok(RequestPermit {
            _total: total_permit,
            _host: host_permit,
        })
    }

    /// Permits currently available process-wide.
    #[must_use]
    pub fn available(&self) -> usize {
        self.total.available_permits()
    }

    /// Permits currently available for `host`, if any request has targeted
    /// it yet.
    #[must_use]
    pub fn available_for_host(&self, host: &str) -> Option<usize> {
        self.hosts
            .get(&normalize(host))
            .map(|sem| sem.available_permits())
    }

    fn host_semaphore(&self, host: &str) -> Arc<Semaphore> {
        self.hosts
            .entry(normalize(host))
            .or_insert_with(|| Arc::new(Semaphore::new(self.max_per_host)))
            .clone()
    }
}

/// Holds a request's slot in both the total and per-host budgets until drop.
#[derive(Debug)]
pub struct RequestPermit {
    _total: OwnedSemaphorePermit,
    _host: Option<OwnedSemaphorePermit>,
}

fn normalize(host: &str) -> String {
    host.to_ascii_lowercase()
}

// ── Tests ───────────────────────────────────────────────────────────────────
