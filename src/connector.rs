//! Transport configuration handle.
//!
//! The facade never manages connections itself; a [`Connector`] is a bag of
//! knobs forwarded verbatim to the engine's client builder. Unset fields
//! keep the engine defaults.

use std::time::Duration;

/// Opaque transport configuration: pool sizing and connect deadline.
///
/// DNS caching stays inside the engine — reqwest exposes no TTL knob, and
/// the facade adds none.
#[derive(Debug, Clone, Default)]
pub struct Connector {
    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: Option<usize>,
    /// How long an idle pooled connection is kept before eviction.
    pub pool_idle_timeout: Option<Duration>,
    /// Deadline for establishing a new connection (TCP + TLS).
    pub connect_timeout: Option<Duration>,
}

impl Connector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Apply the configured knobs to an engine builder.
    pub(crate) fn apply(&self, mut builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        if let Some(max) = self.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max);
        }
        if let Some(idle) = self.pool_idle_timeout {
            builder = builder.pool_idle_timeout(idle);
        }
        if let Some(connect) = self.connect_timeout {
            builder = builder.connect_timeout(connect);
        }
        builder
    }
}
