//! # http-session
//!
//! A thin async HTTP session facade over [`reqwest`].
//!
//! ## Architecture
//!
//! The crate is a single layer of configuration plumbing around the engine:
//!
//! 1. **Request** — per-call options: query params, body, header overrides, timeout
//! 2. **Connector** — transport knobs forwarded verbatim to the engine builder
//! 3. **Facade** — `HttpClient` with per-verb methods and the session lifecycle
//! 4. **Quick helpers** — one-shot `get`/`post`/`put`/`delete` free functions
//!
//! Connection pooling, DNS caching, TLS, and timeout enforcement all live in
//! the engine; the facade adds a session lifecycle, base-URL joining, and
//! default-header merging, nothing more. Responses come back as the engine's
//! native [`reqwest::Response`] — the facade never raises on non-2xx status.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use http_session::prelude::*;
//!
//! let client = HttpClient::builder()
//!     .base_url("https://api.example.com")
//!     .header("Accept", "application/json")
//!     .timeout(std::time::Duration::from_secs(30))
//!     .build();
//!
//! client.start().await?;
//! let resp = client.get("/users", RequestOptions::new().param("page", "2")).await?;
//! let users: serde_json::Value = resp.json().await?;
//! client.close().await;
//! ```
//!
//! Or scoped, guaranteeing release on every exit path:
//!
//! ```rust,ignore
//! let body = client
//!     .scoped(|session| async move {
//!         let resp = session.get("/users", RequestOptions::new()).await?;
//!         Ok(resp.text().await?)
//!     })
//!     .await?;
//! ```

/// Facade error types.
pub mod error;

/// Transport configuration handle.
pub mod connector;

/// Per-call request options.
pub mod request;

/// The session facade — `HttpClient`.
pub mod client;

/// One-shot request helpers.
pub mod quick;

pub use client::{HttpClient, HttpClientBuilder};
pub use connector::Connector;
pub use error::HttpError;
pub use request::{Body, RequestOptions};

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::client::{HttpClient, HttpClientBuilder};
    pub use crate::connector::Connector;
    pub use crate::error::HttpError;
    pub use crate::quick;
    pub use crate::request::{Body, RequestOptions};
}
