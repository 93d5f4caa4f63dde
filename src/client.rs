//! The session facade — `HttpClient`.
//!
//! One method per HTTP verb plus generic `request()` dispatch. The facade
//! owns the lifecycle of the underlying engine client (`start()` /
//! `close()` / `scoped()`) and forwards every request to it; it never
//! inspects status codes and never retries.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_lock::RwLock;
use reqwest::{Method, Response};

use crate::connector::Connector;
use crate::error::HttpError;
use crate::request::{join_url, merge_headers, Body, RequestOptions};

/// Session lifecycle: unstarted → started → closed. Requests are only
/// served in the started state; close is idempotent from any state.
enum SessionState {
    Unstarted,
    Started(reqwest::Client),
    Closed,
}

/// Async HTTP session facade.
///
/// Holds immutable configuration (base URL, default headers, timeout,
/// connector, trust-env flag) and at most one live engine session. All
/// requests issued while the session is open share its connection pool.
///
/// ```rust,ignore
/// use http_session::prelude::*;
///
/// let client = HttpClient::builder()
///     .base_url("https://api.example.com")
///     .header("Accept", "application/json")
///     .build();
///
/// client
///     .scoped(|session| async move {
///         let resp = session.get("/users", RequestOptions::new()).await?;
///         println!("{}", resp.status());
///         Ok(())
///     })
///     .await?;
/// ```
pub struct HttpClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
    connector: Connector,
    trust_env: bool,
    session: Arc<RwLock<SessionState>>,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// A facade with all defaults: no base URL, no default headers,
    /// engine-default timeout and pool, proxies from the environment ignored.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Whether a session is currently open.
    pub async fn is_started(&self) -> bool {
        matches!(&*self.session.read().await, SessionState::Started(_))
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Create the engine session from the stored configuration.
    ///
    /// Errors with [`HttpError::AlreadyStarted`] when a session is live.
    /// A closed facade may be started again; requests issued between
    /// `close()` and the new `start()` fail with [`HttpError::NotStarted`].
    pub async fn start(&self) -> Result<(), HttpError> {
        let mut state = self.session.write().await;
        if matches!(&*state, SessionState::Started(_)) {
            return Err(HttpError::AlreadyStarted);
        }
        *state = SessionState::Started(self.build_engine()?);
        tracing::debug!(base_url = ?self.base_url, "session started");
        Ok(())
    }

    /// Release the session and its pooled connections.
    ///
    /// Idempotent: second and later calls are no-ops. In-flight requests
    /// hold their own handle to the pool and complete normally.
    pub async fn close(&self) {
        let mut state = self.session.write().await;
        if matches!(&*state, SessionState::Started(_)) {
            tracing::debug!("session closed");
        }
        *state = SessionState::Closed;
    }

    /// Run `body` with an open session, closing it on every exit path.
    ///
    /// Starts the session, hands the body a clone of this facade (clones
    /// share the session slot), and closes the session whether the body
    /// returns `Ok` or `Err`.
    pub async fn scoped<T, F, Fut>(&self, body: F) -> Result<T, HttpError>
    where
        F: FnOnce(HttpClient) -> Fut,
        Fut: Future<Output = Result<T, HttpError>>,
    {
        self.start().await?;
        let result = body(self.clone()).await;
        self.close().await;
        result
    }

    // ── Verb methods ─────────────────────────────────────────────────────

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::POST, path, options).await
    }

    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::PUT, path, options).await
    }

    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::PATCH, path, options).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::DELETE, path, options).await
    }

    pub async fn head(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::HEAD, path, options).await
    }

    pub async fn options(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::OPTIONS, path, options).await
    }

    // ── Generic dispatch ─────────────────────────────────────────────────

    /// Compose and dispatch one request through the open session.
    ///
    /// Resolves `path` against the base URL (prefix-join; absolute URLs
    /// pass through), merges per-call headers over defaults, forwards the
    /// composed request to the engine, and returns the engine's response
    /// unmodified — non-2xx statuses are the caller's to interpret.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, HttpError> {
        // Clone the engine handle under the read lock; the clone shares the
        // pool, so close() is never blocked by an in-flight request.
        let engine = match &*self.session.read().await {
            SessionState::Started(client) => client.clone(),
            _ => return Err(HttpError::NotStarted),
        };

        let url = join_url(self.base_url.as_deref(), path);
        let headers = merge_headers(&self.default_headers, &options.headers)?;

        let mut req = engine.request(method.clone(), &url).headers(headers);
        if !options.params.is_empty() {
            req = req.query(&options.params);
        }
        match options.body {
            Some(Body::Raw(bytes)) => req = req.body(bytes),
            Some(Body::Text(text)) => req = req.body(text),
            Some(Body::Json(value)) => req = req.json(&value),
            None => {}
        }
        if let Some(timeout) = options.timeout {
            req = req.timeout(timeout);
        }

        tracing::debug!(%method, %url, "dispatching request");
        Ok(req.send().await?)
    }

    /// Build the engine client from the stored configuration. Default
    /// headers are merged per request rather than set here, so that the
    /// merge is observable and per-call overrides win key-by-key.
    fn build_engine(&self) -> Result<reqwest::Client, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder = self.connector.apply(builder);
        if !self.trust_env {
            builder = builder.no_proxy();
        }
        Ok(builder.build()?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HttpClient {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            default_headers: self.default_headers.clone(),
            timeout: self.timeout,
            connector: self.connector.clone(),
            trust_env: self.trust_env,
            session: self.session.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

/// Builder for [`HttpClient`]. Construction opens no network resources.
#[derive(Default)]
pub struct HttpClientBuilder {
    base_url: Option<String>,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    connector: Connector,
    trust_env: bool,
}

impl HttpClientBuilder {
    /// Base URL requests are resolved against. Default: none, every call
    /// path must be an absolute URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Default timeout for every request. Default: engine-defined.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add one default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add default headers from an iterator of pairs.
    pub fn headers<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Transport configuration forwarded to the engine. Default: the
    /// engine's default pool.
    pub fn connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    /// Honor proxy-related environment variables. Default: false.
    pub fn trust_env(mut self, trust_env: bool) -> Self {
        self.trust_env = trust_env;
        self
    }

    pub fn build(self) -> HttpClient {
        HttpClient {
            base_url: self.base_url,
            default_headers: self.headers,
            timeout: self.timeout,
            connector: self.connector,
            trust_env: self.trust_env,
            session: Arc::new(RwLock::new(SessionState::Unstarted)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    fn local_client() -> HttpClient {
        HttpClient::builder()
            .base_url("http://127.0.0.1:9")
            .build()
    }

    #[tokio::test]
    async fn test_every_verb_fails_not_started() {
        let client = local_client();
        let opts = RequestOptions::new;

        assert!(matches!(
            client.get("/x", opts()).await,
            Err(HttpError::NotStarted)
        ));
        assert!(matches!(
            client.post("/x", opts()).await,
            Err(HttpError::NotStarted)
        ));
        assert!(matches!(
            client.put("/x", opts()).await,
            Err(HttpError::NotStarted)
        ));
        assert!(matches!(
            client.patch("/x", opts()).await,
            Err(HttpError::NotStarted)
        ));
        assert!(matches!(
            client.delete("/x", opts()).await,
            Err(HttpError::NotStarted)
        ));
        assert!(matches!(
            client.head("/x", opts()).await,
            Err(HttpError::NotStarted)
        ));
        assert!(matches!(
            client.options("/x", opts()).await,
            Err(HttpError::NotStarted)
        ));
    }

    #[tokio::test]
    async fn test_start_twice_is_an_error() {
        let client = local_client();
        assert_ok!(client.start().await);
        assert!(matches!(
            client.start().await,
            Err(HttpError::AlreadyStarted)
        ));
        client.close().await;
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let client = local_client();
        client.start().await.expect("start");
        client.close().await;
        client.close().await;
        client.close().await;
        assert!(!client.is_started().await);
    }

    #[tokio::test]
    async fn test_close_before_start_is_a_noop() {
        let client = local_client();
        client.close().await;
        assert!(matches!(
            client.get("/x", RequestOptions::new()).await,
            Err(HttpError::NotStarted)
        ));
    }

    #[tokio::test]
    async fn test_requests_after_close_fail_not_started() {
        let client = local_client();
        client.start().await.expect("start");
        client.close().await;
        assert!(matches!(
            client.get("/x", RequestOptions::new()).await,
            Err(HttpError::NotStarted)
        ));
    }

    #[tokio::test]
    async fn test_closed_facade_may_be_restarted() {
        let client = local_client();
        assert_ok!(client.start().await);
        client.close().await;
        assert_ok!(client.start().await, "restart after close");
        assert!(client.is_started().await);
        client.close().await;
    }

    #[tokio::test]
    async fn test_scoped_closes_on_success() {
        let client = local_client();
        let out = client
            .scoped(|session| async move {
                assert!(session.is_started().await);
                Ok(42)
            })
            .await
            .expect("scoped body");
        assert_eq!(out, 42);
        assert!(!client.is_started().await);
    }

    #[tokio::test]
    async fn test_scoped_closes_on_error() {
        let client = local_client();
        let out: Result<(), _> = client
            .scoped(|_session| async move {
                Err(HttpError::InvalidHeader("induced failure".to_string()))
            })
            .await;
        assert!(matches!(out, Err(HttpError::InvalidHeader(_))));
        assert!(!client.is_started().await);
        assert!(matches!(
            client.get("/x", RequestOptions::new()).await,
            Err(HttpError::NotStarted)
        ));
    }

    #[tokio::test]
    async fn test_clones_share_one_session() {
        let client = local_client();
        let clone = client.clone();
        client.start().await.expect("start");
        assert!(clone.is_started().await);
        clone.close().await;
        assert!(!client.is_started().await);
    }

    #[test]
    fn test_builder_stores_configuration() {
        let client = HttpClient::builder()
            .base_url("https://api.example.com/")
            .header("Accept", "application/json")
            .headers([("X-Tag", "t")])
            .timeout(Duration::from_secs(5))
            .trust_env(true)
            .build();
        assert_eq!(client.base_url(), Some("https://api.example.com/"));
        assert_eq!(
            client.default_headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(client.default_headers.len(), 2);
        assert_eq!(client.timeout, Some(Duration::from_secs(5)));
        assert!(client.trust_env);
    }
}
