//! One-shot request helpers.
//!
//! Each helper builds a default-configured facade, opens a session, issues
//! exactly one request, and closes the session again — error paths
//! included, since they run through [`HttpClient::scoped`]. For more than
//! one request, build an [`HttpClient`] and reuse its session instead.

use reqwest::{Method, Response};

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::request::RequestOptions;

async fn one_shot(
    method: Method,
    url: &str,
    options: RequestOptions,
) -> Result<Response, HttpError> {
    let client = HttpClient::new();
    client
        .scoped(move |session| async move { session.request(method, url, options).await })
        .await
}

/// One-shot GET. `url` must be absolute.
pub async fn get(url: &str, options: RequestOptions) -> Result<Response, HttpError> {
    one_shot(Method::GET, url, options).await
}

/// One-shot POST. `url` must be absolute.
pub async fn post(url: &str, options: RequestOptions) -> Result<Response, HttpError> {
    one_shot(Method::POST, url, options).await
}

/// One-shot PUT. `url` must be absolute.
pub async fn put(url: &str, options: RequestOptions) -> Result<Response, HttpError> {
    one_shot(Method::PUT, url, options).await
}

/// One-shot DELETE. `url` must be absolute.
pub async fn delete(url: &str, options: RequestOptions) -> Result<Response, HttpError> {
    one_shot(Method::DELETE, url, options).await
}
