//! Facade error types.
//!
//! The facade introduces exactly two conditions of its own (`NotStarted`,
//! `AlreadyStarted`); everything else is the engine's error, classified by
//! kind where `reqwest` lets us tell and propagated unmodified otherwise.

use thiserror::Error;

/// Errors surfaced by the session facade.
#[derive(Error, Debug)]
pub enum HttpError {
    /// A request was issued before `start()` or after `close()`.
    #[error("session not started (call start() or use scoped())")]
    NotStarted,

    /// `start()` was called while a session is already live.
    #[error("session already started")]
    AlreadyStarted,

    /// The configured or per-call deadline expired before response headers
    /// arrived.
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Connection-level failure: DNS, refused, reset.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The peer sent a response the engine could not decode.
    #[error("protocol error: {0}")]
    Protocol(#[source] reqwest::Error),

    /// A header name or value the engine's header types reject.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Any other engine error, propagated unmodified.
    #[error("request failed: {0}")]
    Engine(#[source] reqwest::Error),
}

impl From<reqwest::Error> for HttpError {
    /// Classify an engine error into the facade's taxonomy.
    ///
    /// Order matters: reqwest reports a deadline expiry as both a timeout and
    /// (sometimes) a connect error, and the timeout kind is the one callers
    /// branch on.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout(err)
        } else if err.is_connect() {
            HttpError::Transport(err)
        } else if err.is_decode() {
            HttpError::Protocol(err)
        } else {
            HttpError::Engine(err)
        }
    }
}

impl HttpError {
    /// True when the error is the facade's own lifecycle misuse rather than
    /// anything that touched the network.
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, HttpError::NotStarted | HttpError::AlreadyStarted)
    }

    /// True when the underlying cause was a deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Timeout(_))
    }
}
