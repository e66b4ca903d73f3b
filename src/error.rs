//! Crate-wide error type and transient/permanent classification.

use crate::registry::ResourceKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the access layer.
///
/// The crate never logs on behalf of its callers: errors are returned and
/// the caller decides on user-facing messaging.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: connect, TLS, timeout, body read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status other than 404.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Upstream definitively reported the resource absent.
    #[error("{url} returned 404 Not Found")]
    NotFound { url: String },

    /// The response body was not the JSON we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A retried operation ran out of backoff budget.
    #[error("gave up after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    /// The registry was asked for a kind it holds no accessor for.
    #[error("no accessor registered for resource kind `{0}`")]
    UnsupportedKind(ResourceKind),

    /// Two capabilities claimed the same kind at registry construction.
    #[error("duplicate accessor for resource kind `{0}`")]
    DuplicateAccessor(ResourceKind),

    #[error("cannot suggest spellings with an empty dictionary")]
    EmptyDictionary,

    #[error("invalid URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl Error {
    /// Whether a retry could plausibly succeed.
    ///
    /// Transport failures, HTTP 5xx and 429 are worth retrying. A 404, any
    /// other 4xx, a decode failure, or a configuration error is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
