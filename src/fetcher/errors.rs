use thiserror::Error;

/// Failure modes of a single fetch. None of these are retried internally;
/// the batch loop in `sources` decides what to do with them.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("access to {url} is disallowed by the domain policy (pattern: {pattern})")]
    AccessDenied { url: String, pattern: String },

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("request timed out")]
    Timeout,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// HTTP status of the upstream response, when one was received.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_redirect() {
            Self::TooManyRedirects
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else {
            // DNS failures, refused connections, broken bodies
            Self::Transport(err.to_string())
        }
    }
}
