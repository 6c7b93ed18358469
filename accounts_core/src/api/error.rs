use reqwest::StatusCode;
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while talking to the API. We don't try to interpret
/// these; callers decide what (if anything) to tell the user.
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't build a URL, for example if a route contained something
    /// that can't appear in one.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't talk to the server at all, for example if it was down or
    /// the connection dropped.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than a 2xx.
    #[error("server returned {status}: {body}")]
    Status {
        /// The status the server returned
        status: StatusCode,

        /// Whatever the server sent along with it
        body: String,
    },

    /// The caller asked to decode a response body that wasn't the expected
    /// JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The status code the server returned, if we got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            Self::UrlParse(_) | Self::Json(_) => None,
        }
    }
}
