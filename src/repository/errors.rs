use thiserror::Error;

/// Failures of calls made against the travel offers API.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The request never produced a response (connection refused, TLS, ...).
    #[error("request to the API failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status other than 404.
    #[error("API rejected the request with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("resource not found")]
    NotFound,
    /// The response body did not have the expected shape.
    #[error("unexpected API response: {0}")]
    Decode(String),
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// An admin endpoint was called without a bearer token in the session.
    #[error("no access token in session")]
    MissingToken,
}

impl RepositoryError {
    /// HTTP status of a rejected request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::NotFound => Some(404),
            _ => None,
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
