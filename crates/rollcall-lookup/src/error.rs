use rollcall_core::rules::LookupFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("postal code not found: {0}")]
    NotFound(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, LookupError>;

impl From<LookupError> for LookupFailure {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(code) => LookupFailure::NotFound(code),
            other => LookupFailure::Transport(other.to_string()),
        }
    }
}
