use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("volunteer name is required")]
    EmptyName,
    #[error("volunteer email is required")]
    EmptyEmail,
    #[error("volunteer address is required")]
    EmptyAddress,
    #[error("postal code must have exactly 8 digits: {0}")]
    InvalidPostalCode(String),
    #[error("invalid session timeout seconds: {0}")]
    InvalidSessionTimeout(u64),
}
