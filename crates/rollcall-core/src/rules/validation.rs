use crate::domain::{emails_match, PostalCode, Volunteer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw submission as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerForm {
    pub name: String,
    pub email: String,
    pub postal_code: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub name: String,
    pub email: String,
    pub postal_code: PostalCode,
    /// Manually entered address, already trimmed and non-empty.
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field")]
    MissingField,
    #[error("duplicate email")]
    DuplicateEmail,
    #[error("invalid postal code")]
    InvalidPostalCode,
}

/// Checks a submission against the current collection. Rules run in order and
/// the first failure is returned.
pub fn validate(form: &VolunteerForm, existing: &[Volunteer]) -> Result<ValidatedForm, ValidationError> {
    let name = form.name.trim();
    let email = form.email.trim();
    let postal_code = form.postal_code.trim();
    if name.is_empty() || email.is_empty() || postal_code.is_empty() {
        return Err(ValidationError::MissingField);
    }

    if existing
        .iter()
        .any(|volunteer| emails_match(&volunteer.email, email))
    {
        return Err(ValidationError::DuplicateEmail);
    }

    let postal_code =
        PostalCode::parse(postal_code).map_err(|_| ValidationError::InvalidPostalCode)?;

    let address = form
        .address
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(ValidatedForm {
        name: name.to_string(),
        email: email.to_string(),
        postal_code,
        address,
    })
}
