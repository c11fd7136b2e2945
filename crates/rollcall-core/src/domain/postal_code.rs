use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const POSTAL_CODE_DIGITS: usize = 8;

/// Brazilian postal code (CEP), held as exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Accepts any punctuation around the digits (`01001-000`, `01.001 000`).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let digits = normalize_postal_code(raw);
        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(CoreError::InvalidPostalCode(raw.trim().to_string()));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl TryFrom<String> for PostalCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(value: PostalCode) -> Self {
        value.0
    }
}

/// Strips every non-digit character. Length is not checked here.
pub fn normalize_postal_code(raw: &str) -> String {
    raw.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_postal_code, PostalCode};
    use crate::error::CoreError;

    #[test]
    fn normalize_strips_punctuation_and_spaces() {
        assert_eq!(normalize_postal_code(" 01001-000 "), "01001000");
        assert_eq!(normalize_postal_code("01.001.000"), "01001000");
        assert_eq!(normalize_postal_code("abc"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_postal_code("01001-000");
        assert_eq!(normalize_postal_code(&once), once);
    }

    #[test]
    fn normalize_keeps_wrong_lengths() {
        assert_eq!(normalize_postal_code("123-45"), "12345");
    }

    #[test]
    fn parse_requires_eight_digits() {
        assert!(PostalCode::parse("01001-000").is_ok());
        assert_eq!(
            PostalCode::parse("0100-000"),
            Err(CoreError::InvalidPostalCode("0100-000".to_string()))
        );
        assert!(PostalCode::parse("010010001").is_err());
    }

    #[test]
    fn display_uses_dashed_form() {
        let code = PostalCode::parse("01001000").expect("postal code");
        assert_eq!(code.to_string(), "01001-000");
        assert_eq!(code.as_str(), "01001000");
    }
}
