pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Case-insensitive comparison used for duplicate detection.
pub fn emails_match(left: &str, right: &str) -> bool {
    match (normalize_email(left), normalize_email(right)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{emails_match, normalize_email};

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  Ana@X.com ");
        assert_eq!(value.as_deref(), Some("ana@x.com"));
    }

    #[test]
    fn normalize_email_rejects_blank() {
        assert!(normalize_email("   ").is_none());
    }

    #[test]
    fn emails_match_ignores_case_and_padding() {
        assert!(emails_match("ANA@x.com", " ana@X.COM "));
        assert!(!emails_match("ana@x.com", "ana@y.com"));
        assert!(!emails_match("", ""));
    }
}
