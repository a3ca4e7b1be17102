use lazy_static::lazy_static;
use regex::Regex;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trimmed, lower-cased form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Resolves a required string field, recording "is required" / "cannot be empty".
pub fn require<'a>(value: Option<&'a str>, label: &str, errors: &mut Vec<String>) -> Option<&'a str> {
    match value {
        None => {
            errors.push(format!("{label} is required"));
            None
        }
        Some(v) if v.trim().is_empty() => {
            errors.push(format!("{label} cannot be empty"));
            None
        }
        Some(v) => Some(v),
    }
}

/// Length check in characters, not bytes.
pub fn char_len_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("testuser@example.com"));
        assert!(!is_valid_email("testuser@example"));
        assert!(!is_valid_email("test user@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  Foo@Example.COM "), "foo@example.com");
    }

    #[test]
    fn require_distinguishes_missing_from_empty() {
        let mut errors = Vec::new();
        assert_eq!(require(None, "Name", &mut errors), None);
        assert_eq!(require(Some("  "), "Title", &mut errors), None);
        assert_eq!(require(Some("ok"), "Content", &mut errors), Some("ok"));
        assert_eq!(errors, vec!["Name is required", "Title cannot be empty"]);
    }

    #[test]
    fn lengths_count_characters() {
        assert!(char_len_between("żó", 2, 50));
        assert!(!char_len_between("a", 2, 50));
        assert!(!char_len_between(&"a".repeat(51), 2, 50));
    }
}
