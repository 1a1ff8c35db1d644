use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const INVALID_CITY_MESSAGE: &str =
    "Please enter a valid city name (letters, spaces, and hyphens only)";

// Letters, whitespace, hyphens and apostrophes only.
static CITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s\-']+$").expect("city pattern compiles"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", INVALID_CITY_MESSAGE)]
    Rejected(String),
}

/// Pure predicate over already-trimmed text. Empty input passes; callers only
/// act on non-empty values.
pub fn is_valid_city(text: &str) -> bool {
    text.is_empty() || CITY_PATTERN.is_match(text)
}

/// Trims `raw` and checks it. Returns the trimmed text on success.
pub fn validate_city(raw: &str) -> Result<String, ValidationError> {
    let text = raw.trim();
    if is_valid_city(text) {
        Ok(text.to_string())
    } else {
        Err(ValidationError::Rejected(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_spaces_hyphens_apostrophes() {
        for s in ["Paris", "New York", "Winston-Salem", "L'Aquila", "St John's", "a"] {
            assert!(is_valid_city(s), "{s} should be accepted");
        }
    }

    #[test]
    fn accepts_empty_as_noop() {
        assert!(is_valid_city(""));
        assert_eq!(validate_city("   ").unwrap(), "");
    }

    #[test]
    fn rejects_other_characters() {
        for s in ["Paris1", "Zürich", "São Paulo", "Tokyo!", "a_b", "x.y", "東京", "Rome;"] {
            assert!(!is_valid_city(s), "{s} should be rejected");
        }
    }

    #[test]
    fn validate_trims_before_checking() {
        assert_eq!(validate_city("  Oslo \t").unwrap(), "Oslo");
        let err = validate_city(" Oslo 2 ").unwrap_err();
        assert_eq!(err, ValidationError::Rejected("Oslo 2".to_string()));
        assert_eq!(err.to_string(), INVALID_CITY_MESSAGE);
    }

    #[test]
    fn inner_whitespace_counts_as_whitespace() {
        assert!(is_valid_city("Rio\tde\tJaneiro"));
        assert!(is_valid_city("Rio\u{a0}Branco"));
    }
}
