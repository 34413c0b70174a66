//! Error types for the tcrack solvers.

use std::fmt;

/// Errors produced while configuring a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackError {
    /// No word list is available for the requested dictionary locale.
    UnknownLocale(String),
    /// A user-supplied transposition key is not a permutation of `1..=n`.
    InvalidKey(Vec<usize>),
}

impl fmt::Display for CrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrackError::UnknownLocale(locale) => {
                write!(f, "No dictionary available for locale '{}'", locale)
            }
            CrackError::InvalidKey(key) => {
                write!(f, "Key {:?} is not a permutation of 1..={}", key, key.len())
            }
        }
    }
}

impl std::error::Error for CrackError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_locale() {
        let err = CrackError::UnknownLocale("xx_YY".to_string());
        assert_eq!(format!("{}", err), "No dictionary available for locale 'xx_YY'");
    }

    #[test]
    fn test_display_invalid_key() {
        let err = CrackError::InvalidKey(vec![1, 3, 3]);
        assert_eq!(
            format!("{}", err),
            "Key [1, 3, 3] is not a permutation of 1..=3"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            CrackError::UnknownLocale("fr_FR".to_string()),
            CrackError::UnknownLocale("fr_FR".to_string())
        );
        assert_ne!(
            CrackError::UnknownLocale("fr_FR".to_string()),
            CrackError::InvalidKey(vec![1])
        );
    }
}
