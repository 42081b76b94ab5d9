//! Short code generation and validation.
//!
//! Candidate codes are drawn uniformly from the alphanumeric alphabet. The
//! candidate space (62^7 ≈ 3.5 * 10^12) is large relative to any realistic
//! table size, so the registry's collision retry loop terminates quickly.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated codes.
pub const CODE_LENGTH: usize = 7;

/// Custom codes must be entirely alphanumeric.
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Generates a random candidate short code.
///
/// Pure function of the thread-local RNG; no external state, cheap enough for
/// the registry to call repeatedly in its retry loop.
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is empty or contains
/// non-alphanumeric characters.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() {
        return Err(AppError::bad_request(
            "Custom code must not be empty",
            json!({}),
        ));
    }

    if !CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code must contain only alphanumeric characters",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generated_code_passes_custom_validation() {
        assert!(validate_custom_code(&generate_code()).is_ok());
    }

    #[test]
    fn test_validate_alphanumeric_ok() {
        assert!(validate_custom_code("promo").is_ok());
        assert!(validate_custom_code("Promo2025").is_ok());
        assert!(validate_custom_code("1").is_ok());
    }

    #[test]
    fn test_validate_empty_rejected() {
        let err = validate_custom_code("").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_validate_special_characters_rejected() {
        assert!(validate_custom_code("bad code!").is_err());
        assert!(validate_custom_code("with-dash").is_err());
        assert!(validate_custom_code("under_score").is_err());
        assert!(validate_custom_code("slash/").is_err());
    }
}
