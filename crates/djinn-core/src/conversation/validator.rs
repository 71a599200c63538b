//! Outbound message validation.

use crate::error::ValidationError;

/// Checks a candidate message against the emptiness and length rules.
///
/// Surrounding whitespace is trimmed before any check; the length limit is
/// measured in characters of the trimmed text.
///
/// # Errors
///
/// - [`ValidationError::Empty`] when nothing remains after trimming.
/// - [`ValidationError::TooLong`] when the trimmed text exceeds `max_length`.
pub fn validate(candidate: &str, max_length: usize) -> Result<String, ValidationError> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let length = trimmed.chars().count();
    if length > max_length {
        return Err(ValidationError::TooLong {
            length,
            max: max_length,
        });
    }
    Ok(trimmed.to_string())
}
