use crate::core::library::{LibraryError, LibraryResult};

/// Parses a copy count typed by the user.
///
/// Only plain decimal digits are accepted (surrounding whitespace is
/// ignored), so signs, fractions and empty input are rejected the same way as
/// words. Callers re-prompt on the returned `Validation` error.
pub fn parse_quantity(input: &str) -> LibraryResult<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(LibraryError::validation(
            format!("'{}' is not a non-negative whole number", trimmed).as_str(),
            Some("quantity".to_string())));
    }
    trimmed.parse::<u64>().map_err(|err| {
        LibraryError::validation(format!("'{}' is too large: {}", trimmed, err).as_str(),
                                 Some("quantity".to_string()))
    })
}
