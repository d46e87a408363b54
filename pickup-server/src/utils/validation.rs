//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Order notes
pub const MAX_NOTE_LEN: usize = 500;

/// Reservation notes
pub const MAX_RESERVATION_NOTE_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({len} chars, max {max_len})"
            )));
        }
    }
    Ok(())
}

/// Blank notes are stored as NULL
pub fn normalize_notes(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text_counts_chars() {
        // 100 multi-byte chars are within a 100 char limit
        let notes = Some("抹".repeat(100));
        assert!(validate_optional_text(&notes, "notes", MAX_RESERVATION_NOTE_LEN).is_ok());
        let notes = Some("a".repeat(101));
        assert!(validate_optional_text(&notes, "notes", MAX_RESERVATION_NOTE_LEN).is_err());
        assert!(validate_optional_text(&None, "notes", 1).is_ok());
    }

    #[test]
    fn test_normalize_notes() {
        assert_eq!(normalize_notes(Some("  ".into())), None);
        assert_eq!(normalize_notes(Some(" extra hot ".into())), Some("extra hot".into()));
        assert_eq!(normalize_notes(None), None);
    }
}
