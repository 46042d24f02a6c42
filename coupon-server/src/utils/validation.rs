//! Input validation helpers
//!
//! Text length constants and checks shared by payload validation.
//! Messages follow the "<Label> can't be blank" form used in API responses.

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: merchant, item, coupon
pub const MAX_NAME_LEN: usize = 200;

/// Coupon codes typed in at checkout
pub const MAX_CODE_LEN: usize = 64;

/// Descriptions and notes
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is present, non-blank and within the
/// length limit. Returns the trimmed value.
pub fn validate_required_text<'a>(
    value: Option<&'a str>,
    label: &str,
    max_len: usize,
) -> Result<&'a str, String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(format!("{label} can't be blank"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!(
            "{label} is too long (maximum is {max_len} characters)"
        ));
    }
    Ok(trimmed)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    label: &str,
    max_len: usize,
) -> Result<(), String> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(format!(
            "{label} is too long (maximum is {max_len} characters)"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(validate_required_text(Some("  SAVE10 "), "Code", 10), Ok("SAVE10"));
        assert_eq!(
            validate_required_text(Some("   "), "Name", 10),
            Err("Name can't be blank".to_string())
        );
        assert_eq!(
            validate_required_text(None, "Code", 10),
            Err("Code can't be blank".to_string())
        );
        assert!(validate_required_text(Some("ABCDEFGHIJK"), "Code", 10).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "Description", 3).is_ok());
        assert!(validate_optional_text(Some("abc"), "Description", 3).is_ok());
        assert!(validate_optional_text(Some("abcd"), "Description", 3).is_err());
    }
}
