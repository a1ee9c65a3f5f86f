//! Field-level checks shared by the request handlers.

use crate::error::CoreError;

/// Maximum length (in characters) of names and titles.
pub const MAX_NAME_LEN: usize = 200;

/// Reject blank or overlong names.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Accept `#RGB` or `#RRGGBB` hex colors.
pub fn validate_hex_color(color: &str) -> Result<(), CoreError> {
    let ok = color
        .strip_prefix('#')
        .filter(|hex| matches!(hex.len(), 3 | 6))
        .is_some_and(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()));
    if ok {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Expected #RGB or #RRGGBB"
        )))
    }
}

/// Reject blank free-text inputs such as prompts and edit instructions.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_before_checking() {
        assert!(validate_name("name", "  ").is_err());
        assert!(validate_name("name", " 案件A ").is_ok());
        let long = "あ".repeat(MAX_NAME_LEN + 1);
        assert!(validate_name("name", &long).is_err());
        // Length is counted in characters, not bytes.
        assert!(validate_name("name", &"あ".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn hex_colors() {
        assert!(validate_hex_color("#FF5733").is_ok());
        assert!(validate_hex_color("#abc").is_ok());
        assert!(validate_hex_color("FF5733").is_err());
        assert!(validate_hex_color("#GG0000").is_err());
        assert!(validate_hex_color("#FF57").is_err());
    }
}
