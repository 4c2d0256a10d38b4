//! # Validation Utilities
//!
//! Input validation helpers. Lengths are counted in characters, not bytes.

/// Validate email format (basic check).
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate minimum length.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

/// Validate that a length falls within `min..=max`.
pub fn validate_length_range(value: &str, min: usize, max: usize, field_name: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        Err(format!("{} must be between {} and {} characters", field_name, min, max))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_min_length_counts_chars() {
        // Six Cyrillic letters are twelve bytes but six characters
        assert!(validate_min_length("пароль", 6, "Password").is_ok());
        assert!(validate_min_length("ab", 6, "Password").is_err());
    }

    #[test]
    fn test_validate_length_range() {
        assert!(validate_length_range("abc", 3, 50, "Username").is_ok());
        assert!(validate_length_range("ab", 3, 50, "Username").is_err());
        assert!(validate_length_range(&"a".repeat(51), 3, 50, "Username").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
    }
}
