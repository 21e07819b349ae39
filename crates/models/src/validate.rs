//! Field validators shared by the entity constructors and the service DTOs.

use crate::errors::ModelError;

/// Non-blank text of at most `max_len` characters.
pub fn required_text(field: &str, value: &str, max_len: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    if value.chars().count() > max_len {
        return Err(ModelError::Validation(format!("{field} must be at most {max_len} characters")));
    }
    Ok(())
}
