#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email.")]
    InvalidEmail,
    #[error("Please enter a valid number")]
    InvalidNumber(String),
}

pub struct Validator;

impl Validator {
    /// Accepts anything containing an `@`; the store is the authority on identity.
    pub fn email(email: &str) -> Result<(), ValidationError> {
        if email.contains('@') {
            Ok(())
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }

    /// Parses a finite number, ignoring surrounding whitespace.
    pub fn numeric(raw: &str) -> Result<f64, ValidationError> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ValidationError::InvalidNumber(raw.to_string()))
    }
}
