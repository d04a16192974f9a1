//! Input validation for registration submissions.

use crate::error::ValidationError;

/// Minimum accepted password length, in bytes.
pub const MIN_PASSWORD_LEN: usize = 10;

/// Check a submission before any MAC or upstream work.
///
/// The username is checked first; the first failing check is reported.
/// Lengths are measured on the raw bytes as received.
pub fn validate(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }

    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}
