//! Validation helpers for inbound chat input.

use validator::ValidationError;

/// Cheap syntactic pre-filter for email candidates.
///
/// Only checks that both `@` and `.` appear somewhere; deliverability is not
/// this bot's concern.
///
/// # Examples
///
/// ```ignore
/// validate_email_candidate("a@b.com") // Ok
/// validate_email_candidate("a@bcom")  // Err - no dot
/// validate_email_candidate("a.b.com") // Err - no at sign
/// ```
pub fn validate_email_candidate(candidate: &str) -> Result<(), ValidationError> {
    if !candidate.contains('@') {
        let mut err = ValidationError::new("email_missing_at");
        err.message = Some("Email must contain an `@` character".into());
        return Err(err);
    }

    if !candidate.contains('.') {
        let mut err = ValidationError::new("email_missing_dot");
        err.message = Some("Email must contain a `.` character".into());
        return Err(err);
    }

    Ok(())
}
