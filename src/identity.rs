//! Student identifier validation
//!
//! A student ID is 8 to 10 ASCII decimal digits, nothing else. The pattern
//! is anchored to the whole input so trailing garbage after a valid prefix
//! is rejected.

use regex_lite::Regex;
use std::sync::OnceLock;

static STUDENT_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn student_id_pattern() -> &'static Regex {
    STUDENT_ID_PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{8,10}$").expect("hard-coded pattern compiles"))
}

/// Errors for student ID validation
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error(
        "student id '{0}' is invalid: it should only include digits 0-9 and be of length 8-10"
    )]
    InvalidStudentId(String),
}

/// Validate a student ID against the submission format.
///
/// Accepts exactly the strings matching `^[0-9]{8,10}$`.
pub fn validate_student_id(id: &str) -> Result<(), IdentityError> {
    if student_id_pattern().is_match(id) {
        Ok(())
    } else {
        Err(IdentityError::InvalidStudentId(id.to_string()))
    }
}
