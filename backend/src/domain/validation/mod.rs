//! Request validation.
//!
//! Validators take a raw command plus the operation kind (create vs.
//! edit matters because uniqueness checks exclude the record being
//! edited) and produce an ordered list of field violations. Per field,
//! only the first broken rule is reported, but every field is always
//! checked, so a response carries at most one message per field and
//! never hides a later field behind an earlier one. Rules that need the
//! store (uniqueness, referential existence) only run once the cheap
//! syntactic rules for that field have passed.

pub mod books;
pub mod users;

pub use books::BookValidator;
pub use users::UserValidator;

use once_cell::sync::Lazy;
use regex::Regex;
use shared::FieldError;

use crate::domain::ids;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Ordered collector of field violations, first violation per field.
#[derive(Debug, Default)]
pub struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation on a body field unless that field already has
    /// one.
    pub fn body(&mut self, param: &str, msg: &str) {
        self.push(FieldError::body(param, msg));
    }

    /// Record a violation on a path parameter unless it already has one.
    pub fn param(&mut self, param: &str, msg: &str) {
        self.push(FieldError::param(param, msg));
    }

    fn push(&mut self, error: FieldError) {
        if !self.errors.iter().any(|e| e.param == error.param) {
            self.errors.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Syntactic email check; uniqueness is a separate rule.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Letters and digits only, non-empty.
pub fn is_alphanumeric(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Check an `:id` path parameter.
pub fn check_id_param(violations: &mut Violations, id: &str) {
    if !ids::is_record_id(id) {
        violations.param("id", "id is not valid");
    }
}
