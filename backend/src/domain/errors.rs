use shared::FieldError;

/// Failure modes a service operation can surface to the REST layer.
///
/// Store failures ride through as `Internal`; everything else maps to a
/// specific response envelope.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// One or more request fields violated a validation rule.
    #[error("inputs not valid")]
    Invalid(Vec<FieldError>),

    /// The addressed record does not exist. Carries the entity noun so
    /// handlers can phrase "user not found" / "book not found".
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Password change attempted with a wrong current password.
    #[error("old password is incorrect")]
    OldPasswordMismatch,

    /// Unexpected failure, typically from the store.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Wrap a non-empty violation list, or return `Ok` when the list is
    /// empty so callers can write `ServiceError::check(violations)?`.
    pub fn check(violations: Vec<FieldError>) -> ServiceResult<()> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Invalid(violations))
        }
    }
}
