//! Business components: one directory per entity kind plus the scheduler.
//!
//! Each component is constructed over a `Store` handle and exposes plain
//! operations to the HTTP layer. Failure conditions are typed so the
//! boundary can pick status codes without matching on strings.

pub mod doctors;
pub mod patients;
pub mod scheduler;

pub use doctors::DoctorDirectory;
pub use patients::PatientDirectory;
pub use scheduler::AppointmentScheduler;

use thiserror::Error;

use crate::db::DatabaseError;
use crate::format::InvalidDateFormat;

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// One message per violated field, collected in a single pass.
    #[error("validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("{0}")]
    DoctorNotFound(String),

    #[error("{0}")]
    PatientNotFound(String),

    #[error("{0}")]
    AppointmentNotFound(String),

    #[error(transparent)]
    InvalidDate(#[from] InvalidDateFormat),

    /// Persisting failed; the raw store error is logged, never carried.
    #[error("{0}")]
    Save(String),

    #[error("{0}")]
    Internal(String),
}

// Read-side store failures have no domain wording of their own.
impl From<DatabaseError> for DirectoryError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("store error: {err}");
        Self::Internal("Internal server error.".to_string())
    }
}

/// Wrap a write-path store failure with the entity's save message.
pub(crate) fn save_error(entity: &'static str, err: DatabaseError) -> DirectoryError {
    tracing::error!("failed to persist {entity}: {err}");
    DirectoryError::Save(format!("Could not save the {entity}."))
}

/// Shared required-field check: pushes a violation and yields an empty
/// placeholder when the value is missing or blank.
pub(crate) fn required_text(
    value: Option<String>,
    field: &str,
    violations: &mut Vec<String>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            violations.push(format!("Field '{field}' is required."));
            String::new()
        }
    }
}
