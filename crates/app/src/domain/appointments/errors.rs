//! Appointments service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppointmentsServiceError {
    /// The referenced customer or service is not visible in the tenant
    /// scope. Under row-level security a foreign id and a nonexistent id are
    /// indistinguishable.
    #[error("customer or service does not belong to this tenant")]
    CrossTenantReference,

    #[error("appointment not found")]
    NotFound,

    #[error("appointment is not in a state that allows this transition")]
    InvalidStatusChange,

    #[error("invalid calendar date")]
    InvalidDate(#[from] jiff::Error),

    #[error("appointment already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AppointmentsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
