//! Appointment Errors

use salvo::http::StatusError;
use tracing::error;

use navalha_app::domain::appointments::AppointmentsServiceError;

pub(crate) fn into_status_error(error: AppointmentsServiceError) -> StatusError {
    match error {
        AppointmentsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Appointment already exists")
        }
        AppointmentsServiceError::InvalidStatusChange => {
            StatusError::conflict().brief("Appointment is not scheduled")
        }
        AppointmentsServiceError::CrossTenantReference => {
            StatusError::bad_request().brief("Customer or service does not belong to this tenant")
        }
        AppointmentsServiceError::InvalidDate(_) => {
            StatusError::bad_request().brief("Invalid date")
        }
        AppointmentsServiceError::InvalidReference
        | AppointmentsServiceError::MissingRequiredData
        | AppointmentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid appointment payload")
        }
        AppointmentsServiceError::Sql(source) => {
            error!("appointment query failed: {source}");

            StatusError::internal_server_error()
        }
        AppointmentsServiceError::NotFound => {
            error!("appointment not found");

            StatusError::not_found()
        }
    }
}
