//! Service Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use navalha_app::domain::services::ServicesServiceError;

pub(crate) fn into_status_error(error: ServicesServiceError) -> StatusError {
    match error {
        ServicesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Service already exists")
        }
        ServicesServiceError::InvalidName => {
            StatusError::bad_request().brief("Invalid service name")
        }
        ServicesServiceError::InvalidPrice => {
            StatusError::bad_request().brief("Invalid service price")
        }
        ServicesServiceError::InvalidDuration => {
            StatusError::bad_request().brief("Invalid service duration")
        }
        ServicesServiceError::InvalidReference
        | ServicesServiceError::MissingRequiredData
        | ServicesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid service payload")
        }
        ServicesServiceError::Sql(source) => {
            error!("service query failed: {source}");

            StatusError::internal_server_error()
        }
        ServicesServiceError::NotFound => {
            error!("service not found");

            StatusError::not_found()
        }
    }
}
