//! Plan Errors

use salvo::http::StatusError;
use tracing::error;

use navalha_app::domain::plans::PlansServiceError;

pub(crate) fn into_status_error(error: PlansServiceError) -> StatusError {
    match error {
        PlansServiceError::AlreadyExists => {
            StatusError::conflict().brief("Plan already exists")
        }
        PlansServiceError::PlanInUse => {
            StatusError::conflict().brief("Plan has active subscribers")
        }
        PlansServiceError::InvalidName => {
            StatusError::bad_request().brief("Invalid plan name")
        }
        PlansServiceError::InvalidPrice => {
            StatusError::bad_request().brief("Invalid plan price")
        }
        PlansServiceError::InvalidCredits => {
            StatusError::bad_request().brief("Invalid monthly credit allowance")
        }
        PlansServiceError::InvalidReference
        | PlansServiceError::MissingRequiredData
        | PlansServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid plan payload")
        }
        PlansServiceError::Sql(source) => {
            error!("plan query failed: {source}");

            StatusError::internal_server_error()
        }
        PlansServiceError::NotFound => {
            error!("plan not found");

            StatusError::not_found()
        }
    }
}
