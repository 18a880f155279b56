//! Credit Errors

use salvo::http::StatusError;
use tracing::error;

use navalha_app::domain::credits::CreditsServiceError;

pub(crate) fn into_status_error(error: CreditsServiceError) -> StatusError {
    match error {
        CreditsServiceError::InsufficientCredits => {
            StatusError::conflict().brief("Insufficient credits")
        }
        CreditsServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Invalid credit amount")
        }
        CreditsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Duplicate ledger entry")
        }
        CreditsServiceError::InvalidReference
        | CreditsServiceError::MissingRequiredData
        | CreditsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid credits payload")
        }
        CreditsServiceError::Sql(source) => {
            error!("credit ledger query failed: {source}");

            StatusError::internal_server_error()
        }
        CreditsServiceError::CustomerNotFound => {
            error!("customer not found");

            StatusError::not_found()
        }
    }
}
