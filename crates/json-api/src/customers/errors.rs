//! Customer Errors

use salvo::http::StatusError;
use tracing::error;

use navalha_app::domain::customers::CustomersServiceError;

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Customer already exists")
        }
        CustomersServiceError::InvalidName => {
            StatusError::bad_request().brief("Invalid customer name")
        }
        CustomersServiceError::InvalidPlan => {
            StatusError::bad_request().brief("Plan does not belong to this tenant")
        }
        CustomersServiceError::InvalidReference
        | CustomersServiceError::MissingRequiredData
        | CustomersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid customer payload")
        }
        CustomersServiceError::Sql(source) => {
            error!("customer query failed: {source}");

            StatusError::internal_server_error()
        }
        CustomersServiceError::NotFound => {
            error!("customer not found");

            StatusError::not_found()
        }
    }
}
