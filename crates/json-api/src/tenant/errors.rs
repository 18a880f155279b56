//! Tenant Errors

use salvo::http::StatusError;
use tracing::error;

use navalha_app::domain::tenants::TenantsServiceError;

pub(crate) fn into_status_error(error: TenantsServiceError) -> StatusError {
    match error {
        TenantsServiceError::NoTenant => {
            StatusError::unauthorized().brief("Actor is not linked to a tenant")
        }
        TenantsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Tenant already exists")
        }
        TenantsServiceError::InvalidName => {
            StatusError::bad_request().brief("Invalid tenant name")
        }
        TenantsServiceError::InvalidReference
        | TenantsServiceError::MissingRequiredData
        | TenantsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid tenant payload")
        }
        TenantsServiceError::Sql(source) => {
            error!("tenant query failed: {source}");

            StatusError::internal_server_error()
        }
        TenantsServiceError::NotFound => {
            error!("tenant not found");

            StatusError::not_found()
        }
    }
}
