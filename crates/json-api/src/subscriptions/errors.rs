//! Subscription Errors

use salvo::http::StatusError;
use tracing::error;

use navalha_app::domain::subscriptions::SubscriptionsServiceError;

pub(crate) fn into_status_error(error: SubscriptionsServiceError) -> StatusError {
    match error {
        SubscriptionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Subscription already exists")
        }
        SubscriptionsServiceError::NotActive => {
            StatusError::conflict().brief("No active subscription")
        }
        SubscriptionsServiceError::InvalidPlan => {
            StatusError::bad_request().brief("Plan does not belong to this tenant")
        }
        SubscriptionsServiceError::InvalidReference
        | SubscriptionsServiceError::MissingRequiredData
        | SubscriptionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid subscription payload")
        }
        SubscriptionsServiceError::Sql(source) => {
            error!("subscription query failed: {source}");

            StatusError::internal_server_error()
        }
        SubscriptionsServiceError::CustomerNotFound => {
            error!("customer not found");

            StatusError::not_found()
        }
        SubscriptionsServiceError::NotFound => {
            error!("subscription not found");

            StatusError::not_found()
        }
    }
}
