//! Unsubscribe Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, state::State, subscriptions::errors::into_status_error};

/// Unsubscribe Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UnsubscribeResponse {
    /// Whether an active subscription was cancelled
    pub cancelled: bool,
}

/// Unsubscribe Handler
///
/// Cancels the customer's active subscription. Cancelling a customer
/// without one reports `cancelled: false` rather than failing.
#[endpoint(
    tags("subscriptions"),
    summary = "Unsubscribe Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cancellation outcome"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UnsubscribeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let cancelled = state
        .app
        .subscriptions
        .unsubscribe(tenant, customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(UnsubscribeResponse { cancelled }))
}
