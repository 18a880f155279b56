//! Subscribe Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    subscriptions::{active::SubscriptionResponse, errors::into_status_error},
};

/// Subscribe Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscribeRequest {
    pub plan_uuid: Uuid,
}

/// Subscribe Handler
///
/// Enrolls the customer on a plan. An existing active subscription moves
/// to the new plan instead of stacking.
#[endpoint(
    tags("subscriptions"),
    summary = "Subscribe Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer subscribed"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<SubscribeRequest>,
    depot: &mut Depot,
) -> Result<Json<SubscriptionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let subscription = state
        .app
        .subscriptions
        .subscribe(
            tenant,
            customer.into_inner().into(),
            json.into_inner().plan_uuid.into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(subscription.into()))
}
