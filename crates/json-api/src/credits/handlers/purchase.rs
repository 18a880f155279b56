//! Purchase Credits Handler

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
    credits::{balance::BalanceResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Purchase Credits Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseCreditsRequest {
    /// Number of credits bought; must be positive
    pub quantity: i32,

    /// Promotional credits granted on top of the purchase
    #[serde(default)]
    pub bonus: i32,
}

/// Purchase Credits Handler
///
/// Sells a credit package and returns the new balance. A non-zero bonus
/// lands as a separate ledger entry.
#[endpoint(
    tags("credits"),
    summary = "Purchase Credit Package",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Package purchased"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<PurchaseCreditsRequest>,
    depot: &mut Depot,
) -> Result<Json<BalanceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let request = json.into_inner();

    let balance = state
        .app
        .credits
        .buy_package(
            tenant,
            customer.into_inner().into(),
            request.quantity,
            request.bonus,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(BalanceResponse { balance }))
}
