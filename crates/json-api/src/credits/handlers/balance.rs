//! Credit Balance Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{credits::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BalanceResponse {
    /// The customer's current credit balance
    pub balance: i32,
}

/// Credit Balance Handler
///
/// Returns a customer's current credit balance.
#[endpoint(
    tags("credits"),
    summary = "Get Credit Balance",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BalanceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let balance = state
        .app
        .credits
        .balance(tenant, customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(BalanceResponse { balance }))
}
