//! Grant Credits Handler

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

use navalha_app::domain::credits::models::TransactionType;

use crate::{
    credits::{balance::BalanceResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Grant Credits Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GrantCreditsRequest {
    /// Number of credits to add; must be positive
    pub amount: i32,

    /// Free-form note recorded on the ledger entry
    pub description: Option<String>,
}

/// Grant Credits Handler
///
/// Records a manual adjustment on the customer's ledger and returns the
/// new balance.
#[endpoint(
    tags("credits"),
    summary = "Grant Credits",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Credits granted"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<GrantCreditsRequest>,
    depot: &mut Depot,
) -> Result<Json<BalanceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let request = json.into_inner();

    let balance = state
        .app
        .credits
        .grant(
            tenant,
            customer.into_inner().into(),
            request.amount,
            TransactionType::ManualAdjustment,
            request.description,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(BalanceResponse { balance }))
}
