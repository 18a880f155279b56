//! Credit History Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::credits::models::CreditTransaction;

use crate::{credits::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreditTransactionResponse {
    /// The unique identifier of the ledger entry
    pub uuid: Uuid,

    /// Signed credit delta
    pub amount: i32,

    /// Ledger entry category
    pub transaction_type: String,

    /// Free-form note recorded with the entry
    pub description: Option<String>,

    /// The date and time the entry was recorded
    pub created_at: String,
}

impl From<CreditTransaction> for CreditTransactionResponse {
    fn from(transaction: CreditTransaction) -> Self {
        CreditTransactionResponse {
            uuid: transaction.uuid.into(),
            amount: transaction.amount,
            transaction_type: transaction.transaction_type.as_str().to_string(),
            description: transaction.description,
            created_at: transaction.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreditHistoryResponse {
    /// Ledger entries, newest first
    pub transactions: Vec<CreditTransactionResponse>,
}

/// Credit History Handler
///
/// Returns the customer's full ledger, newest first.
#[endpoint(
    tags("credits"),
    summary = "List Credit History",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CreditHistoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let transactions = state
        .app
        .credits
        .history(tenant, customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CreditHistoryResponse {
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}
