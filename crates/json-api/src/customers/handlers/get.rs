//! Get Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::customers::models::Customer;

use crate::{customers::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    /// The unique identifier of the customer
    pub uuid: Uuid,

    /// The customer's display name
    pub name: String,

    /// The customer's phone number, digits only
    pub phone: Option<String>,

    /// The date and time the customer was created
    pub created_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            uuid: customer.uuid.into(),
            name: customer.name,
            phone: customer.phone,
            created_at: customer.created_at.to_string(),
        }
    }
}

/// Get Customer Handler
///
/// Returns a customer.
#[endpoint(
    tags("customers"),
    summary = "Get Customer",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let customer = state
        .app
        .customers
        .get_customer(tenant, customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}
