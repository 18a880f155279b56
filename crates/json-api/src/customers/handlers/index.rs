//! Customer Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::customers::models::CustomerWithPlan;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerWithPlanResponse {
    /// The unique identifier of the customer
    pub uuid: Uuid,

    /// The customer's display name
    pub name: String,

    /// The customer's phone number, digits only
    pub phone: Option<String>,

    /// Name of the active plan, absent for casual customers
    pub plan_name: Option<String>,

    /// The date and time the customer was created
    pub created_at: String,
}

impl From<CustomerWithPlan> for CustomerWithPlanResponse {
    fn from(row: CustomerWithPlan) -> Self {
        CustomerWithPlanResponse {
            uuid: row.customer.uuid.into(),
            name: row.customer.name,
            phone: row.customer.phone,
            plan_name: row.plan_name,
            created_at: row.customer.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomersResponse {
    /// The list of customers
    pub customers: Vec<CustomerWithPlanResponse>,
}

/// Customer Index Handler
///
/// Returns every customer of the tenant with their active plan name.
#[endpoint(
    tags("customers"),
    summary = "List Customers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CustomersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let customers = state
        .app
        .customers
        .list_customers(tenant)
        .await
        .or_500("failed to fetch customers")?;

    Ok(Json(CustomersResponse {
        customers: customers.into_iter().map(Into::into).collect(),
    }))
}
