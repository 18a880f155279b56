//! Update Customer Handler

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

use navalha_app::domain::customers::models::{CustomerUpdate, Membership};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

/// Update Customer Request
///
/// A present `plan_uuid` enrolls the customer on that monthly plan; an
/// absent one makes them casual and cancels any active subscription.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCustomerRequest {
    pub name: String,
    pub phone: Option<String>,
    pub plan_uuid: Option<Uuid>,
}

impl From<UpdateCustomerRequest> for CustomerUpdate {
    fn from(request: UpdateCustomerRequest) -> Self {
        CustomerUpdate {
            name: request.name,
            phone: request.phone,
            membership: request
                .plan_uuid
                .map_or(Membership::Casual, |plan| Membership::Monthly(plan.into())),
        }
    }
}

/// Update Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Update Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<UpdateCustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let customer = state
        .app
        .customers
        .update_customer(tenant, customer.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}
