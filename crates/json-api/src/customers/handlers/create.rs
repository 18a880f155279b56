//! Create Customer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::customers::models::NewCustomer;

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Create Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCustomerRequest {
    pub uuid: Uuid,
    pub name: String,
    pub phone: Option<String>,
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(request: CreateCustomerRequest) -> Self {
        NewCustomer {
            uuid: request.uuid.into(),
            name: request.name,
            phone: request.phone,
        }
    }
}

/// Customer Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerCreatedResponse {
    /// Created customer UUID
    pub uuid: Uuid,
}

/// Create Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Create Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Customer created"),
        (status_code = StatusCode::CONFLICT, description = "Customer already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let uuid = state
        .app
        .customers
        .create_customer(tenant, json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/customers/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CustomerCreatedResponse { uuid: uuid.into() }))
}
