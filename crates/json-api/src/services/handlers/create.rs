//! Create Service Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::services::models::NewService;

use crate::{extensions::*, services::errors::into_status_error, state::State};

/// Create Service Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateServiceRequest {
    pub uuid: Uuid,
    pub name: String,
    pub price: u64,
    pub duration_minutes: Option<i32>,
}

impl From<CreateServiceRequest> for NewService {
    fn from(request: CreateServiceRequest) -> Self {
        NewService {
            uuid: request.uuid.into(),
            name: request.name,
            price: request.price,
            duration_minutes: request.duration_minutes,
        }
    }
}

/// Service Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceCreatedResponse {
    /// Created service UUID
    pub uuid: Uuid,
}

/// Create Service Handler
#[endpoint(
    tags("services"),
    summary = "Create Service",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Service created"),
        (status_code = StatusCode::CONFLICT, description = "Service already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateServiceRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ServiceCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let uuid = state
        .app
        .services
        .create_service(tenant, json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/services/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ServiceCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use navalha_app::domain::services::{
        MockServicesService, ServicesServiceError, models::ServiceUuid,
    };

    use crate::test_helpers::{TEST_TENANT_UUID, make_catalog_service, services_service};

    use super::*;

    fn make_service(repo: MockServicesService) -> Service {
        services_service(repo, Router::with_path("services").post(handler))
    }

    #[tokio::test]
    async fn test_create_service_success() -> TestResult {
        let uuid = ServiceUuid::new();
        let service = make_catalog_service(uuid);

        let mut repo = MockServicesService::new();

        repo.expect_create_service()
            .once()
            .withf(move |tenant, new| {
                *tenant == TEST_TENANT_UUID
                    && *new
                        == NewService {
                            uuid,
                            name: "Haircut".to_string(),
                            price: 5000,
                            duration_minutes: Some(30),
                        }
            })
            .return_once(move |_, _| Ok(service));

        repo.expect_get_service().never();
        repo.expect_list_services().never();

        let mut res = TestClient::post("http://example.com/services")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Haircut",
                "price": 5000,
                "duration_minutes": 30,
            }))
            .send(&make_service(repo))
            .await;

        let body: ServiceCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/services/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_service_conflict_returns_409() -> TestResult {
        let uuid = ServiceUuid::new();

        let mut repo = MockServicesService::new();

        repo.expect_create_service()
            .once()
            .withf(move |tenant, new| *tenant == TEST_TENANT_UUID && new.uuid == uuid)
            .return_once(|_, _| Err(ServicesServiceError::AlreadyExists));

        repo.expect_get_service().never();
        repo.expect_list_services().never();

        let res = TestClient::post("http://example.com/services")
            .json(&json!({ "uuid": uuid.into_uuid(), "name": "Haircut", "price": 5000 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_service_zero_price_returns_400() -> TestResult {
        let uuid = ServiceUuid::new();

        let mut repo = MockServicesService::new();

        repo.expect_create_service()
            .once()
            .withf(move |tenant, new| *tenant == TEST_TENANT_UUID && new.price == 0)
            .return_once(|_, _| Err(ServicesServiceError::InvalidPrice));

        repo.expect_get_service().never();
        repo.expect_list_services().never();

        let res = TestClient::post("http://example.com/services")
            .json(&json!({ "uuid": uuid.into_uuid(), "name": "Haircut", "price": 0 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
