//! Create Appointment Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::appointments::models::NewAppointment;

use crate::{appointments::errors::into_status_error, extensions::*, state::State};

/// Create Appointment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAppointmentRequest {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,
    pub service_uuid: Uuid,

    /// RFC 3339 timestamp of the booking slot
    pub scheduled_at: String,
}

/// Appointment Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppointmentCreatedResponse {
    /// Created appointment UUID
    pub uuid: Uuid,

    /// Whether the booking consumed a subscription credit
    pub used_credit: bool,
}

/// Create Appointment Handler
///
/// Books a slot. Subscribers with a positive balance pay with a credit;
/// everyone else is billed per visit.
#[endpoint(
    tags("appointments"),
    summary = "Create Appointment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Appointment created"),
        (status_code = StatusCode::CONFLICT, description = "Appointment already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "appointments.create",
    skip(json, depot, res),
    fields(
        tenant_uuid = tracing::field::Empty,
        appointment_uuid = tracing::field::Empty,
        customer_uuid = tracing::field::Empty,
        used_credit = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAppointmentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AppointmentCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("appointment_uuid", tracing::field::display(request.uuid));
    span.record("customer_uuid", tracing::field::display(request.customer_uuid));

    let scheduled_at: Timestamp = request
        .scheduled_at
        .parse()
        .map_err(|_ignored| StatusError::bad_request().brief("Invalid scheduled_at timestamp"))?;

    let appointment = state
        .app
        .appointments
        .create_appointment(
            tenant,
            NewAppointment {
                uuid: request.uuid.into(),
                customer_uuid: request.customer_uuid.into(),
                service_uuid: request.service_uuid.into(),
                scheduled_at,
            },
        )
        .await
        .map_err(into_status_error)?;

    let uuid = appointment.uuid;

    span.record("used_credit", tracing::field::display(appointment.used_credit));

    res.add_header(LOCATION, format!("/appointments/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(appointment_uuid = %uuid, used_credit = appointment.used_credit, "booked appointment");

    Ok(Json(AppointmentCreatedResponse {
        uuid: uuid.into(),
        used_credit: appointment.used_credit,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use navalha_app::domain::{
        appointments::{
            AppointmentsServiceError, MockAppointmentsService, models::AppointmentUuid,
        },
        customers::models::CustomerUuid,
        services::models::ServiceUuid,
    };

    use crate::test_helpers::{TEST_TENANT_UUID, appointments_service, make_appointment};

    use super::*;

    fn make_service(repo: MockAppointmentsService) -> Service {
        appointments_service(repo, Router::with_path("appointments").post(handler))
    }

    #[tokio::test]
    async fn test_create_appointment_success() -> TestResult {
        let uuid = AppointmentUuid::new();
        let customer = CustomerUuid::new();
        let service = ServiceUuid::new();

        let scheduled_at: Timestamp = "2024-04-15T14:30:00Z".parse()?;

        let mut appointment = make_appointment(uuid, customer, service);

        appointment.scheduled_at = scheduled_at;
        appointment.used_credit = true;

        let mut repo = MockAppointmentsService::new();

        repo.expect_create_appointment()
            .once()
            .withf(move |tenant, new| {
                *tenant == TEST_TENANT_UUID
                    && *new
                        == NewAppointment {
                            uuid,
                            customer_uuid: customer,
                            service_uuid: service,
                            scheduled_at,
                        }
            })
            .return_once(move |_, _| Ok(appointment));

        repo.expect_complete_appointment().never();
        repo.expect_cancel_appointment().never();
        repo.expect_list_for_day().never();
        repo.expect_list_for_month().never();
        repo.expect_list_upcoming().never();

        let mut res = TestClient::post("http://example.com/appointments")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "customer_uuid": customer.into_uuid(),
                "service_uuid": service.into_uuid(),
                "scheduled_at": "2024-04-15T14:30:00Z",
            }))
            .send(&make_service(repo))
            .await;

        let body: AppointmentCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/appointments/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert!(body.used_credit);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_appointment_bad_timestamp_returns_400() -> TestResult {
        let mut repo = MockAppointmentsService::new();

        repo.expect_create_appointment().never();
        repo.expect_complete_appointment().never();
        repo.expect_cancel_appointment().never();
        repo.expect_list_for_day().never();
        repo.expect_list_for_month().never();
        repo.expect_list_upcoming().never();

        let res = TestClient::post("http://example.com/appointments")
            .json(&json!({
                "uuid": AppointmentUuid::new().into_uuid(),
                "customer_uuid": CustomerUuid::new().into_uuid(),
                "service_uuid": ServiceUuid::new().into_uuid(),
                "scheduled_at": "next tuesday",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_appointment_cross_tenant_returns_400() -> TestResult {
        let uuid = AppointmentUuid::new();

        let mut repo = MockAppointmentsService::new();

        repo.expect_create_appointment()
            .once()
            .withf(move |tenant, new| *tenant == TEST_TENANT_UUID && new.uuid == uuid)
            .return_once(|_, _| Err(AppointmentsServiceError::CrossTenantReference));

        repo.expect_complete_appointment().never();
        repo.expect_cancel_appointment().never();
        repo.expect_list_for_day().never();
        repo.expect_list_for_month().never();
        repo.expect_list_upcoming().never();

        let res = TestClient::post("http://example.com/appointments")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "customer_uuid": CustomerUuid::new().into_uuid(),
                "service_uuid": ServiceUuid::new().into_uuid(),
                "scheduled_at": "2024-04-15T14:30:00Z",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_appointment_conflict_returns_409() -> TestResult {
        let uuid = AppointmentUuid::new();

        let mut repo = MockAppointmentsService::new();

        repo.expect_create_appointment()
            .once()
            .withf(move |tenant, new| *tenant == TEST_TENANT_UUID && new.uuid == uuid)
            .return_once(|_, _| Err(AppointmentsServiceError::AlreadyExists));

        repo.expect_complete_appointment().never();
        repo.expect_cancel_appointment().never();
        repo.expect_list_for_day().never();
        repo.expect_list_for_month().never();
        repo.expect_list_upcoming().never();

        let res = TestClient::post("http://example.com/appointments")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "customer_uuid": CustomerUuid::new().into_uuid(),
                "service_uuid": ServiceUuid::new().into_uuid(),
                "scheduled_at": "2024-04-15T14:30:00Z",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
