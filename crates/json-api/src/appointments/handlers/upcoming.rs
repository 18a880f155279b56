//! Upcoming Appointments Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{appointments::day::AppointmentsResponse, extensions::*, state::State};

/// Upcoming Appointments Handler
///
/// Returns the next scheduled appointments from now on. `limit` defaults
/// to 20 and is clamped to 1..=100.
#[endpoint(
    tags("appointments"),
    summary = "List Upcoming Appointments",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<AppointmentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let limit = limit.into_inner().unwrap_or(20).clamp(1, 100);

    let appointments = state
        .app
        .appointments
        .list_upcoming(tenant, Timestamp::now(), limit)
        .await
        .or_500("failed to fetch appointments")?;

    Ok(Json(AppointmentsResponse {
        appointments: appointments.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use navalha_app::domain::{
        appointments::{MockAppointmentsService, models::AppointmentUuid},
        customers::models::CustomerUuid,
        services::models::ServiceUuid,
    };

    use crate::test_helpers::{TEST_TENANT_UUID, appointments_service, make_appointment_details};

    use super::*;

    fn make_service(repo: MockAppointmentsService) -> Service {
        appointments_service(repo, Router::with_path("appointments/upcoming").get(handler))
    }

    #[tokio::test]
    async fn test_upcoming_defaults_to_twenty() -> TestResult {
        let uuid = AppointmentUuid::new();

        let mut repo = MockAppointmentsService::new();

        repo.expect_list_upcoming()
            .once()
            .withf(|tenant, from, limit| {
                *tenant == TEST_TENANT_UUID && *from > Timestamp::UNIX_EPOCH && *limit == 20
            })
            .return_once(move |_, _, _| {
                Ok(vec![make_appointment_details(
                    uuid,
                    CustomerUuid::new(),
                    ServiceUuid::new(),
                )])
            });

        repo.expect_create_appointment().never();
        repo.expect_complete_appointment().never();
        repo.expect_cancel_appointment().never();
        repo.expect_list_for_day().never();
        repo.expect_list_for_month().never();

        let response: AppointmentsResponse =
            TestClient::get("http://example.com/appointments/upcoming")
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert_eq!(response.appointments.len(), 1, "expected one appointment");
        assert_eq!(response.appointments[0].uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_upcoming_clamps_oversized_limit() -> TestResult {
        let mut repo = MockAppointmentsService::new();

        repo.expect_list_upcoming()
            .once()
            .withf(|tenant, _, limit| *tenant == TEST_TENANT_UUID && *limit == 100)
            .return_once(|_, _, _| Ok(vec![]));

        repo.expect_create_appointment().never();
        repo.expect_complete_appointment().never();
        repo.expect_cancel_appointment().never();
        repo.expect_list_for_day().never();
        repo.expect_list_for_month().never();

        let res = TestClient::get("http://example.com/appointments/upcoming?limit=500")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_upcoming_clamps_non_positive_limit() -> TestResult {
        let mut repo = MockAppointmentsService::new();

        repo.expect_list_upcoming()
            .once()
            .withf(|tenant, _, limit| *tenant == TEST_TENANT_UUID && *limit == 1)
            .return_once(|_, _, _| Ok(vec![]));

        repo.expect_create_appointment().never();
        repo.expect_complete_appointment().never();
        repo.expect_cancel_appointment().never();
        repo.expect_list_for_day().never();
        repo.expect_list_for_month().never();

        let res = TestClient::get("http://example.com/appointments/upcoming?limit=0")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
