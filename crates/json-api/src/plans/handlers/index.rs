//! Plan Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::plans::models::PlanWithSubscribers;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlanResponse {
    /// The unique identifier of the plan
    pub uuid: Uuid,

    /// The display name of the plan
    pub name: String,

    /// The monthly price of the plan in cents
    pub price: u64,

    /// Credits granted on each monthly renewal
    pub credits_per_month: i32,

    /// Number of customers currently subscribed
    pub active_subscribers: u64,

    /// The date and time the plan was created
    pub created_at: String,
}

impl From<PlanWithSubscribers> for PlanResponse {
    fn from(row: PlanWithSubscribers) -> Self {
        PlanResponse {
            uuid: row.plan.uuid.into(),
            name: row.plan.name,
            price: row.plan.price,
            credits_per_month: row.plan.credits_per_month,
            active_subscribers: row.active_subscribers,
            created_at: row.plan.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlansResponse {
    /// The list of plans
    pub plans: Vec<PlanResponse>,
}

/// Plan Index Handler
///
/// Returns the tenant's plans with their active subscriber counts.
#[endpoint(
    tags("plans"),
    summary = "List Plans",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PlansResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let plans = state
        .app
        .plans
        .list_plans(tenant)
        .await
        .or_500("failed to fetch plans")?;

    Ok(Json(PlansResponse {
        plans: plans.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use navalha_app::domain::plans::{
        MockPlansService, PlansServiceError,
        models::{PlanUuid, PlanWithSubscribers},
    };

    use crate::test_helpers::{TEST_TENANT_UUID, make_plan, plans_service};

    use super::*;

    fn make_row(uuid: PlanUuid, active_subscribers: u64) -> PlanWithSubscribers {
        PlanWithSubscribers {
            plan: make_plan(uuid),
            active_subscribers,
        }
    }

    fn make_service(repo: MockPlansService) -> Service {
        plans_service(repo, Router::with_path("plans").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut repo = MockPlansService::new();

        repo.expect_list_plans()
            .once()
            .withf(|tenant| *tenant == TEST_TENANT_UUID)
            .return_once(|_| Ok(vec![]));

        repo.expect_create_plan().never();
        repo.expect_delete_plan().never();

        let response: PlansResponse = TestClient::get("http://example.com/plans")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert!(response.plans.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_subscriber_counts() -> TestResult {
        let uuid_a = PlanUuid::new();
        let uuid_b = PlanUuid::new();

        let mut repo = MockPlansService::new();

        repo.expect_list_plans()
            .once()
            .withf(|tenant| *tenant == TEST_TENANT_UUID)
            .return_once(move |_| Ok(vec![make_row(uuid_a, 12), make_row(uuid_b, 0)]));

        repo.expect_create_plan().never();
        repo.expect_delete_plan().never();

        let response: PlansResponse = TestClient::get("http://example.com/plans")
            .send(&make_service(repo))
            .await
            .take_json()
            .await?;

        assert_eq!(response.plans.len(), 2, "expected two plans");
        assert_eq!(response.plans[0].uuid, uuid_a.into_uuid());
        assert_eq!(response.plans[0].active_subscribers, 12);
        assert_eq!(response.plans[1].active_subscribers, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_service_error_returns_500() -> TestResult {
        let mut repo = MockPlansService::new();

        repo.expect_list_plans()
            .once()
            .withf(|tenant| *tenant == TEST_TENANT_UUID)
            .return_once(|_| Err(PlansServiceError::InvalidData));

        repo.expect_create_plan().never();
        repo.expect_delete_plan().never();

        let res = TestClient::get("http://example.com/plans")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
