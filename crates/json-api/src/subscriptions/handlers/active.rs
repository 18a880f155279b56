//! Active Subscription Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::subscriptions::models::{Subscription, SubscriptionStatus};

use crate::{extensions::*, state::State, subscriptions::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionResponse {
    /// The unique identifier of the subscription
    pub uuid: Uuid,

    /// The plan the customer is enrolled on
    pub plan_uuid: Uuid,

    /// Lifecycle state of the subscription
    pub status: String,

    /// The next date a renewal will bill, absent once canceled
    pub next_billing_date: Option<String>,

    /// The date and time the subscription was created
    pub created_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        SubscriptionResponse {
            uuid: subscription.uuid.into(),
            plan_uuid: subscription.plan_uuid.into(),
            status: match subscription.status {
                SubscriptionStatus::Active => "active".to_string(),
                SubscriptionStatus::Canceled => "canceled".to_string(),
            },
            next_billing_date: subscription.next_billing_date.as_ref().map(ToString::to_string),
            created_at: subscription.created_at.to_string(),
        }
    }
}

/// Active Subscription Handler
///
/// Returns the customer's active subscription, or 404 when they are casual.
#[endpoint(
    tags("subscriptions"),
    summary = "Get Active Subscription",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SubscriptionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let subscription = state
        .app
        .subscriptions
        .active_for_customer(tenant, customer.into_inner().into())
        .await
        .map_err(into_status_error)?
        .ok_or_else(|| StatusError::not_found().brief("No active subscription"))?;

    Ok(Json(subscription.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use navalha_app::domain::{
        customers::models::CustomerUuid,
        plans::models::PlanUuid,
        subscriptions::{
            MockSubscriptionsService, SubscriptionsServiceError, models::SubscriptionUuid,
        },
    };

    use crate::test_helpers::{TEST_TENANT_UUID, make_subscription, subscriptions_service};

    use super::*;

    fn make_service(repo: MockSubscriptionsService) -> Service {
        subscriptions_service(
            repo,
            Router::with_path("customers/{customer}/subscription").get(handler),
        )
    }

    #[tokio::test]
    async fn test_active_returns_subscription() -> TestResult {
        let customer = CustomerUuid::new();
        let plan = PlanUuid::new();
        let uuid = SubscriptionUuid::new();

        let subscription = make_subscription(uuid, customer, plan);

        let mut repo = MockSubscriptionsService::new();

        repo.expect_active_for_customer()
            .once()
            .withf(move |tenant, c| *tenant == TEST_TENANT_UUID && *c == customer)
            .return_once(move |_, _| Ok(Some(subscription)));

        repo.expect_subscribe().never();
        repo.expect_unsubscribe().never();
        repo.expect_renew().never();
        repo.expect_renew_due().never();

        let response: SubscriptionResponse = TestClient::get(format!(
            "http://example.com/customers/{customer}/subscription"
        ))
        .send(&make_service(repo))
        .await
        .take_json()
        .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.plan_uuid, plan.into_uuid());
        assert_eq!(response.status, "active");
        assert_eq!(response.next_billing_date.as_deref(), Some("2024-04-15"));

        Ok(())
    }

    #[tokio::test]
    async fn test_active_casual_customer_returns_404() -> TestResult {
        let customer = CustomerUuid::new();

        let mut repo = MockSubscriptionsService::new();

        repo.expect_active_for_customer()
            .once()
            .withf(move |tenant, c| *tenant == TEST_TENANT_UUID && *c == customer)
            .return_once(|_, _| Ok(None));

        repo.expect_subscribe().never();
        repo.expect_unsubscribe().never();
        repo.expect_renew().never();
        repo.expect_renew_due().never();

        let res = TestClient::get(format!(
            "http://example.com/customers/{customer}/subscription"
        ))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_active_missing_customer_returns_404() -> TestResult {
        let customer = CustomerUuid::new();

        let mut repo = MockSubscriptionsService::new();

        repo.expect_active_for_customer()
            .once()
            .withf(move |tenant, c| *tenant == TEST_TENANT_UUID && *c == customer)
            .return_once(|_, _| Err(SubscriptionsServiceError::CustomerNotFound));

        repo.expect_subscribe().never();
        repo.expect_unsubscribe().never();
        repo.expect_renew().never();
        repo.expect_renew_due().never();

        let res = TestClient::get(format!(
            "http://example.com/customers/{customer}/subscription"
        ))
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
