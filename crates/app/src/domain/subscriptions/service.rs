//! Subscriptions service.
//!
//! Enrollment state machine per customer: none, active, canceled, back to
//! active on re-enrollment. The storage-level upsert keyed on the partial
//! unique index keeps "at most one active subscription per customer" true
//! even under concurrent subscribe calls.

use async_trait::async_trait;
use jiff::{Zoned, civil::Date};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        credits::{models::TransactionType, repository::PgCreditsRepository},
        customers::{models::CustomerUuid, repository::PgCustomersRepository},
        plans::{models::PlanUuid, repository::PgPlansRepository},
        subscriptions::{
            errors::SubscriptionsServiceError,
            models::{
                Subscription, SubscriptionStatus, SubscriptionUuid, advance_billing_date,
                initial_billing_date,
            },
            repository::PgSubscriptionsRepository,
        },
        tenants::models::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgSubscriptionsService {
    db: Db,
    repository: PgSubscriptionsRepository,
    customers: PgCustomersRepository,
    plans: PgPlansRepository,
    credits: PgCreditsRepository,
}

impl PgSubscriptionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSubscriptionsRepository::new(),
            customers: PgCustomersRepository::new(),
            plans: PgPlansRepository::new(),
            credits: PgCreditsRepository::new(),
        }
    }
}

#[async_trait]
impl SubscriptionsService for PgSubscriptionsService {
    #[tracing::instrument(
        name = "subscriptions.service.subscribe",
        skip(self),
        fields(tenant_uuid = %tenant, customer_uuid = %customer, plan_uuid = %plan),
        err
    )]
    async fn subscribe(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        plan: PlanUuid,
    ) -> Result<Subscription, SubscriptionsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(SubscriptionsServiceError::CustomerNotFound);
        }

        self.plans
            .find_plan(&mut tx, plan)
            .await?
            .ok_or(SubscriptionsServiceError::InvalidPlan)?;

        let subscription = self
            .repository
            .upsert_active(
                &mut tx,
                customer,
                plan,
                initial_billing_date(Zoned::now().date()),
            )
            .await?;

        tx.commit().await?;

        info!(subscription_uuid = %subscription.uuid, "subscribed customer");

        Ok(subscription)
    }

    async fn unsubscribe(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<bool, SubscriptionsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(SubscriptionsServiceError::CustomerNotFound);
        }

        let cancelled = self.repository.cancel_active(&mut tx, customer).await?;

        tx.commit().await?;

        if cancelled > 0 {
            info!(customer_uuid = %customer, "cancelled subscription");
        }

        Ok(cancelled > 0)
    }

    async fn active_for_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<Option<Subscription>, SubscriptionsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(SubscriptionsServiceError::CustomerNotFound);
        }

        let subscription = self.repository.find_active(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(subscription)
    }

    #[tracing::instrument(
        name = "subscriptions.service.renew",
        skip(self),
        fields(tenant_uuid = %tenant, subscription_uuid = %subscription),
        err
    )]
    async fn renew(
        &self,
        tenant: TenantUuid,
        subscription: SubscriptionUuid,
    ) -> Result<Subscription, SubscriptionsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let current = self
            .repository
            .get_subscription(&mut tx, subscription)
            .await?
            .ok_or(SubscriptionsServiceError::NotFound)?;

        if current.status != SubscriptionStatus::Active {
            return Err(SubscriptionsServiceError::NotActive);
        }

        let plan = self
            .plans
            .find_plan(&mut tx, current.plan_uuid)
            .await?
            .ok_or(SubscriptionsServiceError::InvalidPlan)?;

        self.credits
            .grant(
                &mut tx,
                current.customer_uuid,
                plan.credits_per_month,
                TransactionType::SubscriptionRenew,
                Some("monthly renewal"),
            )
            .await?;

        let due = current
            .next_billing_date
            .unwrap_or_else(|| Zoned::now().date());

        let renewed = self
            .repository
            .advance_billing_date(&mut tx, current.uuid, advance_billing_date(due))
            .await?
            .ok_or(SubscriptionsServiceError::NotActive)?;

        tx.commit().await?;

        info!(
            customer_uuid = %renewed.customer_uuid,
            credits = plan.credits_per_month,
            "renewed subscription"
        );

        Ok(renewed)
    }

    #[tracing::instrument(
        name = "subscriptions.service.renew_due",
        skip(self),
        fields(tenant_uuid = %tenant, %today),
        err
    )]
    async fn renew_due(
        &self,
        tenant: TenantUuid,
        today: Date,
    ) -> Result<u64, SubscriptionsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;
        let due = self.repository.list_due(&mut tx, today).await?;
        tx.commit().await?;

        // Each renewal commits on its own, so a rerun after a mid-batch
        // failure only picks up the subscriptions still due.
        let mut renewed = 0;

        for subscription in due {
            self.renew(tenant, subscription.uuid).await?;
            renewed += 1;
        }

        info!(renewed, "renewed due subscriptions");

        Ok(renewed)
    }
}

#[automock]
#[async_trait]
pub trait SubscriptionsService: Send + Sync {
    /// Enrolls the customer in a plan, or changes their active
    /// subscription's plan in place.
    async fn subscribe(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        plan: PlanUuid,
    ) -> Result<Subscription, SubscriptionsServiceError>;

    /// Cancels the customer's active subscription. Idempotent; returns
    /// whether a subscription was actually cancelled.
    async fn unsubscribe(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<bool, SubscriptionsServiceError>;

    /// The customer's active subscription, if any.
    async fn active_for_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<Option<Subscription>, SubscriptionsServiceError>;

    /// Grants one cycle of plan credits and advances the billing date.
    async fn renew(
        &self,
        tenant: TenantUuid,
        subscription: SubscriptionUuid,
    ) -> Result<Subscription, SubscriptionsServiceError>;

    /// Renews every active subscription due on or before `today`. Driven by
    /// the CLI, not an in-process scheduler.
    async fn renew_due(
        &self,
        tenant: TenantUuid,
        today: Date,
    ) -> Result<u64, SubscriptionsServiceError>;
}
