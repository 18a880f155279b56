//! Subscriptions Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    customers::models::CustomerUuid,
    plans::models::PlanUuid,
    subscriptions::models::{Subscription, SubscriptionUuid},
};

const UPSERT_ACTIVE_SQL: &str = include_str!("sql/upsert_active.sql");
const CANCEL_ACTIVE_SQL: &str = include_str!("sql/cancel_active.sql");
const FIND_ACTIVE_SQL: &str = include_str!("sql/find_active.sql");
const GET_SUBSCRIPTION_SQL: &str = include_str!("sql/get_subscription.sql");
const LIST_DUE_SQL: &str = include_str!("sql/list_due.sql");
const ADVANCE_BILLING_DATE_SQL: &str = include_str!("sql/advance_billing_date.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubscriptionsRepository;

impl PgSubscriptionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Enroll the customer, or change the plan of their existing active
    /// subscription in place. `billing_date` only applies to fresh rows.
    pub(crate) async fn upsert_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        plan: PlanUuid,
        billing_date: Date,
    ) -> Result<Subscription, sqlx::Error> {
        query_as::<Postgres, Subscription>(UPSERT_ACTIVE_SQL)
            .bind(SubscriptionUuid::new().into_uuid())
            .bind(customer.into_uuid())
            .bind(plan.into_uuid())
            .bind(SqlxDate::from(billing_date))
            .fetch_one(&mut **tx)
            .await
    }

    /// Cancels the customer's active subscription if one exists. Returns the
    /// number of rows flipped.
    pub(crate) async fn cancel_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(CANCEL_ACTIVE_SQL)
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn find_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        query_as::<Postgres, Subscription>(FIND_ACTIVE_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: SubscriptionUuid,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        query_as::<Postgres, Subscription>(GET_SUBSCRIPTION_SQL)
            .bind(subscription.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Active subscriptions whose billing date has arrived, oldest first.
    pub(crate) async fn list_due(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        today: Date,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        query_as::<Postgres, Subscription>(LIST_DUE_SQL)
            .bind(SqlxDate::from(today))
            .fetch_all(&mut **tx)
            .await
    }

    /// Moves the billing date of an active subscription. Returns `None` when
    /// the row is gone or no longer active.
    pub(crate) async fn advance_billing_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: SubscriptionUuid,
        billing_date: Date,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        query_as::<Postgres, Subscription>(ADVANCE_BILLING_DATE_SQL)
            .bind(subscription.into_uuid())
            .bind(SqlxDate::from(billing_date))
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Subscription {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SubscriptionUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            plan_uuid: PlanUuid::from_uuid(row.try_get("plan_uuid")?),
            status: row.try_get("status")?,
            next_billing_date: row
                .try_get::<Option<SqlxDate>, _>("next_billing_date")?
                .map(SqlxDate::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
