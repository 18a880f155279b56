//! Plans Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::plans::models::{Plan, PlanUuid, PlanWithSubscribers};

const INSERT_PLAN_SQL: &str = include_str!("sql/insert_plan.sql");
const FIND_PLAN_SQL: &str = include_str!("sql/find_plan.sql");
const LIST_PLANS_SQL: &str = include_str!("sql/list_plans.sql");
const DELETE_PLAN_SQL: &str = include_str!("sql/delete_plan.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPlansRepository;

impl PgPlansRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_plan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        plan: PlanUuid,
        name: &str,
        price: u64,
        credits_per_month: i32,
    ) -> Result<Plan, sqlx::Error> {
        let price_i64 = i64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, Plan>(INSERT_PLAN_SQL)
            .bind(plan.into_uuid())
            .bind(name)
            .bind(price_i64)
            .bind(credits_per_month)
            .fetch_one(&mut **tx)
            .await
    }

    /// Looks a plan up inside the current tenant context. Writers referencing
    /// a plan call this first because foreign-key checks ignore row-level
    /// security.
    pub(crate) async fn find_plan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        plan: PlanUuid,
    ) -> Result<Option<Plan>, sqlx::Error> {
        query_as::<Postgres, Plan>(FIND_PLAN_SQL)
            .bind(plan.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_plans(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PlanWithSubscribers>, sqlx::Error> {
        query_as::<Postgres, PlanWithSubscribers>(LIST_PLANS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Deletes the plan unless it still has an active subscription. Returns
    /// the number of rows removed.
    pub(crate) async fn delete_plan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        plan: PlanUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_PLAN_SQL)
            .bind(plan.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for Plan {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: PlanUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price,
            credits_per_month: row.try_get("credits_per_month")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PlanWithSubscribers {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let count_i64: i64 = row.try_get("active_subscribers")?;

        let active_subscribers =
            u64::try_from(count_i64).map_err(|e| sqlx::Error::ColumnDecode {
                index: "active_subscribers".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            plan: Plan::from_row(row)?,
            active_subscribers,
        })
    }
}
