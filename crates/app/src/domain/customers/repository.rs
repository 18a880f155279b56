//! Customers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::customers::models::{Customer, CustomerUuid, CustomerWithPlan};

const INSERT_CUSTOMER_SQL: &str = include_str!("sql/insert_customer.sql");
const UPDATE_CUSTOMER_SQL: &str = include_str!("sql/update_customer.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const LIST_CUSTOMERS_SQL: &str = include_str!("sql/list_customers.sql");
const CUSTOMER_EXISTS_SQL: &str = include_str!("sql/customer_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        name: &str,
        phone: Option<&str>,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(INSERT_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .bind(name)
            .bind(phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        name: &str,
        phone: Option<&str>,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(UPDATE_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .bind(name)
            .bind(phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CustomerWithPlan>, sqlx::Error> {
        query_as::<Postgres, CustomerWithPlan>(LIST_CUSTOMERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Whether the customer is visible inside the current tenant context.
    ///
    /// Foreign-key checks ignore row-level security, so writers referencing a
    /// customer call this first to keep cross-tenant ids out.
    pub(crate) async fn customer_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CUSTOMER_EXISTS_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerWithPlan {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            customer: Customer::from_row(row)?,
            plan_name: row.try_get("plan_name")?,
        })
    }
}
