//! Credits Repository
//!
//! Grant and consume are exposed at the repository level so sibling domains
//! (appointments, subscriptions) can move credits inside their own tenant
//! transactions.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    credits::models::{CreditTransaction, TransactionType, TransactionUuid},
    customers::models::CustomerUuid,
};

const INSERT_TRANSACTION_SQL: &str = include_str!("sql/insert_transaction.sql");
const ADD_TO_BALANCE_SQL: &str = include_str!("sql/add_to_balance.sql");
const DECREMENT_BALANCE_SQL: &str = include_str!("sql/decrement_balance.sql");
const GET_BALANCE_SQL: &str = include_str!("sql/get_balance.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");
const SUM_TRANSACTIONS_SQL: &str = include_str!("sql/sum_transactions.sql");
const SET_BALANCE_SQL: &str = include_str!("sql/set_balance.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCreditsRepository;

impl PgCreditsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Appends a ledger entry and adds its amount to the balance, creating
    /// the balance row on first use. Returns the new balance.
    pub(crate) async fn grant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        amount: i32,
        transaction_type: TransactionType,
        description: Option<&str>,
    ) -> Result<i32, sqlx::Error> {
        self.insert_transaction(tx, customer, amount, transaction_type, description)
            .await?;

        query_scalar::<Postgres, i32>(ADD_TO_BALANCE_SQL)
            .bind(Uuid::now_v7())
            .bind(customer.into_uuid())
            .bind(amount)
            .fetch_one(&mut **tx)
            .await
    }

    /// Decrements the balance if and only if it covers `amount`, then appends
    /// the negative `usage` entry. Returns the new balance, or `None` without
    /// writing anything when credits are insufficient.
    pub(crate) async fn consume(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        amount: i32,
        description: Option<&str>,
    ) -> Result<Option<i32>, sqlx::Error> {
        let Some(balance) = query_scalar::<Postgres, i32>(DECREMENT_BALANCE_SQL)
            .bind(customer.into_uuid())
            .bind(amount)
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        self.insert_transaction(tx, customer, -amount, TransactionType::Usage, description)
            .await?;

        Ok(Some(balance))
    }

    pub(crate) async fn insert_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        amount: i32,
        transaction_type: TransactionType,
        description: Option<&str>,
    ) -> Result<CreditTransaction, sqlx::Error> {
        query_as::<Postgres, CreditTransaction>(INSERT_TRANSACTION_SQL)
            .bind(TransactionUuid::new().into_uuid())
            .bind(customer.into_uuid())
            .bind(amount)
            .bind(transaction_type)
            .bind(description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<i32>, sqlx::Error> {
        query_scalar::<Postgres, i32>(GET_BALANCE_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<CreditTransaction>, sqlx::Error> {
        query_as::<Postgres, CreditTransaction>(LIST_TRANSACTIONS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn sum_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<i32, sqlx::Error> {
        query_scalar::<Postgres, i32>(SUM_TRANSACTIONS_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        balance: i32,
    ) -> Result<i32, sqlx::Error> {
        query_scalar::<Postgres, i32>(SET_BALANCE_SQL)
            .bind(Uuid::now_v7())
            .bind(customer.into_uuid())
            .bind(balance)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CreditTransaction {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TransactionUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            amount: row.try_get("amount")?,
            transaction_type: row.try_get("type")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
