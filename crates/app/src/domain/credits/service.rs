//! Credits service.
//!
//! The transaction log is the system of record; `customer_credits.balance`
//! is a denormalized running total kept in step with it. Consumption goes
//! through a conditional decrement so concurrent bookings can never drive a
//! balance below zero.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        credits::{
            errors::CreditsServiceError,
            models::{CreditTransaction, TransactionType},
            repository::PgCreditsRepository,
        },
        customers::{models::CustomerUuid, repository::PgCustomersRepository},
        tenants::models::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCreditsService {
    db: Db,
    repository: PgCreditsRepository,
    customers: PgCustomersRepository,
}

impl PgCreditsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCreditsRepository::new(),
            customers: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CreditsService for PgCreditsService {
    #[tracing::instrument(
        name = "credits.service.grant",
        skip(self, description),
        fields(tenant_uuid = %tenant, customer_uuid = %customer, amount, transaction_type = transaction_type.as_str()),
        err
    )]
    async fn grant(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        amount: i32,
        transaction_type: TransactionType,
        description: Option<String>,
    ) -> Result<i32, CreditsServiceError> {
        if amount <= 0 {
            return Err(CreditsServiceError::InvalidAmount);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(CreditsServiceError::CustomerNotFound);
        }

        let balance = self
            .repository
            .grant(
                &mut tx,
                customer,
                amount,
                transaction_type,
                description.as_deref(),
            )
            .await?;

        tx.commit().await?;

        info!(balance, "granted credits");

        Ok(balance)
    }

    #[tracing::instrument(
        name = "credits.service.consume",
        skip(self),
        fields(tenant_uuid = %tenant, customer_uuid = %customer, amount),
        err
    )]
    async fn consume(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        amount: i32,
    ) -> Result<i32, CreditsServiceError> {
        if amount <= 0 {
            return Err(CreditsServiceError::InvalidAmount);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(CreditsServiceError::CustomerNotFound);
        }

        let Some(balance) = self.repository.consume(&mut tx, customer, amount, None).await? else {
            return Err(CreditsServiceError::InsufficientCredits);
        };

        tx.commit().await?;

        info!(balance, "consumed credits");

        Ok(balance)
    }

    #[tracing::instrument(
        name = "credits.service.buy_package",
        skip(self),
        fields(tenant_uuid = %tenant, customer_uuid = %customer, quantity, bonus),
        err
    )]
    async fn buy_package(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        quantity: i32,
        bonus: i32,
    ) -> Result<i32, CreditsServiceError> {
        if quantity <= 0 || bonus < 0 {
            return Err(CreditsServiceError::InvalidAmount);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(CreditsServiceError::CustomerNotFound);
        }

        let mut balance = self
            .repository
            .grant(&mut tx, customer, quantity, TransactionType::Purchase, None)
            .await?;

        if bonus > 0 {
            balance = self
                .repository
                .grant(&mut tx, customer, bonus, TransactionType::Bonus, None)
                .await?;
        }

        tx.commit().await?;

        info!(balance, "sold credit package");

        Ok(balance)
    }

    async fn balance(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<i32, CreditsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(CreditsServiceError::CustomerNotFound);
        }

        let balance = self.repository.get_balance(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(balance.unwrap_or(0))
    }

    async fn history(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<Vec<CreditTransaction>, CreditsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(CreditsServiceError::CustomerNotFound);
        }

        let transactions = self.repository.list_transactions(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(transactions)
    }

    #[tracing::instrument(
        name = "credits.service.rebuild_balance",
        skip(self),
        fields(tenant_uuid = %tenant, customer_uuid = %customer),
        err
    )]
    async fn rebuild_balance(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<i32, CreditsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if !self.customers.customer_exists(&mut tx, customer).await? {
            return Err(CreditsServiceError::CustomerNotFound);
        }

        let total = self.repository.sum_transactions(&mut tx, customer).await?;
        let balance = self.repository.set_balance(&mut tx, customer, total).await?;

        tx.commit().await?;

        info!(balance, "rebuilt balance from transaction log");

        Ok(balance)
    }
}

#[automock]
#[async_trait]
pub trait CreditsService: Send + Sync {
    /// Appends a positive ledger entry and returns the new balance.
    async fn grant(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        amount: i32,
        transaction_type: TransactionType,
        description: Option<String>,
    ) -> Result<i32, CreditsServiceError>;

    /// Spends credits, failing with `InsufficientCredits` when the balance
    /// does not cover the amount. Returns the new balance.
    async fn consume(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        amount: i32,
    ) -> Result<i32, CreditsServiceError>;

    /// Sells a credit package: a `purchase` entry for `quantity` plus a
    /// `bonus` entry when `bonus` is non-zero, in one transaction.
    async fn buy_package(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        quantity: i32,
        bonus: i32,
    ) -> Result<i32, CreditsServiceError>;

    /// Current balance; zero when the customer has no ledger activity yet.
    async fn balance(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<i32, CreditsServiceError>;

    /// Ledger entries, newest first.
    async fn history(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<Vec<CreditTransaction>, CreditsServiceError>;

    /// Recomputes the balance as the sum of the customer's ledger entries and
    /// stores it. The log is authoritative; the balance row is a cache.
    async fn rebuild_balance(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<i32, CreditsServiceError>;
}
