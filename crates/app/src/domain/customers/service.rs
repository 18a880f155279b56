//! Customers service.
//!
//! Customer updates also carry the desired membership state, so a name edit
//! and a plan change land in one transaction and never disagree.

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        customers::{
            errors::CustomersServiceError,
            models::{
                Customer, CustomerUpdate, CustomerUuid, CustomerWithPlan, Membership, NewCustomer,
                normalize_phone,
            },
            repository::PgCustomersRepository,
        },
        plans::repository::PgPlansRepository,
        subscriptions::{models::initial_billing_date, repository::PgSubscriptionsRepository},
        tenants::models::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
    plans: PgPlansRepository,
    subscriptions: PgSubscriptionsRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
            plans: PgPlansRepository::new(),
            subscriptions: PgSubscriptionsRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn create_customer(
        &self,
        tenant: TenantUuid,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError> {
        let name = customer.name.trim().to_string();

        if name.is_empty() {
            return Err(CustomersServiceError::InvalidName);
        }

        let phone = normalize_phone(customer.phone.as_deref());

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let created = self
            .repository
            .insert_customer(&mut tx, customer.uuid, &name, phone.as_deref())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomersServiceError> {
        let name = update.name.trim().to_string();

        if name.is_empty() {
            return Err(CustomersServiceError::InvalidName);
        }

        let phone = normalize_phone(update.phone.as_deref());

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let updated = self
            .repository
            .update_customer(&mut tx, customer, &name, phone.as_deref())
            .await?;

        match update.membership {
            Membership::Monthly(plan) => {
                self.plans
                    .find_plan(&mut tx, plan)
                    .await?
                    .ok_or(CustomersServiceError::InvalidPlan)?;

                self.subscriptions
                    .upsert_active(
                        &mut tx,
                        customer,
                        plan,
                        initial_billing_date(Zoned::now().date()),
                    )
                    .await?;
            }
            Membership::Casual => {
                self.subscriptions.cancel_active(&mut tx, customer).await?;
            }
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn get_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn list_customers(
        &self,
        tenant: TenantUuid,
    ) -> Result<Vec<CustomerWithPlan>, CustomersServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let customers = self.repository.list_customers(&mut tx).await?;

        tx.commit().await?;

        Ok(customers)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Creates a new customer. Name is trimmed and required; the phone is
    /// reduced to digits.
    async fn create_customer(
        &self,
        tenant: TenantUuid,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError>;

    /// Updates a customer's details and applies the requested membership
    /// state in the same transaction.
    async fn update_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<Customer, CustomersServiceError>;

    /// Retrieves all customers with their active plan names.
    async fn list_customers(
        &self,
        tenant: TenantUuid,
    ) -> Result<Vec<CustomerWithPlan>, CustomersServiceError>;
}
