//! Test Helpers
//!
//! Seeding shortcuts for the current test tenant. Each goes through the real
//! service (and therefore the RLS-enforced app pool), so seeded rows behave
//! exactly like rows created by production code paths.

use crate::{
    domain::{
        customers::{
            CustomersService, CustomersServiceError,
            models::{CustomerUuid, NewCustomer},
        },
        plans::{
            PlansService, PlansServiceError,
            models::{NewPlan, PlanUuid},
        },
        services::{
            ServicesService, ServicesServiceError,
            models::{NewService, ServiceUuid},
        },
    },
    test::TestContext,
};

impl TestContext {
    /// Create a customer in the default test tenant.
    pub(crate) async fn create_customer(
        &self,
        name: &str,
    ) -> Result<CustomerUuid, CustomersServiceError> {
        let uuid = CustomerUuid::new();

        self.customers
            .create_customer(
                self.tenant_uuid,
                NewCustomer {
                    uuid,
                    name: name.to_string(),
                    phone: None,
                },
            )
            .await?;

        Ok(uuid)
    }

    /// Create a catalog service in the default test tenant.
    pub(crate) async fn create_service(
        &self,
        name: &str,
        price: u64,
    ) -> Result<ServiceUuid, ServicesServiceError> {
        let uuid = ServiceUuid::new();

        self.services
            .create_service(
                self.tenant_uuid,
                NewService {
                    uuid,
                    name: name.to_string(),
                    price,
                    duration_minutes: None,
                },
            )
            .await?;

        Ok(uuid)
    }

    /// Create a monthly plan in the default test tenant.
    pub(crate) async fn create_plan(
        &self,
        name: &str,
        price: u64,
        credits_per_month: i32,
    ) -> Result<PlanUuid, PlansServiceError> {
        let uuid = PlanUuid::new();

        self.plans
            .create_plan(
                self.tenant_uuid,
                NewPlan {
                    uuid,
                    name: name.to_string(),
                    price,
                    credits_per_month,
                },
            )
            .await?;

        Ok(uuid)
    }
}
