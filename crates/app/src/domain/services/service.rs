//! Services service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        services::{
            errors::ServicesServiceError,
            models::{NewService, Service, ServiceUuid},
            repository::PgServicesRepository,
        },
        tenants::models::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgServicesService {
    db: Db,
    repository: PgServicesRepository,
}

impl PgServicesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgServicesRepository::new(),
        }
    }
}

#[async_trait]
impl ServicesService for PgServicesService {
    async fn create_service(
        &self,
        tenant: TenantUuid,
        service: NewService,
    ) -> Result<Service, ServicesServiceError> {
        let name = service.name.trim().to_string();

        if name.is_empty() {
            return Err(ServicesServiceError::InvalidName);
        }

        if service.price == 0 {
            return Err(ServicesServiceError::InvalidPrice);
        }

        if service.duration_minutes.is_some_and(|minutes| minutes <= 0) {
            return Err(ServicesServiceError::InvalidDuration);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let created = self
            .repository
            .insert_service(
                &mut tx,
                service.uuid,
                &name,
                service.price,
                service.duration_minutes,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_service(
        &self,
        tenant: TenantUuid,
        service: ServiceUuid,
    ) -> Result<Service, ServicesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let service = self.repository.get_service(&mut tx, service).await?;

        tx.commit().await?;

        Ok(service)
    }

    async fn list_services(&self, tenant: TenantUuid) -> Result<Vec<Service>, ServicesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let services = self.repository.list_services(&mut tx).await?;

        tx.commit().await?;

        Ok(services)
    }
}

#[automock]
#[async_trait]
pub trait ServicesService: Send + Sync {
    /// Creates a new bookable service.
    async fn create_service(
        &self,
        tenant: TenantUuid,
        service: NewService,
    ) -> Result<Service, ServicesServiceError>;

    /// Retrieve a single service.
    async fn get_service(
        &self,
        tenant: TenantUuid,
        service: ServiceUuid,
    ) -> Result<Service, ServicesServiceError>;

    /// Retrieves all services, ordered by name.
    async fn list_services(&self, tenant: TenantUuid)
    -> Result<Vec<Service>, ServicesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_service(name: &str, price: u64, duration_minutes: Option<i32>) -> NewService {
        NewService {
            uuid: ServiceUuid::new(),
            name: name.to_string(),
            price,
            duration_minutes,
        }
    }

    #[tokio::test]
    async fn create_service_returns_persisted_row() -> TestResult {
        let ctx = TestContext::new().await;

        let service = ctx
            .services
            .create_service(ctx.tenant_uuid, new_service("Haircut", 4500, Some(30)))
            .await?;

        assert_eq!(service.name, "Haircut");
        assert_eq!(service.price, 4500);
        assert_eq!(service.duration_minutes, Some(30));

        Ok(())
    }

    #[tokio::test]
    async fn create_service_blank_name_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .services
            .create_service(ctx.tenant_uuid, new_service("  ", 4500, None))
            .await;

        assert!(
            matches!(result, Err(ServicesServiceError::InvalidName)),
            "expected InvalidName, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_service_zero_price_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .services
            .create_service(ctx.tenant_uuid, new_service("Freebie", 0, None))
            .await;

        assert!(
            matches!(result, Err(ServicesServiceError::InvalidPrice)),
            "expected InvalidPrice, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_service_non_positive_duration_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .services
            .create_service(ctx.tenant_uuid, new_service("Beard Trim", 2500, Some(0)))
            .await;

        assert!(
            matches!(result, Err(ServicesServiceError::InvalidDuration)),
            "expected InvalidDuration, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_service_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let service = new_service("Haircut", 4500, None);

        ctx.services
            .create_service(ctx.tenant_uuid, service.clone())
            .await?;

        let result = ctx.services.create_service(ctx.tenant_uuid, service).await;

        assert!(
            matches!(result, Err(ServicesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_services_is_ordered_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.services
            .create_service(ctx.tenant_uuid, new_service("Shave", 3000, Some(20)))
            .await?;
        ctx.services
            .create_service(ctx.tenant_uuid, new_service("Haircut", 4500, Some(30)))
            .await?;

        let services = ctx.services.list_services(ctx.tenant_uuid).await?;
        let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Haircut", "Shave"]);

        Ok(())
    }

    #[tokio::test]
    async fn get_service_is_invisible_across_tenants() -> TestResult {
        let ctx = TestContext::new().await;
        let other_tenant = ctx.create_tenant("Other Shop").await;

        let service = ctx
            .services
            .create_service(ctx.tenant_uuid, new_service("Haircut", 4500, None))
            .await?;

        let result = ctx.services.get_service(other_tenant, service.uuid).await;

        assert!(
            matches!(result, Err(ServicesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
