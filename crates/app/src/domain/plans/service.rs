//! Plans service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::error::{DatabaseError, ErrorKind};

use crate::{
    database::Db,
    domain::{
        plans::{
            errors::PlansServiceError,
            models::{NewPlan, Plan, PlanUuid, PlanWithSubscribers},
            repository::PgPlansRepository,
        },
        tenants::models::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgPlansService {
    db: Db,
    repository: PgPlansRepository,
}

impl PgPlansService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPlansRepository::new(),
        }
    }
}

fn blocked_by_subscriptions(error: &sqlx::Error) -> bool {
    matches!(
        error.as_database_error().map(DatabaseError::kind),
        Some(ErrorKind::ForeignKeyViolation)
    )
}

#[async_trait]
impl PlansService for PgPlansService {
    async fn create_plan(
        &self,
        tenant: TenantUuid,
        plan: NewPlan,
    ) -> Result<Plan, PlansServiceError> {
        let name = plan.name.trim().to_string();

        if name.is_empty() {
            return Err(PlansServiceError::InvalidName);
        }

        if plan.price == 0 {
            return Err(PlansServiceError::InvalidPrice);
        }

        if plan.credits_per_month < 1 {
            return Err(PlansServiceError::InvalidCredits);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let created = self
            .repository
            .insert_plan(&mut tx, plan.uuid, &name, plan.price, plan.credits_per_month)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_plans(
        &self,
        tenant: TenantUuid,
    ) -> Result<Vec<PlanWithSubscribers>, PlansServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let plans = self.repository.list_plans(&mut tx).await?;

        tx.commit().await?;

        Ok(plans)
    }

    async fn delete_plan(
        &self,
        tenant: TenantUuid,
        plan: PlanUuid,
    ) -> Result<(), PlansServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let deleted = match self.repository.delete_plan(&mut tx, plan).await {
            Ok(rows) => rows,
            // Cancelled enrollments keep their plan reference, so a plan with
            // any subscription history trips the foreign key here.
            Err(error) if blocked_by_subscriptions(&error) => {
                return Err(PlansServiceError::PlanInUse);
            }
            Err(error) => return Err(error.into()),
        };

        if deleted == 0 {
            // The guarded delete matched nothing: either an active enrollment
            // blocked it or the plan is not visible in this tenant.
            return match self.repository.find_plan(&mut tx, plan).await? {
                Some(_) => Err(PlansServiceError::PlanInUse),
                None => Err(PlansServiceError::NotFound),
            };
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PlansService: Send + Sync {
    /// Creates a new monthly plan.
    async fn create_plan(&self, tenant: TenantUuid, plan: NewPlan)
    -> Result<Plan, PlansServiceError>;

    /// Retrieves all plans with their active subscriber counts, ordered by
    /// name.
    async fn list_plans(
        &self,
        tenant: TenantUuid,
    ) -> Result<Vec<PlanWithSubscribers>, PlansServiceError>;

    /// Deletes a plan that no customer is enrolled in.
    async fn delete_plan(&self, tenant: TenantUuid, plan: PlanUuid)
    -> Result<(), PlansServiceError>;
}
