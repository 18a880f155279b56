//! Tenants service.
//!
//! Covers the two privileged directory operations (provisioning a signup and
//! resolving an actor to its tenant scope) plus the tenant-scoped reads and
//! renames used by the API surface.

use async_trait::async_trait;
use mockall::automock;
use rand::Rng;
use sqlx::PgPool;

use crate::{
    database::Db,
    domain::tenants::{
        errors::TenantsServiceError,
        models::{ActorUuid, Provisioning, Tenant, TenantContext, TenantUuid, slugify},
        repository::PgTenantsRepository,
    },
};

/// Unique constraint backing tenant slugs.
const SLUG_CONSTRAINT: &str = "tenants_slug_key";

/// Number of suffixed slugs tried before a collision becomes an error.
const SLUG_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct PgTenantsService {
    pool: PgPool,
    db: Db,
    repository: PgTenantsRepository,
}

impl PgTenantsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            db: Db::new(pool.clone()),
            pool,
            repository: PgTenantsRepository::new(),
        }
    }

    fn suffixed(base: &str) -> String {
        const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

        let mut rng = rand::thread_rng();
        let suffix: String = (0..4)
            .map(|_| char::from(CHARS[rng.gen_range(0..CHARS.len())]))
            .collect();

        format!("{base}-{suffix}")
    }
}

fn violates_constraint(error: &sqlx::Error, constraint: &str) -> bool {
    error
        .as_database_error()
        .and_then(|db_error| db_error.constraint())
        == Some(constraint)
}

#[async_trait]
impl TenantsService for PgTenantsService {
    async fn provision(
        &self,
        provisioning: Provisioning,
    ) -> Result<TenantContext, TenantsServiceError> {
        let full_name = provisioning.full_name.trim().to_string();
        let tenant_name = provisioning.tenant_name.trim().to_string();

        if full_name.is_empty() || tenant_name.is_empty() {
            return Err(TenantsServiceError::InvalidName);
        }

        // An explicit slug is honoured verbatim; a derived one gets retried
        // with a random suffix when another tenant already claimed it.
        let (base_slug, attempts) = match &provisioning.slug {
            Some(slug) => (slugify(slug), 1),
            None => (slugify(&tenant_name), SLUG_ATTEMPTS),
        };

        let mut slug = base_slug.clone();

        for attempt in 0..attempts {
            let mut tx = self.pool.begin().await?;
            let tenant_uuid = TenantUuid::new();

            match self
                .repository
                .insert_tenant(&mut tx, tenant_uuid, &tenant_name, &slug)
                .await
            {
                Ok(_) => {}
                Err(error)
                    if violates_constraint(&error, SLUG_CONSTRAINT) && attempt + 1 < attempts =>
                {
                    slug = Self::suffixed(&base_slug);
                    continue;
                }
                Err(error) => return Err(error.into()),
            }

            let Some(profile) = self
                .repository
                .upsert_profile(&mut tx, provisioning.actor, &full_name, tenant_uuid)
                .await?
            else {
                // Actor already belongs to a tenant. Dropping the transaction
                // rolls the new tenant row back; report the existing linkage
                // so provisioning stays idempotent.
                drop(tx);

                return self.resolve_actor(provisioning.actor).await;
            };

            tx.commit().await?;

            return Ok(TenantContext {
                tenant: tenant_uuid,
                actor: profile.uuid,
                full_name: profile.full_name,
                role: profile.role,
            });
        }

        Err(TenantsServiceError::AlreadyExists)
    }

    async fn resolve_actor(&self, actor: ActorUuid) -> Result<TenantContext, TenantsServiceError> {
        let profile = self
            .repository
            .find_profile(&self.pool, actor)
            .await?
            .ok_or(TenantsServiceError::NoTenant)?;

        let tenant = profile.tenant_uuid.ok_or(TenantsServiceError::NoTenant)?;

        Ok(TenantContext {
            tenant,
            actor: profile.uuid,
            full_name: profile.full_name,
            role: profile.role,
        })
    }

    async fn get_tenant(&self, tenant: TenantUuid) -> Result<Tenant, TenantsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let tenant = self.repository.get_tenant(&mut tx).await?;

        tx.commit().await?;

        Ok(tenant)
    }

    async fn rename_tenant(
        &self,
        tenant: TenantUuid,
        name: String,
    ) -> Result<Tenant, TenantsServiceError> {
        let name = name.trim().to_string();

        if name.is_empty() {
            return Err(TenantsServiceError::InvalidName);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let renamed = self.repository.rename_tenant(&mut tx, &name).await?;

        tx.commit().await?;

        Ok(renamed)
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantsServiceError> {
        self.repository
            .list_tenants(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Tenant directory operations.
pub trait TenantsService: Send + Sync {
    /// Provision a signup: create a tenant and link the actor's profile to it
    /// as owner, atomically. Idempotent for an already-provisioned actor.
    async fn provision(
        &self,
        provisioning: Provisioning,
    ) -> Result<TenantContext, TenantsServiceError>;

    /// Resolve an authenticated actor to its tenant scope.
    async fn resolve_actor(&self, actor: ActorUuid) -> Result<TenantContext, TenantsServiceError>;

    /// Fetch the current tenant's directory row.
    async fn get_tenant(&self, tenant: TenantUuid) -> Result<Tenant, TenantsServiceError>;

    /// Change the tenant display name. The slug never changes after signup.
    async fn rename_tenant(
        &self,
        tenant: TenantUuid,
        name: String,
    ) -> Result<Tenant, TenantsServiceError>;

    /// List every tenant. Privileged; used by maintenance jobs, not the API.
    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantsServiceError>;
}
