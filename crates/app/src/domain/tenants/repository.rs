//! Tenants Repository

use jiff_sqlx::{Time as SqlxTime, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::tenants::models::{ActorUuid, Profile, Tenant, TenantUuid};

const INSERT_TENANT_SQL: &str = include_str!("sql/insert_tenant.sql");
const UPSERT_PROFILE_SQL: &str = include_str!("sql/upsert_profile.sql");
const FIND_PROFILE_SQL: &str = include_str!("sql/find_profile.sql");
const GET_TENANT_SQL: &str = include_str!("sql/get_tenant.sql");
const RENAME_TENANT_SQL: &str = include_str!("sql/rename_tenant.sql");
const LIST_TENANTS_SQL: &str = include_str!("sql/list_tenants.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTenantsRepository;

impl PgTenantsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a tenant row. Runs on the privileged provisioning path, outside
    /// any tenant context.
    pub(crate) async fn insert_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        name: &str,
        slug: &str,
    ) -> Result<Tenant, sqlx::Error> {
        query_as::<Postgres, Tenant>(INSERT_TENANT_SQL)
            .bind(tenant.into_uuid())
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    /// Link the actor's profile to a tenant. Returns `None` when the profile
    /// is already linked elsewhere, in which case nothing was written.
    pub(crate) async fn upsert_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: ActorUuid,
        full_name: &str,
        tenant: TenantUuid,
    ) -> Result<Option<Profile>, sqlx::Error> {
        query_as::<Postgres, Profile>(UPSERT_PROFILE_SQL)
            .bind(actor.into_uuid())
            .bind(full_name)
            .bind(tenant.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_profile(
        &self,
        pool: &PgPool,
        actor: ActorUuid,
    ) -> Result<Option<Profile>, sqlx::Error> {
        query_as::<Postgres, Profile>(FIND_PROFILE_SQL)
            .bind(actor.into_uuid())
            .fetch_optional(pool)
            .await
    }

    pub(crate) async fn get_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Tenant, sqlx::Error> {
        query_as::<Postgres, Tenant>(GET_TENANT_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn rename_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Tenant, sqlx::Error> {
        query_as::<Postgres, Tenant>(RENAME_TENANT_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_tenants(&self, pool: &PgPool) -> Result<Vec<Tenant>, sqlx::Error> {
        query_as::<Postgres, Tenant>(LIST_TENANTS_SQL)
            .fetch_all(pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Tenant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TenantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            default_appointment_time: row
                .try_get::<SqlxTime, _>("default_appointment_time")?
                .to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Profile {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ActorUuid::from_uuid(row.try_get("uuid")?),
            full_name: row.try_get("full_name")?,
            role: row.try_get("role")?,
            tenant_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("tenant_uuid")?
                .map(TenantUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
