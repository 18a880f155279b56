//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, query, query_as};

use crate::domain::tenants::models::TenantUuid;

/// SQL used to set tenant context for row-level security.
pub const SET_TENANT_CONTEXT_SQL: &str = "SELECT set_config('app.current_tenant_uuid', $1, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction and set tenant context for the current tenant.
    ///
    /// Repository SQL filters on `app.current_tenant_uuid` directly, and the
    /// RLS policies enforce the same scope for the restricted app role. The
    /// explicit predicates keep privileged maintenance connections (which own
    /// the tables and so are exempt from RLS) correctly scoped too.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting tenant context fails.
    pub async fn begin_tenant_transaction(
        &self,
        tenant: TenantUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_TENANT_CONTEXT_SQL)
            .bind(tenant.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Verify the connected role is subject to row-level security.
///
/// Superusers and `BYPASSRLS` roles silently ignore the tenant isolation
/// policies, so refusing to start with one is safer than serving cross-tenant
/// data.
///
/// # Errors
///
/// Returns an error when the role check query fails or the role can bypass RLS.
pub async fn ensure_rls_enforced_role(pool: &PgPool) -> Result<(), sqlx::Error> {
    let (role, superuser, bypassrls): (String, bool, bool) =
        query_as("SELECT rolname, rolsuper, rolbypassrls FROM pg_roles WHERE rolname = current_user")
            .fetch_one(pool)
            .await?;

    if superuser || bypassrls {
        return Err(sqlx::Error::Configuration(
            format!("role `{role}` bypasses row-level security; connect with a restricted role")
                .into(),
        ));
    }

    Ok(())
}
