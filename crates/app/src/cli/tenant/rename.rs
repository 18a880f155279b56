use clap::Args;
use navalha_app::{
    database,
    domain::tenants::{PgTenantsService, TenantsService, models::TenantUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RenameTenantArgs {
    /// Tenant UUID to rename
    #[arg(long)]
    tenant_uuid: Uuid,

    /// New display name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RenameTenantArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgTenantsService::new(pool);

    let tenant = service
        .rename_tenant(TenantUuid::from_uuid(args.tenant_uuid), args.name)
        .await
        .map_err(|error| format!("failed to rename tenant: {error}"))?;

    println!("tenant_uuid: {}", tenant.uuid);
    println!("tenant_name: {}", tenant.name);

    Ok(())
}
