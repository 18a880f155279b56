use clap::Args;
use navalha_app::{
    database,
    domain::tenants::{PgTenantsService, TenantsService},
};

#[derive(Debug, Args)]
pub(crate) struct ListTenantsArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListTenantsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let tenants = PgTenantsService::new(pool)
        .list_tenants()
        .await
        .map_err(|error| format!("failed to list tenants: {error}"))?;

    if tenants.is_empty() {
        println!("no tenants provisioned");
        return Ok(());
    }

    for tenant in tenants {
        println!("tenant_uuid: {}", tenant.uuid);
        println!("tenant_name: {}", tenant.name);
        println!("tenant_slug: {}", tenant.slug);
        println!("created_at: {}", tenant.created_at);
        println!();
    }

    Ok(())
}
