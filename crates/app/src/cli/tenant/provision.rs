use clap::Args;
use navalha_app::{
    database,
    domain::tenants::{
        PgTenantsService, TenantsService,
        models::{ActorUuid, Provisioning},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ProvisionTenantArgs {
    /// Barbershop display name
    #[arg(long)]
    name: String,

    /// Full name of the owner profile to create
    #[arg(long)]
    owner_name: String,

    /// Actor UUID from the identity provider; generated when omitted
    #[arg(long)]
    actor_uuid: Option<Uuid>,

    /// Explicit URL slug; derived from the name when omitted
    #[arg(long)]
    slug: Option<String>,

    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ProvisionTenantArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgTenantsService::new(pool);
    let actor = args
        .actor_uuid
        .map_or_else(ActorUuid::new, ActorUuid::from_uuid);

    let context = service
        .provision(Provisioning {
            actor,
            full_name: args.owner_name,
            tenant_name: args.name,
            slug: args.slug,
        })
        .await
        .map_err(|error| format!("failed to provision tenant: {error}"))?;

    let tenant = service
        .get_tenant(context.tenant)
        .await
        .map_err(|error| format!("failed to read back tenant: {error}"))?;

    println!("tenant_uuid: {}", tenant.uuid);
    println!("tenant_name: {}", tenant.name);
    println!("tenant_slug: {}", tenant.slug);
    println!("actor_uuid: {}", context.actor);
    println!("owner_role: {}", context.role);

    Ok(())
}
