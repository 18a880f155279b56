use clap::{Args, Subcommand};

mod renew_due;

#[derive(Debug, Args)]
pub(crate) struct SubscriptionsCommand {
    #[command(subcommand)]
    command: SubscriptionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum SubscriptionsSubcommand {
    RenewDue(renew_due::RenewDueArgs),
}

pub(crate) async fn run(command: SubscriptionsCommand) -> Result<(), String> {
    match command.command {
        SubscriptionsSubcommand::RenewDue(args) => renew_due::run(args).await,
    }
}
