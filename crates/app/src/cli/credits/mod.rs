use clap::{Args, Subcommand};

mod rebuild;

#[derive(Debug, Args)]
pub(crate) struct CreditsCommand {
    #[command(subcommand)]
    command: CreditsSubcommand,
}

#[derive(Debug, Subcommand)]
enum CreditsSubcommand {
    Rebuild(rebuild::RebuildBalanceArgs),
}

pub(crate) async fn run(command: CreditsCommand) -> Result<(), String> {
    match command.command {
        CreditsSubcommand::Rebuild(args) => rebuild::run(args).await,
    }
}
