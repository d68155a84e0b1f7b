use clap::{Args, Subcommand};

mod prune;

#[derive(Debug, Args)]
pub(crate) struct MediaCommand {
    #[command(subcommand)]
    command: MediaSubcommand,
}

#[derive(Debug, Subcommand)]
enum MediaSubcommand {
    /// Delete stored images no product references
    Prune(prune::PruneArgs),
}

pub(crate) async fn run(command: MediaCommand) -> Result<(), String> {
    match command.command {
        MediaSubcommand::Prune(args) => prune::run(args).await,
    }
}
