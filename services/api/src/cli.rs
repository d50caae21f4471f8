use crate::rank::{run_quote, run_rank, QuoteArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use conciergerie::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Conciergerie Directory",
    about = "Serve and inspect the conciergerie comparison catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect a catalog export from the command line
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Rank and filter the offerings of a catalog snapshot
    Rank(RankArgs),
    /// Price a subscription plan and show the ranking points it grants
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog {
            command: CatalogCommand::Rank(args),
        } => run_rank(args),
        Command::Catalog {
            command: CatalogCommand::Quote(args),
        } => {
            run_quote(args);
            Ok(())
        }
    }
}
