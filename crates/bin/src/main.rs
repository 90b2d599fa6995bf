use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, NotesCommand};
use output::OutputFormat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let format = OutputFormat::from_flag(cli.json);

    // The server logs its activity; one-shot commands only report problems.
    let default_level = match cli.command {
        Commands::Serve(_) => "notelock=info",
        _ => "notelock=warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Health(args) => commands::health::run(args, format).await,
        Commands::Notes(NotesCommand::List(args)) => commands::notes::list(args, format).await,
        Commands::Notes(NotesCommand::Lock(args)) => commands::notes::lock(args, format).await,
        Commands::Notes(NotesCommand::Unlock(args)) => commands::notes::unlock(args, format).await,
        Commands::Notes(NotesCommand::Delete(args)) => commands::notes::delete(args, format).await,
    }
}
