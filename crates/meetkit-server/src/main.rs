use clap::{Parser, Subcommand};

mod api;
mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "meetkit", version, about = "Meeting scheduling analytics service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),
    /// Validate a meeting fixture and print a summary
    Check(commands::check::CheckArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Check(args) => {
            logging::init_minimal();
            commands::check::run(args)
        }
        Commands::Config { action } => {
            logging::init_minimal();
            commands::config::run(action)
        }
    }
}
