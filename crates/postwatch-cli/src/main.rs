mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "postwatch-cli")]
#[command(about = "Check tracked creators for new posts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one polling cycle and print its statistics
    Check {
        /// Treat this as an automated run: send a heartbeat when nothing is new
        #[arg(long)]
        heartbeat: bool,
    },
    /// List configured creators
    Creators,
    /// Print the persisted seen-state
    State,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = postwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Check { heartbeat }) => commands::run_check(&config, heartbeat).await?,
        Some(Commands::Creators) => commands::run_creators(&config)?,
        Some(Commands::State) => commands::run_state(&config)?,
        None => println!("postwatch-cli: no command given; try `postwatch-cli --help`"),
    }

    Ok(())
}
