use std::path::PathBuf;

use clap::Parser;

use minipaste::config::Config;
use minipaste::db::Database;
use minipaste::server::{self, AppState};

/// A minimal pastebin web service.
#[derive(Parser)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let database = Database::connect(&config.database.url).await?;
    database.migrate().await?;

    server::run(AppState { config, database }).await
}
