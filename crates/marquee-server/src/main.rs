//! `marquee`: build and serve the movie catalog.
//!
//! ```
//! marquee normalize   # raw CSV (or ZIP) -> data/movies_clean.csv
//! marquee build-db    # data/movies_clean.csv -> db/movies.db
//! marquee serve       # HTTP API on 127.0.0.1:8000
//! ```
//!
//! Paths and the listen address come from `marquee.toml` (or `--config`)
//! and `MARQUEE_*` environment variables.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use marquee_server::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Marquee movie catalog")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "marquee.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Clean the raw dataset into the cleaned CSV.
  Normalize,
  /// Drop and rebuild the SQLite store from the cleaned CSV.
  BuildDb,
  /// Serve the read-only HTTP API.
  Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;

  match cli.command {
    Command::Normalize => {
      let path = marquee_server::run_normalize(&settings)?;
      println!("Clean dataset saved at: {}", path.display());
    }
    Command::BuildDb => {
      marquee_server::run_build_db(&settings).await?;
      println!("Database created at: {}", settings.store_path.display());
    }
    Command::Serve => marquee_server::serve(&settings).await?,
  }

  Ok(())
}
