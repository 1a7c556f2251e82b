//! Batch jobs and HTTP serving for the Marquee catalog.
//!
//! Each entry point takes an explicit [`Settings`]; nothing here reads
//! global state. The `marquee` binary maps its subcommands onto
//! [`run_normalize`], [`run_build_db`] and [`serve`].

pub mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use marquee_dataset::{COLUMNS_TO_KEEP, Table, discover::discover_raw_input, normalize};
use marquee_store_sqlite::{LoadReport, SqliteStore, load};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use settings::Settings;

// ─── Normalizer job ──────────────────────────────────────────────────────────

/// Resolve the raw input, normalize it and write the cleaned CSV.
///
/// Returns the path of the cleaned file.
pub fn run_normalize(settings: &Settings) -> anyhow::Result<PathBuf> {
  let raw_path = match &settings.raw_input_path {
    Some(path) => path.clone(),
    None => discover_raw_input(&settings.data_dir, &settings.cleaned_output_path)
      .with_context(|| format!("no raw dataset found in {}", settings.data_dir.display()))?,
  };
  tracing::info!("reading raw dataset from {}", raw_path.display());

  let raw = Table::read_csv(&raw_path)
    .with_context(|| format!("failed to read {}", raw_path.display()))?;
  let (clean, _report) = normalize(&raw, &COLUMNS_TO_KEEP)
    .with_context(|| format!("failed to normalize {}", raw_path.display()))?;

  clean
    .write_csv(&settings.cleaned_output_path)
    .with_context(|| format!("failed to write {}", settings.cleaned_output_path.display()))?;

  Ok(settings.cleaned_output_path.clone())
}

// ─── Loader job ──────────────────────────────────────────────────────────────

/// Rebuild the store from the cleaned CSV.
pub async fn run_build_db(settings: &Settings) -> anyhow::Result<LoadReport> {
  let clean = Table::read_csv(&settings.cleaned_output_path).with_context(|| {
    format!("failed to read cleaned dataset {}", settings.cleaned_output_path.display())
  })?;

  load(&clean, &settings.store_path)
    .await
    .with_context(|| format!("failed to build store at {}", settings.store_path.display()))
}

// ─── Server ──────────────────────────────────────────────────────────────────

/// Build the full HTTP application for `store`.
pub fn app(store: SqliteStore) -> axum::Router {
  marquee_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http())
}

/// Serve the API until Ctrl-C.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {}", settings.store_path.display()))?;

  let address = format!("{}:{}", settings.host, settings.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(store))
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      tracing::info!("shutting down");
    })
    .await
    .context("server error")?;

  Ok(())
}
