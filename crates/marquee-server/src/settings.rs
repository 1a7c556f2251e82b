//! Runtime settings, read from an optional TOML file overlaid by
//! `MARQUEE_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Every path and address the jobs and the server need.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Searched for the raw dataset when `raw_input_path` is unset.
  pub data_dir:            PathBuf,
  pub raw_input_path:      Option<PathBuf>,
  pub cleaned_output_path: PathBuf,
  pub store_path:          PathBuf,
  pub host:                String,
  pub port:                u16,
}

impl Settings {
  /// Load settings from `file` (if it exists) and the environment, on top of
  /// the built-in defaults. A leading `~/` in any path is expanded.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    let settings: Settings = config::Config::builder()
      .set_default("data_dir", "data")?
      .set_default("cleaned_output_path", "data/movies_clean.csv")?
      .set_default("store_path", "db/movies.db")?
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8000_i64)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("MARQUEE"))
      .build()?
      .try_deserialize()?;

    Ok(settings.expanded())
  }

  fn expanded(self) -> Self {
    Self {
      data_dir:            expand_tilde(&self.data_dir),
      raw_input_path:      self.raw_input_path.as_deref().map(expand_tilde),
      cleaned_output_path: expand_tilde(&self.cleaned_output_path),
      store_path:          expand_tilde(&self.store_path),
      ..self
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
