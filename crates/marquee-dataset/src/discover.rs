//! Locating the raw dataset when no input path is configured.
//!
//! The data directory may hold the export as a ZIP archive, as a loose CSV,
//! or both. Discovery never guesses: more than one archive, or anything other
//! than exactly one raw CSV candidate, is an error.

use std::{
  fs::{self, File},
  io,
  path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Find the single raw CSV in `data_dir`, extracting it from the single ZIP
/// archive there first if needed.
///
/// `cleaned_path` is never returned as a candidate, nor is any CSV whose file
/// stem contains `clean`.
pub fn discover_raw_input(data_dir: &Path, cleaned_path: &Path) -> Result<PathBuf> {
  if !data_dir.is_dir() {
    return Err(Error::InputNotFound(data_dir.to_path_buf()));
  }

  let archives = list_with_extension(data_dir, "zip")?;
  match archives.len() {
    0 => debug!("no archive in {}", data_dir.display()),
    1 => {
      let archive = &archives[0];
      let extracted = extract_csv_members(archive, data_dir)?;
      info!("extracted {} csv file(s) from {}", extracted.len(), archive.display());
    }
    _ => {
      return Err(Error::AmbiguousInput {
        dir:        data_dir.to_path_buf(),
        candidates: archives,
      });
    }
  }

  let cleaned = fs::canonicalize(cleaned_path).ok();
  let mut candidates: Vec<PathBuf> = list_with_extension(data_dir, "csv")?
    .into_iter()
    .filter(|p| !is_cleaned_name(p))
    .filter(|p| cleaned.is_none() || fs::canonicalize(p).ok() != cleaned)
    .collect();

  match candidates.len() {
    0 => Err(Error::InputNotFound(data_dir.to_path_buf())),
    1 => {
      let found = candidates.remove(0);
      debug!("raw input discovered at {}", found.display());
      Ok(found)
    }
    _ => Err(Error::AmbiguousInput { dir: data_dir.to_path_buf(), candidates }),
  }
}

fn is_cleaned_name(path: &Path) -> bool {
  path
    .file_stem()
    .map(|s| s.to_string_lossy().to_lowercase().contains("clean"))
    .unwrap_or(false)
}

fn has_extension(path: &Path, ext: &str) -> bool {
  path
    .extension()
    .map(|e| e.eq_ignore_ascii_case(ext))
    .unwrap_or(false)
}

/// Regular files in `dir` with extension `ext`, sorted by path.
fn list_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
  let mut found = Vec::new();
  for entry in fs::read_dir(dir)? {
    let path = entry?.path();
    if path.is_file() && has_extension(&path, ext) {
      found.push(path);
    }
  }
  found.sort();
  Ok(found)
}

/// Extract every `.csv` member of `archive` into `dir`, flattening any
/// directory structure. Members whose target already exists are skipped.
fn extract_csv_members(archive: &Path, dir: &Path) -> Result<Vec<PathBuf>> {
  let mut zip = zip::ZipArchive::new(File::open(archive)?)?;
  let mut extracted = Vec::new();

  for i in 0..zip.len() {
    let mut member = zip.by_index(i)?;
    if member.is_dir() {
      continue;
    }

    let Some(name) = member.enclosed_name() else {
      warn!("skipping archive member with unsafe path: {:?}", member.name());
      continue;
    };
    if !has_extension(&name, "csv") {
      continue;
    }
    let Some(file_name) = name.file_name() else {
      continue;
    };

    let target = dir.join(file_name);
    if target.exists() {
      debug!("{} already extracted", target.display());
      continue;
    }

    let mut out = File::create(&target)?;
    io::copy(&mut member, &mut out)?;
    extracted.push(target);
  }

  Ok(extracted)
}
