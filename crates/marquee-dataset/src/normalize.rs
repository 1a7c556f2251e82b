//! The dataset normalizer.
//!
//! Turns a raw export into the cleaned table the schema loader consumes. The
//! steps run in a fixed order and the order is observable: deduplication
//! happens before date validation, so a duplicated id whose first occurrence
//! has a bad date disappears entirely.
//!
//! Ids are compared as integers, not as text: `7`, ` 7` and `7.0` are the
//! same movie, and the output carries the canonical `7`.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::info;

use crate::{Result, Table};

/// Columns retained from the raw export, in output order.
pub const COLUMNS_TO_KEEP: [&str; 13] = [
  "id",
  "title",
  "release_date",
  "vote_average",
  "vote_count",
  "status",
  "runtime",
  "adult",
  "budget",
  "revenue",
  "original_language",
  "popularity",
  "genres",
];

/// Canonical on-disk form of `release_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row counts for one normalizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
  pub input_rows:       usize,
  /// Rows dropped for an empty title or genres cell.
  pub missing_required: usize,
  /// Rows dropped because `id` is empty or not an integer.
  pub invalid_ids:      usize,
  /// Rows dropped because an earlier row had the same id.
  pub duplicates:       usize,
  /// Rows dropped because `release_date` did not parse.
  pub bad_dates:        usize,
  pub output_rows:      usize,
}

/// Project, filter, deduplicate and date-check `raw`.
///
/// `columns` must include `id`, `title`, `genres` and `release_date`, and
/// every entry must exist in `raw`.
pub fn normalize(raw: &Table, columns: &[&str]) -> Result<(Table, NormalizeReport)> {
  let source: Vec<usize> = columns
    .iter()
    .map(|c| raw.require_column(c))
    .collect::<Result<_>>()?;

  let position = |name: &str| -> Result<usize> {
    columns
      .iter()
      .position(|c| *c == name)
      .ok_or_else(|| crate::Error::MissingColumn(name.to_owned()))
  };
  let id_at = position("id")?;
  let title_at = position("title")?;
  let genres_at = position("genres")?;
  let date_at = position("release_date")?;

  let mut report = NormalizeReport { input_rows: raw.len(), ..Default::default() };
  let mut seen_ids: HashSet<i64> = HashSet::new();
  let mut rows = Vec::with_capacity(raw.len());

  for raw_row in &raw.rows {
    // (a) projection
    let mut row: Vec<String> = source
      .iter()
      .map(|&i| raw_row.get(i).cloned().unwrap_or_default())
      .collect();

    // (b) required fields
    if is_missing(&row[title_at]) || is_missing(&row[genres_at]) {
      report.missing_required += 1;
      continue;
    }

    let Some(id) = parse_int(row[id_at].trim()) else {
      report.invalid_ids += 1;
      continue;
    };
    row[id_at] = id.to_string();

    // (c) first occurrence wins
    if !seen_ids.insert(id) {
      report.duplicates += 1;
      continue;
    }

    // (d) release date
    match parse_release_date(&row[date_at]) {
      Some(date) => row[date_at] = date.format(DATE_FORMAT).to_string(),
      None => {
        report.bad_dates += 1;
        continue;
      }
    }

    rows.push(row);
  }

  report.output_rows = rows.len();
  info!(
    input = report.input_rows,
    missing_required = report.missing_required,
    invalid_ids = report.invalid_ids,
    duplicates = report.duplicates,
    bad_dates = report.bad_dates,
    output = report.output_rows,
    "normalized dataset"
  );

  let headers = columns.iter().map(|c| (*c).to_owned()).collect();
  Ok((Table::new(headers, rows), report))
}

fn is_missing(cell: &str) -> bool { cell.trim().is_empty() }

/// Integers, tolerating the `12.0` form pandas writes for integral floats.
pub fn parse_int(raw: &str) -> Option<i64> {
  raw.parse::<i64>().ok().or_else(|| {
    raw
      .parse::<f64>()
      .ok()
      .filter(|f| f.fract() == 0.0 && f.is_finite())
      .map(|f| f as i64)
  })
}

/// Parse a release date in any of the forms found in TMDB exports.
///
/// Returns `None` for empty or unparseable input. Timestamps are truncated
/// to their date.
pub fn parse_release_date(s: &str) -> Option<NaiveDate> {
  let s = s.trim();
  if s.is_empty() {
    return None;
  }

  for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
    if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
      return Some(date);
    }
  }
  for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(dt.date());
    }
  }
  DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
