//! [`Table`]: a header row plus string records, read from and written to CSV.
//!
//! Cells are kept as raw strings. An empty cell is a missing value; typed
//! interpretation happens in [`crate::normalize`] and [`crate::record`].

use std::{
  fs::{self, File},
  io::{self, Read, Write},
  path::Path,
};

use tracing::debug;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  pub headers: Vec<String>,
  pub rows:    Vec<Vec<String>>,
}

impl Table {
  pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
    Self { headers, rows }
  }

  /// Read a CSV file with a header row.
  ///
  /// A file that does not exist is reported as [`Error::InputNotFound`].
  pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
      io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
      _ => Error::Io(e),
    })?;
    let table = Self::from_reader(file)?;
    debug!(
      "read {} rows x {} columns from {}",
      table.rows.len(),
      table.headers.len(),
      path.display()
    );
    Ok(table)
  }

  pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.iter().map(str::to_owned).collect();
    let rows = rdr
      .records()
      .map(|record| record.map(|r| r.iter().map(str::to_owned).collect()))
      .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok(Self { headers, rows })
  }

  /// Write the table as CSV, creating parent directories as needed.
  pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    self.to_writer(file)?;
    debug!("wrote {} rows to {}", self.rows.len(), path.display());
    Ok(())
  }

  pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&self.headers)?;
    for row in &self.rows {
      wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
  }

  /// Position of `name` in the header row.
  pub fn column(&self, name: &str) -> Option<usize> {
    self.headers.iter().position(|h| h == name)
  }

  /// Like [`Table::column`], but a missing column is an error.
  pub fn require_column(&self, name: &str) -> Result<usize> {
    self
      .column(name)
      .ok_or_else(|| Error::MissingColumn(name.to_owned()))
  }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}
