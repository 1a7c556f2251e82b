//! SQLite backend for the Marquee catalog.
//!
//! Two halves share one schema:
//!
//! - [`load`] drops and rebuilds the database from a cleaned table inside a
//!   single transaction.
//! - [`SqliteStore`] serves reads through [`marquee_core::store::CatalogStore`],
//!   opening a fresh [`tokio_rusqlite`] connection per call.

mod encode;
mod load;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use load::{LoadReport, load};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
