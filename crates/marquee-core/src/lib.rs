//! Core types and trait definitions for the Marquee movie catalog.
//!
//! This crate is free of HTTP, CSV and database dependencies. The dataset,
//! store and API crates all depend on it.

// Native `async fn` in traits; the `Send` bounds are spelled out on the trait.
#![allow(async_fn_in_trait)]

pub mod movie;
pub mod store;

pub use movie::{Genre, Movie, MovieGenre};
