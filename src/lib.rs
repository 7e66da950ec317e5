//! Core library surface for the library catalog.
//!
//! The data-access layer maps one logical book onto the Publication, Author,
//! Book, PhysicalBook and BookAuthor tables and keeps every multi-table write
//! atomic. Front ends only talk to [`Catalog`] (or the free functions in
//! [`db`]) and render what comes back.
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use catalog::Catalog;
pub use config::{DatabaseSettings, PublisherSeed, Settings};
pub use db::{lookup_publisher, ConnectionManager};
pub use error::{CatalogError, Result};

/// The domain types that other layers manipulate.
pub use models::{AuthorName, Book, InsertedBook, NewBook, PhysicalDetails, Publisher};
