//! Persistence module split across logical submodules.

mod connection;
mod publishers;
mod reader;
mod schema;
mod writer;

pub use connection::ConnectionManager;
pub use publishers::{get_publishers, lookup_publisher};
pub use reader::{get_books, search_books};
pub use schema::{ensure_schema, seed_publishers};
pub use writer::{
    delete_book_and_references, insert_book, update_book, DEPENDENT_TABLES, PUBLICATION_TYPE,
};
