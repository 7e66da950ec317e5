//! Caller-facing handle over the data-access layer. A front end builds one
//! `Catalog` at startup and routes every read and write through it, so the
//! process shares a single connection without any global state.

use crate::config::Settings;
use crate::db::{self, ConnectionManager};
use crate::error::Result;
use crate::models::{Book, InsertedBook, NewBook, Publisher};

pub struct Catalog {
    connections: ConnectionManager,
}

impl Catalog {
    pub fn new(settings: &Settings) -> Self {
        Self::with_manager(ConnectionManager::new(
            settings.database.clone(),
            settings.publishers.clone(),
        ))
    }

    pub fn with_manager(connections: ConnectionManager) -> Self {
        Self { connections }
    }

    /// Catalog over a private in-memory database.
    pub fn in_memory() -> Self {
        Self::with_manager(ConnectionManager::in_memory())
    }

    pub fn insert_book(&mut self, book: &NewBook) -> Result<InsertedBook> {
        db::insert_book(self.connections.connection()?, book)
    }

    pub fn update_book(&mut self, new_title: &str, existing: &Book) -> Result<usize> {
        db::update_book(self.connections.connection()?, new_title, existing)
    }

    pub fn delete_book_and_references(&mut self, book_id: i64) -> Result<()> {
        db::delete_book_and_references(self.connections.connection()?, book_id)
    }

    pub fn get_books(&mut self) -> Result<Vec<Book>> {
        db::get_books(self.connections.connection()?)
    }

    pub fn search_books(&mut self, pattern: &str) -> Result<Vec<Book>> {
        db::search_books(self.connections.connection()?, pattern)
    }

    pub fn get_publishers(&mut self) -> Result<Vec<Publisher>> {
        db::get_publishers(self.connections.connection()?)
    }

    /// Load the publisher table and resolve `id` against it.
    pub fn publisher(&mut self, id: i64) -> Result<Option<Publisher>> {
        let publishers = self.get_publishers()?;
        Ok(db::lookup_publisher(&publishers, id).cloned())
    }

    /// Raw access to the connection manager. Writes made through it bypass the
    /// transactional sequences in [`db`]; integration tests use it to arrange
    /// fixtures.
    #[doc(hidden)]
    pub fn connections(&mut self) -> &mut ConnectionManager {
        &mut self.connections
    }

    pub fn close(&mut self) -> Result<()> {
        self.connections.close()
    }
}
