//! Write sequences for books. Each public function runs as one transaction:
//! it either commits every statement or leaves the database untouched, and
//! the connection is back in auto-commit mode on every exit path.

use rusqlite::{params, Connection, Params, Transaction};
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::models::{AuthorName, Book, InsertedBook, NewBook};

/// `Publication.Type` for everything this catalog writes.
pub const PUBLICATION_TYPE: &str = "Book";

/// Tables whose rows reference `Book.BookID`, cleared before the book itself.
pub const DEPENDENT_TABLES: [&str; 4] = ["PhysicalBook", "AudioBook", "EBook", "BookAuthor"];

/// Run `body` inside a transaction and commit only if it succeeds. Dropping
/// the `Transaction` without committing rolls it back, so `?` inside `body`
/// is always safe.
fn in_transaction<T>(
    conn: &mut Connection,
    operation: &'static str,
    body: impl FnOnce(&Transaction<'_>) -> Result<T>,
) -> Result<T> {
    let tx = conn.transaction()?;
    match body(&tx) {
        Ok(value) => {
            tx.commit()?;
            debug!(operation, "transaction committed");
            Ok(value)
        }
        Err(err) => {
            warn!(operation, "{err}, rolling back");
            if let Err(rollback_err) = tx.rollback() {
                warn!(operation, "rollback failed: {rollback_err}");
            }
            Err(err)
        }
    }
}

/// Execute an insert and hand back the row id SQLite generated for it.
fn insert_returning_id<P: Params>(
    conn: &Connection,
    table: &'static str,
    sql: &str,
    params: P,
) -> Result<i64> {
    let affected = conn.execute(sql, params)?;
    if affected == 0 {
        return Err(CatalogError::NoGeneratedKey { table });
    }
    Ok(conn.last_insert_rowid())
}

fn insert_publication(conn: &Connection, title: &str, publisher_id: i64) -> Result<i64> {
    insert_returning_id(
        conn,
        "Publication",
        "INSERT INTO Publication (Title, PublisherID, Type) VALUES (?1, ?2, ?3)",
        params![title, publisher_id, PUBLICATION_TYPE],
    )
}

fn insert_author(conn: &Connection, author: &AuthorName) -> Result<i64> {
    insert_returning_id(
        conn,
        "Author",
        "INSERT INTO Author (FirstName, MiddleName, LastName) VALUES (?1, ?2, ?3)",
        params![author.first_name, author.middle_name, author.last_name],
    )
}

fn insert_book_entry(
    conn: &Connection,
    publication_id: i64,
    isbn: &str,
    dewey: &str,
) -> Result<i64> {
    insert_returning_id(
        conn,
        "Book",
        "INSERT INTO Book (PublicationID, ISBN, DeweyDecimalSystemNumber) VALUES (?1, ?2, ?3)",
        params![publication_id, isbn, dewey],
    )
}

fn insert_physical_book(conn: &Connection, book_id: i64, book: &NewBook) -> Result<()> {
    conn.execute(
        "INSERT INTO PhysicalBook (BookID, NumberOfPages, Language, Genre) VALUES (?1, ?2, ?3, ?4)",
        params![book_id, book.number_of_pages, book.language, book.genre],
    )?;
    Ok(())
}

fn link_book_to_author(conn: &Connection, book_id: i64, author_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO BookAuthor (BookID, AuthorID) VALUES (?1, ?2)",
        params![book_id, author_id],
    )?;
    Ok(())
}

/// Create the Publication, Author, Book, PhysicalBook and BookAuthor rows for
/// one book. Each insert feeds its generated id to the next, so the order is
/// fixed.
pub fn insert_book(conn: &mut Connection, book: &NewBook) -> Result<InsertedBook> {
    in_transaction(conn, "insert book", |tx| {
        let publication_id = insert_publication(tx, &book.title, book.publisher_id)?;
        debug!(publication_id, "publication inserted");

        let author_id = insert_author(tx, &book.author)?;
        debug!(author_id, "author inserted");

        let book_id = insert_book_entry(tx, publication_id, &book.isbn, &book.dewey)?;
        debug!(book_id, "book inserted");

        insert_physical_book(tx, book_id, book)?;
        link_book_to_author(tx, book_id, author_id)?;
        debug!(book_id, author_id, "book linked to author");

        Ok(InsertedBook {
            publication_id,
            author_id,
            book_id,
        })
    })
}

/// Retitle the publication behind `existing`. The row is located by its
/// current title, not by id, so a stale record fails with
/// `PublicationNotFound` and duplicated titles are all renamed together.
/// Returns the number of publications updated.
pub fn update_book(conn: &mut Connection, new_title: &str, existing: &Book) -> Result<usize> {
    in_transaction(conn, "update book", |tx| {
        let updated = tx.execute(
            "UPDATE Publication SET Title = ?1, Type = ?2 WHERE Title = ?3",
            params![new_title, PUBLICATION_TYPE, existing.title],
        )?;

        match updated {
            0 => Err(CatalogError::PublicationNotFound {
                title: existing.title.clone(),
            }),
            1 => Ok(1),
            n => {
                warn!(title = %existing.title, updated = n, "title matched several publications");
                Ok(n)
            }
        }
    })
}

/// Remove a book together with every dependent row. An unknown id undoes the
/// dependent deletes and fails with `BookNotFound`. The parent Publication
/// row is kept.
pub fn delete_book_and_references(conn: &mut Connection, book_id: i64) -> Result<()> {
    in_transaction(conn, "delete book", |tx| {
        for table in DEPENDENT_TABLES {
            let removed = tx.execute(
                &format!("DELETE FROM {table} WHERE BookID = ?1"),
                params![book_id],
            )?;
            if removed > 0 {
                debug!(table, removed, book_id, "removed dependent rows");
            }
        }

        let deleted = tx.execute("DELETE FROM Book WHERE BookID = ?1", params![book_id])?;
        if deleted == 0 {
            return Err(CatalogError::BookNotFound { id: book_id });
        }
        Ok(())
    })
}
