use rusqlite::{Connection, Row};
use tracing::error;

use crate::error::Result;
use crate::models::{Book, PhysicalDetails};

/// Every linked row is required; books missing an author or physical copy
/// are left out.
const ALL_BOOKS_SQL: &str = "
    SELECT b.BookID, p.Title,
           COALESCE(a.FirstName, '') || ' ' || COALESCE(a.MiddleName, '') || ' ' || COALESCE(a.LastName, ''),
           b.ISBN, COALESCE(b.DeweyDecimalSystemNumber, ''), p.PublisherID,
           pb.BookID, pb.NumberOfPages, pb.Language, pb.Genre
    FROM Book b
    JOIN Publication p ON b.PublicationID = p.PublicationID
    JOIN BookAuthor ba ON b.BookID = ba.BookID
    JOIN Author a ON ba.AuthorID = a.AuthorID
    JOIN PhysicalBook pb ON b.BookID = pb.BookID";

/// Author and physical rows are optional here so partially linked books still
/// turn up in search results.
const SEARCH_BOOKS_SQL: &str = "
    SELECT b.BookID, p.Title,
           CASE WHEN a.AuthorID IS NULL THEN ''
                ELSE COALESCE(a.FirstName, '') || ' ' || COALESCE(a.MiddleName, '') || ' ' || COALESCE(a.LastName, '')
           END,
           b.ISBN, COALESCE(b.DeweyDecimalSystemNumber, ''), p.PublisherID,
           pb.BookID, pb.NumberOfPages, pb.Language, pb.Genre
    FROM Book b
    JOIN Publication p ON b.PublicationID = p.PublicationID
    LEFT JOIN BookAuthor ba ON b.BookID = ba.BookID
    LEFT JOIN Author a ON ba.AuthorID = a.AuthorID
    LEFT JOIN PhysicalBook pb ON b.BookID = pb.BookID
    WHERE catalog_lower(p.Title) LIKE '%' || catalog_lower(?1) || '%'";

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    let physical_book_id: Option<i64> = row.get(6)?;
    let physical = match physical_book_id {
        Some(_) => Some(PhysicalDetails {
            number_of_pages: row.get::<_, Option<i64>>(7)?.unwrap_or(0),
            language: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            genre: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
        }),
        None => None,
    };

    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        authors: row.get(2)?,
        isbn: row.get(3)?,
        dewey: row.get(4)?,
        publisher_id: row.get(5)?,
        physical,
    })
}

/// List every fully linked book. Rows come back in whatever order the join
/// produces.
pub fn get_books(conn: &Connection) -> Result<Vec<Book>> {
    query_books(conn, ALL_BOOKS_SQL, None).inspect_err(|err| {
        error!("loading books failed: {err}");
    })
}

/// Case-insensitive substring search on the title, folding Unicode case on
/// both sides. An empty pattern matches every book.
pub fn search_books(conn: &Connection, pattern: &str) -> Result<Vec<Book>> {
    query_books(conn, SEARCH_BOOKS_SQL, Some(pattern)).inspect_err(|err| {
        error!(pattern, "search failed: {err}");
    })
}

fn query_books(conn: &Connection, sql: &str, pattern: Option<&str>) -> Result<Vec<Book>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = match pattern {
        Some(pattern) => stmt.query_map([pattern], book_from_row)?,
        None => stmt.query_map([], book_from_row)?,
    };
    let books = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tables_surface_as_errors() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(get_books(&conn).is_err());
        assert!(search_books(&conn, "").is_err());
    }
}
