use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::config::PublisherSeed;
use crate::error::Result;

/// Tables backing the catalog. Foreign keys carry no `ON DELETE CASCADE`;
/// the delete sequence removes dependent rows itself.
pub(crate) const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Publisher (
    PublisherID INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL,
    Website TEXT
);

CREATE TABLE IF NOT EXISTS Publication (
    PublicationID INTEGER PRIMARY KEY AUTOINCREMENT,
    Title TEXT NOT NULL,
    PublisherID INTEGER NOT NULL REFERENCES Publisher(PublisherID),
    Type TEXT NOT NULL,
    PublicationDate TEXT
);

CREATE TABLE IF NOT EXISTS Book (
    BookID INTEGER PRIMARY KEY AUTOINCREMENT,
    PublicationID INTEGER NOT NULL REFERENCES Publication(PublicationID),
    ISBN TEXT NOT NULL,
    DeweyDecimalSystemNumber TEXT
);

CREATE TABLE IF NOT EXISTS Author (
    AuthorID INTEGER PRIMARY KEY AUTOINCREMENT,
    FirstName TEXT,
    MiddleName TEXT,
    LastName TEXT
);

CREATE TABLE IF NOT EXISTS BookAuthor (
    BookID INTEGER NOT NULL REFERENCES Book(BookID),
    AuthorID INTEGER NOT NULL REFERENCES Author(AuthorID),
    PRIMARY KEY (BookID, AuthorID)
);

CREATE TABLE IF NOT EXISTS PhysicalBook (
    BookID INTEGER NOT NULL REFERENCES Book(BookID),
    NumberOfPages INTEGER,
    Language TEXT,
    Genre TEXT
);

CREATE TABLE IF NOT EXISTS AudioBook (
    BookID INTEGER NOT NULL REFERENCES Book(BookID),
    Narrator TEXT,
    DurationMinutes INTEGER
);

CREATE TABLE IF NOT EXISTS EBook (
    BookID INTEGER NOT NULL REFERENCES Book(BookID),
    Format TEXT,
    FileSizeKb INTEGER
);
"#;

/// SQL function lowercasing its argument with full Unicode case folding.
/// Title search compares through it because SQLite's `LIKE` folds ASCII only.
pub const LOWER_FUNCTION: &str = "catalog_lower";

/// Register the catalog's SQL functions, toggle foreign keys and create any
/// missing tables. Safe to run on every connect.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    register_functions(conn)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA_SQL)?;
    debug!("catalog schema ready");
    Ok(())
}

fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        LOWER_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Insert the configured publishers, keeping any row that already owns the id.
/// Returns how many rows were new.
pub fn seed_publishers(conn: &Connection, seeds: &[PublisherSeed]) -> Result<usize> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO Publisher (PublisherID, Name, Website) VALUES (?1, ?2, ?3)",
    )?;

    let mut inserted = 0;
    for seed in seeds {
        inserted += stmt.execute(params![seed.id, seed.name, seed.website])?;
    }

    if inserted > 0 {
        debug!(inserted, "seeded publishers");
    }
    Ok(inserted)
}
