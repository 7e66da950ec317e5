//! Plain data carriers passed between the persistence layer and its callers.
//! A `Book` is reconstructed from five tables and never maps onto a single
//! row, so the structs here describe what the caller sees rather than the
//! schema.

use std::fmt;

/// A book as reconstructed by the reader queries. One value stands for a
/// Publication row, its Book row and whatever author and physical rows the
/// join matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// `Book.BookID`, the key the delete sequence works from.
    pub id: i64,
    /// Title stored on the parent `Publication` row. The update sequence uses
    /// it as its lookup key, so a record whose title changed underneath it is
    /// stale.
    pub title: String,
    /// Flattened name of the first matched author. Empty when a search row
    /// has no linked author.
    pub authors: String,
    /// ISBN exactly as entered. Nothing here checks its shape.
    pub isbn: String,
    /// Dewey Decimal classification kept as text so leading zeros and the
    /// decimal part survive (`"004.16"`).
    pub dewey: String,
    /// `Publication.PublisherID`, resolvable with `lookup_publisher`.
    pub publisher_id: i64,
    /// `None` when the book has no `PhysicalBook` row.
    pub physical: Option<PhysicalDetails>,
}

/// Columns of a `PhysicalBook` row. A NULL page count reads back as zero and
/// NULL text as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalDetails {
    pub number_of_pages: i64,
    pub language: String,
    pub genre: String,
}

/// Entry of the publisher lookup table. Loaded once to fill a chooser and
/// never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    /// Primary key, stored on `Publication.PublisherID` by the insert sequence.
    pub id: i64,
    /// Display name, also what `Display` renders.
    pub name: String,
    /// Optional homepage; many small presses have none.
    pub website: Option<String>,
}

impl fmt::Display for Publisher {
    /// Selection lists render a publisher by name only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Name parts written to an `Author` row. The writer stores them as given and
/// never tries to split a full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName {
    pub first_name: String,
    /// Stored as NULL when `None`; reads render it as an empty segment either
    /// way.
    pub middle_name: Option<String>,
    pub last_name: String,
}

impl AuthorName {
    pub fn new(
        first_name: impl Into<String>,
        middle_name: Option<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            middle_name,
            last_name: last_name.into(),
        }
    }

    /// The whole name goes into the first-name column, with blank middle and
    /// last names. This is what a single free-text author field produces.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            first_name: name.into(),
            middle_name: Some(String::new()),
            last_name: String::new(),
        }
    }

    /// The same `first middle last` concatenation the reader queries build.
    /// A missing middle name leaves an empty segment, so there are always two
    /// separating spaces.
    pub fn flattened(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name,
            self.middle_name.as_deref().unwrap_or(""),
            self.last_name
        )
    }
}

/// Everything `insert_book` writes across the five tables. Field values are
/// expected to be validated already; the writer stores them verbatim.
#[derive(Debug, Clone)]
pub struct NewBook {
    /// Goes to `Publication.Title`.
    pub title: String,
    /// Becomes a fresh `Author` row linked through `BookAuthor`. Authors are
    /// never deduplicated against existing rows.
    pub author: AuthorName,
    /// `Book.ISBN`.
    pub isbn: String,
    /// `Book.DeweyDecimalSystemNumber`.
    pub dewey: String,
    /// Must name an existing publisher or the foreign key aborts the insert.
    pub publisher_id: i64,
    /// The remaining three fields fill the single `PhysicalBook` row.
    pub number_of_pages: i64,
    pub language: String,
    pub genre: String,
}

/// Identifiers generated by a committed insert. Callers that keep their own
/// list can use `book_id` without re-querying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedBook {
    pub publication_id: i64,
    pub author_id: i64,
    pub book_id: i64,
}
