use rusqlite::Connection;
use tracing::error;

use crate::error::Result;
use crate::models::Publisher;

/// Retrieve every publisher in storage order for the publisher chooser.
pub fn get_publishers(conn: &Connection) -> Result<Vec<Publisher>> {
    load_publishers(conn).inspect_err(|err| {
        error!("loading publishers failed: {err}");
    })
}

fn load_publishers(conn: &Connection) -> Result<Vec<Publisher>> {
    let mut stmt = conn.prepare("SELECT PublisherID, Name, Website FROM Publisher")?;

    let publishers = stmt
        .query_map([], |row| {
            Ok(Publisher {
                id: row.get(0)?,
                name: row.get(1)?,
                website: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(publishers)
}

/// Find a publisher in an already loaded list.
pub fn lookup_publisher(publishers: &[Publisher], id: i64) -> Option<&Publisher> {
    publishers.iter().find(|publisher| publisher.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::ensure_schema;

    #[test]
    fn missing_tables_surface_as_errors() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(get_publishers(&conn).is_err());
    }

    #[test]
    fn loads_and_looks_up_publishers() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO Publisher (PublisherID, Name, Website) VALUES (4, 'Scribner', NULL);
             INSERT INTO Publisher (PublisherID, Name, Website) VALUES (9, 'Vintage', 'https://vintage.example');",
        )
        .unwrap();

        let publishers = get_publishers(&conn).unwrap();
        assert_eq!(publishers.len(), 2);

        let vintage = lookup_publisher(&publishers, 9).unwrap();
        assert_eq!(vintage.name, "Vintage");
        assert_eq!(vintage.website.as_deref(), Some("https://vintage.example"));
        assert_eq!(lookup_publisher(&publishers, 4).unwrap().website, None);
        assert!(lookup_publisher(&publishers, 5).is_none());
    }
}
