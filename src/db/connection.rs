use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;
use tracing::{debug, error};

use crate::config::{DatabaseSettings, PublisherSeed};
use crate::error::{CatalogError, Result};

use super::schema::{ensure_schema, seed_publishers};

/// Owns the single SQLite connection shared by every data-access call.
///
/// The connection is opened on first use and kept until [`close`] is called;
/// a later [`connection`] call opens a fresh one. Opening is attempted once
/// per call, with no retry.
///
/// [`close`]: ConnectionManager::close
/// [`connection`]: ConnectionManager::connection
pub struct ConnectionManager {
    settings: DatabaseSettings,
    seeds: Vec<PublisherSeed>,
    conn: Option<Connection>,
}

impl ConnectionManager {
    pub fn new(settings: DatabaseSettings, seeds: Vec<PublisherSeed>) -> Self {
        Self {
            settings,
            seeds,
            conn: None,
        }
    }

    /// Manager for a private in-memory database (tests).
    pub fn in_memory() -> Self {
        Self::new(DatabaseSettings::in_memory(), Vec::new())
    }

    /// Return the live connection, opening and bootstrapping it if needed.
    /// Failures are logged and returned; the manager stays unopened.
    pub fn connection(&mut self) -> Result<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.open().inspect_err(|err| {
                error!("connection failed: {err}");
            })?,
        };
        Ok(self.conn.insert(conn))
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the connection. The slot is cleared even if SQLite reports an
    /// error while closing.
    pub fn close(&mut self) -> Result<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        conn.close().map_err(|(_, err)| CatalogError::from(err))?;
        debug!("closed catalog database");
        Ok(())
    }

    fn open(&self) -> Result<Connection> {
        let conn = if self.settings.in_memory {
            Connection::open_in_memory().map_err(|source| CatalogError::DatabaseOpen {
                path: PathBuf::from(":memory:"),
                source,
            })?
        } else {
            let path = self.settings.resolve_path()?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|err| {
                    CatalogError::io(
                        format!("failed to create data directory {}", parent.display()),
                        err,
                    )
                })?;
            }
            let conn = Connection::open(&path).map_err(|source| CatalogError::DatabaseOpen {
                path: path.clone(),
                source,
            })?;
            debug!("opened catalog database at {}", path.display());
            conn
        };

        ensure_schema(&conn)?;
        seed_publishers(&conn, &self.seeds)?;
        Ok(conn)
    }
}
