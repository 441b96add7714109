//! Session - the one open database connection of a run.
//!
//! The [`Session`] owns its connection exclusively. Record operations borrow
//! it: reads take `&Session`, writes take `&mut Session` and run inside
//! [`Session::write`], which commits on success and rolls back on failure.

use rusqlite::{Connection, Transaction};
use tracing::{info, warn};

use crate::common::{ConnectionConfig, Error, Result};
use crate::storage::schema::{self, BootstrapReport};
use crate::storage::{Bindings, Dialect};

/// An open database session.
///
/// # Lifecycle
/// ```text
/// Session::open ──▶ bootstrap schema ──▶ read / write ... ──▶ close (or drop)
/// ```
///
/// Closing twice is harmless; any use after close returns [`Error::Closed`].
///
/// # Thread Safety
/// `Session` is **single-threaded**: one connection, one caller, blocking
/// calls with no timeout.
///
/// # Example
/// ```
/// use studentdb::common::{ConnectionConfig, RecordKind};
/// use studentdb::storage::Session;
///
/// let mut session = Session::open(ConnectionConfig::in_memory(RecordKind::Students)).unwrap();
/// assert!(session.is_open());
/// session.close();
/// assert!(!session.is_open());
/// ```
pub struct Session {
    conn: Option<Connection>,
    config: ConnectionConfig,
    bootstrap: BootstrapReport,
}

impl Session {
    /// Open the database named by `config` and bootstrap its schema.
    ///
    /// # Errors
    /// Returns `Error::Connect` if the database cannot be opened. Schema
    /// failures do not fail the open; see [`Session::bootstrap_report`].
    pub fn open(config: ConnectionConfig) -> Result<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.database)
        }
        .map_err(Error::Connect)?;

        info!(database = %config.database, dialect = %config.dialect, "database connected");

        let bootstrap = schema::bootstrap(&conn, config.dialect, config.kind);
        for failure in &bootstrap.failures {
            warn!(error = %failure, "continuing despite schema failure");
        }

        Ok(Self {
            conn: Some(conn),
            config,
            bootstrap,
        })
    }

    #[inline]
    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    #[inline]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// What the schema bootstrap did when this session opened.
    pub fn bootstrap_report(&self) -> &BootstrapReport {
        &self.bootstrap
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Fresh parameter bindings in this session's dialect.
    pub fn bindings(&self) -> Bindings {
        Bindings::new(self.dialect())
    }

    /// The connection, for reads.
    ///
    /// # Errors
    /// Returns `Error::Closed` after [`close`](Self::close).
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(Error::Closed)
    }

    /// Run `f` in its own transaction.
    ///
    /// Commits when `f` returns `Ok`; rolls back and returns the error
    /// otherwise, so a failed write never leaves partial changes behind.
    pub fn write<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let conn = self.conn.as_mut().ok_or(Error::Closed)?;
        let tx = conn.transaction()?;

        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "rolling back");
                if let Err(rollback_err) = tx.rollback() {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Release the connection. Does nothing if already closed.
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, err)) = conn.close() {
                warn!(error = %err, "error while closing database");
            }
            info!(database = %self.config.database, "database connection closed");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RecordKind;
    use tempfile::tempdir;

    fn memory() -> Session {
        Session::open(ConnectionConfig::in_memory(RecordKind::Students)).unwrap()
    }

    #[test]
    fn test_open_bootstraps_schema() {
        let session = memory();
        assert!(session.bootstrap_report().is_clean());
        assert_eq!(session.bootstrap_report().created, vec!["students"]);
        assert_eq!(session.dialect(), Dialect::Positional);
    }

    #[test]
    fn test_open_unreachable_database_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("nested").join("db.sqlite");
        let config = ConnectionConfig::new(RecordKind::Students)
            .with_database(path.to_string_lossy());

        match Session::open(config) {
            Err(Error::Connect(_)) => {}
            Err(other) => panic!("Expected Connect error, got {other:?}"),
            Ok(_) => panic!("Expected Connect error"),
        }
    }

    #[test]
    fn test_double_close_is_harmless() {
        let mut session = memory();
        session.close();
        session.close();
        assert!(!session.is_open());
    }

    #[test]
    fn test_use_after_close() {
        let mut session = memory();
        session.close();

        assert!(matches!(session.connection(), Err(Error::Closed)));
        assert!(matches!(session.write(|_| Ok(())), Err(Error::Closed)));
    }

    #[test]
    fn test_write_commits_on_success() {
        let mut session = memory();
        session
            .write(|tx| {
                tx.execute(
                    "INSERT INTO students (name, email) VALUES ('A', 'a@x')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let count: i64 = session
            .connection()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_write_rolls_back_on_error() {
        let mut session = memory();
        let result: Result<()> = session.write(|tx| {
            tx.execute(
                "INSERT INTO students (name, email) VALUES ('A', 'a@x')",
                [],
            )?;
            Err(Error::NothingToUpdate)
        });
        assert!(matches!(result, Err(Error::NothingToUpdate)));

        let count: i64 = session
            .connection()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_file_database_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.db");
        let config = ConnectionConfig::new(RecordKind::Students)
            .with_database(path.to_string_lossy());

        {
            let mut session = Session::open(config.clone()).unwrap();
            session
                .write(|tx| {
                    tx.execute(
                        "INSERT INTO students (name, email) VALUES ('A', 'a@x')",
                        [],
                    )?;
                    Ok(())
                })
                .unwrap();
        }

        let session = Session::open(config).unwrap();
        assert_eq!(session.bootstrap_report().existing, vec!["students"]);
    }
}
