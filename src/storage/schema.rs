//! Schema bootstrap: make sure the tables a session needs exist.
//!
//! Runs once when a [`Session`](crate::storage::Session) opens. Under
//! [`Dialect::Positional`] tables are created with `IF NOT EXISTS`; under
//! [`Dialect::Named`] creation is unconditional and the "already exists"
//! failure is discarded, and student keys come from a sequence that is set
//! up the same way. A sequence never trails the keys already stored, so a
//! file filled under the positional dialect can be reopened under the named
//! one.
//!
//! Other failures are logged and collected into a [`BootstrapReport`]; they
//! never abort opening the session.

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::common::config::STUDENT_SEQUENCE;
use crate::common::{Error, RecordKind, Result};
use crate::storage::{Bindings, Dialect};

/// Outcome of bootstrapping one session.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Objects created by this run.
    pub created: Vec<&'static str>,
    /// Objects that were already present.
    pub existing: Vec<&'static str>,
    /// Failures other than "already exists".
    pub failures: Vec<Error>,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Column definitions of the `students` table.
fn students_columns(dialect: Dialect) -> &'static str {
    if dialect.uses_sequence() {
        "student_id INTEGER PRIMARY KEY, \
         name TEXT NOT NULL, \
         email TEXT UNIQUE NOT NULL, \
         department TEXT, \
         gpa REAL, \
         enrollment_date DATE"
    } else {
        "student_id INTEGER PRIMARY KEY AUTOINCREMENT, \
         name TEXT NOT NULL, \
         email TEXT UNIQUE NOT NULL, \
         department TEXT, \
         gpa REAL, \
         enrollment_date DATE"
    }
}

const EMPLOYEES_COLUMNS: &str = "id INTEGER PRIMARY KEY, name TEXT NOT NULL, salary REAL";

const SEQUENCES_COLUMNS: &str = "name TEXT PRIMARY KEY, value INTEGER NOT NULL";

/// `CREATE TABLE` statement for `table` in `dialect`.
pub fn create_table_sql(dialect: Dialect, table: &str, columns: &str) -> String {
    if dialect.has_if_not_exists() {
        format!("CREATE TABLE IF NOT EXISTS {} ({})", table, columns)
    } else {
        format!("CREATE TABLE {} ({})", table, columns)
    }
}

/// Ensure every object `kind` needs under `dialect` exists.
pub fn bootstrap(conn: &Connection, dialect: Dialect, kind: RecordKind) -> BootstrapReport {
    let mut report = BootstrapReport::default();

    match kind {
        RecordKind::Students => {
            let columns = students_columns(dialect);
            ensure_table(conn, &mut report, dialect, "students", columns);
            if dialect.uses_sequence() {
                ensure_sequence(conn, &mut report, STUDENT_SEQUENCE, "students", "student_id");
            }
        }
        RecordKind::Employees => {
            ensure_table(conn, &mut report, dialect, "employees", EMPLOYEES_COLUMNS);
        }
    }

    report
}

fn ensure_table(
    conn: &Connection,
    report: &mut BootstrapReport,
    dialect: Dialect,
    table: &'static str,
    columns: &str,
) {
    let existed = table_exists(conn, table).unwrap_or(false);
    let sql = create_table_sql(dialect, table, columns);
    debug!(%sql, "bootstrap");

    match conn.execute_batch(&sql) {
        Ok(()) if existed => report.existing.push(table),
        Ok(()) => report.created.push(table),
        Err(err) if Error::is_already_exists(&err) => report.existing.push(table),
        Err(err) => {
            warn!(table, error = %err, "schema setup failed");
            report.failures.push(Error::Schema {
                object: table,
                source: err,
            });
        }
    }
}

/// Create `sequence` so its next value is past every `key` in `table`.
///
/// The sequence table and row are created unconditionally; "already exists"
/// and a duplicate row are discarded.
fn ensure_sequence(
    conn: &Connection,
    report: &mut BootstrapReport,
    sequence: &'static str,
    table: &str,
    key: &str,
) {
    let sql = create_table_sql(Dialect::Named, "sequences", SEQUENCES_COLUMNS);
    if let Err(err) = conn.execute_batch(&sql) {
        if !Error::is_already_exists(&err) {
            warn!(sequence, error = %err, "sequence table setup failed");
            report.failures.push(Error::Schema {
                object: sequence,
                source: err,
            });
            return;
        }
    }

    let mut bindings = Bindings::new(Dialect::Named);
    let sql = format!(
        "INSERT INTO sequences (name, value) VALUES ({}, 0)",
        bindings.bind("name", sequence.to_string())
    );
    let created = match bindings.execute(conn, &sql) {
        Ok(_) => true,
        Err(err) if Error::is_duplicate_key(&err) => false,
        Err(err) => {
            warn!(sequence, error = %err, "sequence setup failed");
            report.failures.push(Error::Schema {
                object: sequence,
                source: err,
            });
            return;
        }
    };

    if let Err(err) = catch_up(conn, sequence, table, key) {
        warn!(sequence, error = %err, "sequence catch-up failed");
        report.failures.push(Error::Schema {
            object: sequence,
            source: err,
        });
        return;
    }

    if created {
        report.created.push(sequence);
    } else {
        report.existing.push(sequence);
    }
}

/// Raise `sequence` to the largest `key` already in `table`.
fn catch_up(conn: &Connection, sequence: &str, table: &str, key: &str) -> rusqlite::Result<()> {
    let mut bindings = Bindings::new(Dialect::Named);
    let sql = format!(
        "UPDATE sequences \
         SET value = MAX(value, (SELECT COALESCE(MAX({key}), 0) FROM {table})) \
         WHERE name = {}",
        bindings.bind("name", sequence.to_string())
    );
    bindings.execute(conn, &sql)?;
    debug!(sequence, "sequence caught up");
    Ok(())
}

/// Advance `sequence` and return its new value.
///
/// Runs on whatever connection or transaction the caller holds, so a failed
/// insert also rolls the sequence back.
pub fn next_value(conn: &Connection, sequence: &str) -> Result<i64> {
    let mut bindings = Bindings::new(Dialect::Named);
    let sql = format!(
        "UPDATE sequences SET value = value + 1 WHERE name = {} RETURNING value",
        bindings.bind("name", sequence.to_string())
    );
    bindings
        .query_optional(conn, &sql, |row| row.get(0))?
        .ok_or(Error::Database(rusqlite::Error::QueryReturnedNoRows))
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let mut bindings = Bindings::new(Dialect::Positional);
    let sql = format!(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = {}",
        bindings.bind("name", table.to_string())
    );
    Ok(bindings.query_optional(conn, &sql, |_| Ok(()))?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_table_sql_per_dialect() {
        assert_eq!(
            create_table_sql(Dialect::Positional, "t", "id INTEGER"),
            "CREATE TABLE IF NOT EXISTS t (id INTEGER)"
        );
        assert_eq!(
            create_table_sql(Dialect::Named, "t", "id INTEGER"),
            "CREATE TABLE t (id INTEGER)"
        );
    }

    #[test]
    fn test_positional_bootstrap_is_idempotent() {
        let conn = memory();

        let first = bootstrap(&conn, Dialect::Positional, RecordKind::Students);
        assert!(first.is_clean());
        assert_eq!(first.created, vec!["students"]);

        let second = bootstrap(&conn, Dialect::Positional, RecordKind::Students);
        assert!(second.is_clean());
        assert!(second.created.is_empty());
        assert_eq!(second.existing, vec!["students"]);
    }

    #[test]
    fn test_named_bootstrap_discards_already_exists() {
        let conn = memory();

        let first = bootstrap(&conn, Dialect::Named, RecordKind::Students);
        assert!(first.is_clean());
        assert_eq!(first.created, vec!["students", STUDENT_SEQUENCE]);

        let second = bootstrap(&conn, Dialect::Named, RecordKind::Students);
        assert!(second.is_clean(), "failures: {:?}", second.failures);
        assert!(second.created.is_empty());
        assert_eq!(second.existing, vec!["students", STUDENT_SEQUENCE]);
    }

    #[test]
    fn test_sequence_starts_at_one() {
        let conn = memory();
        bootstrap(&conn, Dialect::Named, RecordKind::Students);

        assert_eq!(next_value(&conn, STUDENT_SEQUENCE).unwrap(), 1);
        assert_eq!(next_value(&conn, STUDENT_SEQUENCE).unwrap(), 2);
    }

    #[test]
    fn test_rebootstrap_keeps_sequence_position() {
        let conn = memory();
        bootstrap(&conn, Dialect::Named, RecordKind::Students);
        next_value(&conn, STUDENT_SEQUENCE).unwrap();

        bootstrap(&conn, Dialect::Named, RecordKind::Students);
        assert_eq!(next_value(&conn, STUDENT_SEQUENCE).unwrap(), 2);
    }

    #[test]
    fn test_sequence_starts_past_existing_keys() {
        let conn = memory();
        bootstrap(&conn, Dialect::Positional, RecordKind::Students);
        conn.execute_batch(
            "INSERT INTO students (name, email) VALUES ('A', 'a@x');
             INSERT INTO students (name, email) VALUES ('B', 'b@x');",
        )
        .unwrap();

        let report = bootstrap(&conn, Dialect::Named, RecordKind::Students);
        assert!(report.is_clean(), "failures: {:?}", report.failures);
        assert_eq!(next_value(&conn, STUDENT_SEQUENCE).unwrap(), 3);
    }

    #[test]
    fn test_existing_sequence_catches_up_with_new_rows() {
        let conn = memory();
        bootstrap(&conn, Dialect::Named, RecordKind::Students);
        conn.execute_batch(
            "INSERT INTO students (student_id, name, email) VALUES (7, 'A', 'a@x')",
        )
        .unwrap();

        bootstrap(&conn, Dialect::Named, RecordKind::Students);
        assert_eq!(next_value(&conn, STUDENT_SEQUENCE).unwrap(), 8);
    }

    #[test]
    fn test_missing_sequence_is_error() {
        let conn = memory();
        assert!(next_value(&conn, "nope").is_err());
    }

    #[test]
    fn test_employees_need_no_sequence() {
        let conn = memory();
        let report = bootstrap(&conn, Dialect::Named, RecordKind::Employees);
        assert_eq!(report.created, vec!["employees"]);
        assert!(!table_exists(&conn, "sequences").unwrap());
    }

    #[test]
    fn test_unexpected_failure_is_reported_not_fatal() {
        let conn = memory();
        // Trailing comma: a syntax error, not "already exists".
        let mut report = BootstrapReport::default();
        ensure_table(&conn, &mut report, Dialect::Positional, "broken", "id INTEGER,");
        assert!(!report.is_clean());
        assert!(matches!(report.failures[0], Error::Schema { object: "broken", .. }));
    }
}
