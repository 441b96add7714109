//! Table descriptors and the statements every record kind shares.

use rusqlite::Row;
use studentdb_core::PartialUpdate;
use tracing::debug;

use crate::common::{Error, RecordId, Result};
use crate::storage::Session;

/// Name, key column and column order of a record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub key: &'static str,
    /// Every column in `SELECT` order, key first.
    pub columns: &'static [&'static str],
}

pub const STUDENTS: Table = Table {
    name: "students",
    key: "student_id",
    columns: &[
        "student_id",
        "name",
        "email",
        "department",
        "gpa",
        "enrollment_date",
    ],
};

pub const EMPLOYEES: Table = Table {
    name: "employees",
    key: "id",
    columns: &["id", "name", "salary"],
};

impl Table {
    fn column_list(&self) -> String {
        self.columns.join(", ")
    }
}

/// Every row of `table` in key order.
pub fn select_all<T, F>(session: &Session, table: &Table, map: F) -> Result<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        table.column_list(),
        table.name,
        table.key
    );
    Ok(session.bindings().query(session.connection()?, &sql, map)?)
}

/// The row with primary key `key`, or `None`.
pub fn select_by_key<T, F>(
    session: &Session,
    table: &Table,
    key: RecordId,
    map: F,
) -> Result<Option<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut bindings = session.bindings();
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        table.column_list(),
        table.name,
        table.key,
        bindings.bind("key", key)
    );
    Ok(bindings.query_optional(session.connection()?, &sql, map)?)
}

/// Number of rows in `table`.
pub fn count(session: &Session, table: &Table) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name);
    let count: i64 = session.connection()?.query_row(&sql, [], |row| row.get(0))?;
    Ok(count.max(0) as u64)
}

/// Apply the present fields of `patch` to the row with key `key`.
///
/// The `SET` clause lists only supplied fields, so untouched columns keep
/// their stored values.
///
/// # Errors
/// - `Error::NothingToUpdate` if `patch` supplies no field; nothing is executed
/// - `Error::NotFound` if no row has key `key`
pub fn apply_update<P: PartialUpdate>(
    session: &mut Session,
    table: &Table,
    key: RecordId,
    patch: &P,
) -> Result<()> {
    let assignments = patch.assignments();
    if assignments.is_empty() {
        return Err(Error::NothingToUpdate);
    }

    let mut bindings = session.bindings();
    let set_clause = assignments
        .into_iter()
        .map(|a| format!("{} = {}", a.column, bindings.bind_field(a.column, a.value)))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        table.name,
        set_clause,
        table.key,
        bindings.bind("key", key)
    );

    let affected = session.write(|tx| Ok(bindings.execute(tx, &sql)?))?;
    debug!(table = table.name, key, affected, "update");
    if affected == 0 {
        return Err(Error::NotFound(key));
    }
    Ok(())
}

/// Delete the row with key `key`.
///
/// # Errors
/// Returns `Error::NotFound` if no row was deleted.
pub fn delete_by_key(session: &mut Session, table: &Table, key: RecordId) -> Result<()> {
    let mut bindings = session.bindings();
    let sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        table.name,
        table.key,
        bindings.bind("key", key)
    );

    let affected = session.write(|tx| Ok(bindings.execute(tx, &sql)?))?;
    debug!(table = table.name, key, affected, "delete");
    if affected == 0 {
        return Err(Error::NotFound(key));
    }
    Ok(())
}
