//! Employee records. Keys are natural: the user picks them on insert.

use rusqlite::Row;
use tracing::info;

use crate::common::{Employee, EmployeePatch, RecordId, Result};
use crate::records::table::{self, EMPLOYEES};
use crate::storage::Session;

fn from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        salary: row.get(2)?,
    })
}

/// Insert `employee` under its own key and return that key.
///
/// # Errors
/// `Error::Constraint` if the key is taken; the insert is rolled back.
pub fn add(session: &mut Session, employee: &Employee) -> Result<RecordId> {
    let mut bindings = session.bindings();
    let sql = format!(
        "INSERT INTO employees (id, name, salary) VALUES ({}, {}, {})",
        bindings.bind("id", employee.id),
        bindings.bind("name", employee.name.clone()),
        bindings.bind("salary", employee.salary)
    );

    session.write(|tx| Ok(bindings.execute(tx, &sql)?))?;
    info!(id = employee.id, name = %employee.name, "employee added");
    Ok(employee.id)
}

/// All employees in key order.
pub fn list(session: &Session) -> Result<Vec<Employee>> {
    table::select_all(session, &EMPLOYEES, from_row)
}

pub fn get(session: &Session, id: RecordId) -> Result<Option<Employee>> {
    table::select_by_key(session, &EMPLOYEES, id, from_row)
}

/// Apply the supplied fields of `patch` to employee `id`.
pub fn update(session: &mut Session, id: RecordId, patch: &EmployeePatch) -> Result<()> {
    table::apply_update(session, &EMPLOYEES, id, patch)?;
    info!(id, "employee updated");
    Ok(())
}

pub fn delete(session: &mut Session, id: RecordId) -> Result<()> {
    table::delete_by_key(session, &EMPLOYEES, id)?;
    info!(id, "employee deleted");
    Ok(())
}

pub fn count(session: &Session) -> Result<u64> {
    table::count(session, &EMPLOYEES)
}
