//! Student records: add, list, search, update, delete.
//!
//! Keys are generated by the store. Under [`Dialect::Positional`] the
//! `AUTOINCREMENT` column assigns them; under [`Dialect::Named`] they are
//! drawn from the student sequence inside the insert's transaction.

use rusqlite::types::Type;
use rusqlite::Row;
use studentdb_core::parse_date;
use tracing::info;

use crate::common::config::STUDENT_SEQUENCE;
use crate::common::{NewStudent, RecordId, Result, Student, StudentPatch};
use crate::records::table::{self, STUDENTS};
use crate::storage::{schema, Bindings, Dialect, Session};

fn from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    let enrollment_date = match row.get::<_, Option<String>>(5)? {
        Some(text) => Some(parse_date(&text).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
        })?),
        None => None,
    };

    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        department: row.get(3)?,
        gpa: row.get(4)?,
        enrollment_date,
    })
}

/// Bind the non-key columns of `student` and return their placeholders.
fn bind_values(bindings: &mut Bindings, student: &NewStudent) -> Vec<String> {
    vec![
        bindings.bind("name", student.name.clone()),
        bindings.bind("email", student.email.clone()),
        bindings.bind("department", student.department.clone()),
        bindings.bind("gpa", student.gpa),
        bindings.bind(
            "enrollment_date",
            student.enrollment_date.map(studentdb_core::format_date),
        ),
    ]
}

/// Insert `student` and return its generated key.
///
/// # Errors
/// `Error::Constraint` for a duplicate email or a missing required field;
/// the insert is rolled back.
pub fn add(session: &mut Session, student: &NewStudent) -> Result<RecordId> {
    let mut bindings = session.bindings();

    let id = match session.dialect() {
        Dialect::Positional => {
            let placeholders = bind_values(&mut bindings, student);
            let sql = format!(
                "INSERT INTO students (name, email, department, gpa, enrollment_date) VALUES ({})",
                placeholders.join(", ")
            );
            session.write(|tx| {
                bindings.execute(tx, &sql)?;
                Ok(tx.last_insert_rowid())
            })?
        }
        Dialect::Named => session.write(|tx| {
            let id = schema::next_value(tx, STUDENT_SEQUENCE)?;
            let key = bindings.bind("student_id", id);
            let placeholders = bind_values(&mut bindings, student);
            let sql = format!(
                "INSERT INTO students (student_id, name, email, department, gpa, enrollment_date) \
                 VALUES ({}, {})",
                key,
                placeholders.join(", ")
            );
            bindings.execute(tx, &sql)?;
            Ok(id)
        })?,
    };

    info!(id, name = %student.name, "student added");
    Ok(id)
}

/// All students in key order.
pub fn list(session: &Session) -> Result<Vec<Student>> {
    table::select_all(session, &STUDENTS, from_row)
}

/// The student with key `id`. Absence is `Ok(None)`, never an error.
pub fn get(session: &Session, id: RecordId) -> Result<Option<Student>> {
    table::select_by_key(session, &STUDENTS, id, from_row)
}

/// Apply the supplied fields of `patch` to student `id`.
///
/// # Errors
/// - `Error::NothingToUpdate` if no field was supplied
/// - `Error::NotFound` if no student has key `id`
pub fn update(session: &mut Session, id: RecordId, patch: &StudentPatch) -> Result<()> {
    table::apply_update(session, &STUDENTS, id, patch)?;
    info!(id, "student updated");
    Ok(())
}

/// Delete student `id`.
///
/// # Errors
/// Returns `Error::NotFound` if nothing was deleted.
pub fn delete(session: &mut Session, id: RecordId) -> Result<()> {
    table::delete_by_key(session, &STUDENTS, id)?;
    info!(id, "student deleted");
    Ok(())
}

pub fn count(session: &Session) -> Result<u64> {
    table::count(session, &STUDENTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ConnectionConfig, Error, RecordKind};

    fn open(dialect: Dialect) -> Session {
        Session::open(ConnectionConfig::in_memory(RecordKind::Students).with_dialect(dialect))
            .unwrap()
    }

    fn alice() -> NewStudent {
        NewStudent::new("Alice Johnson", "alice.j@university.edu")
            .with_department("Computer Science")
            .with_gpa(3.8)
            .with_enrollment_date(parse_date("2022-08-15").unwrap())
    }

    #[test]
    fn test_add_then_get_roundtrip() {
        for dialect in [Dialect::Positional, Dialect::Named] {
            let mut session = open(dialect);
            let id = add(&mut session, &alice()).unwrap();

            let stored = get(&session, id).unwrap().expect("student should exist");
            assert_eq!(stored, alice().into_student(id));
        }
    }

    #[test]
    fn test_optional_fields_stay_null() {
        let mut session = open(Dialect::Positional);
        let id = add(&mut session, &NewStudent::new("Bob", "bob@uni.edu")).unwrap();

        let stored = get(&session, id).unwrap().unwrap();
        assert_eq!(stored.department, None);
        assert_eq!(stored.gpa, None);
        assert_eq!(stored.enrollment_date, None);
    }

    #[test]
    fn test_keys_increase() {
        for dialect in [Dialect::Positional, Dialect::Named] {
            let mut session = open(dialect);
            let first = add(&mut session, &NewStudent::new("A", "a@x")).unwrap();
            let second = add(&mut session, &NewStudent::new("B", "b@x")).unwrap();
            assert_eq!(first, 1);
            assert!(second > first);
        }
    }

    #[test]
    fn test_duplicate_email_is_rolled_back() {
        for dialect in [Dialect::Positional, Dialect::Named] {
            let mut session = open(dialect);
            add(&mut session, &alice()).unwrap();

            let err = add(&mut session, &alice()).unwrap_err();
            assert!(matches!(err, Error::Constraint(_)), "got {err:?}");
            assert_eq!(count(&session).unwrap(), 1);
        }
    }

    #[test]
    fn test_failed_insert_does_not_consume_sequence() {
        let mut session = open(Dialect::Named);
        add(&mut session, &alice()).unwrap();
        add(&mut session, &alice()).unwrap_err();

        let id = add(&mut session, &NewStudent::new("Carol", "carol@x")).unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_get_missing_is_none() {
        let session = open(Dialect::Positional);
        assert!(get(&session, 404).unwrap().is_none());
    }

    #[test]
    fn test_list_is_ordered_by_key() {
        let mut session = open(Dialect::Named);
        for (name, email) in [("C", "c@x"), ("A", "a@x"), ("B", "b@x")] {
            add(&mut session, &NewStudent::new(name, email)).unwrap();
        }

        let ids: Vec<_> = list(&session).unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_update_subset() {
        let mut session = open(Dialect::Positional);
        let id = add(&mut session, &alice()).unwrap();

        let patch = StudentPatch::new().department("Physics").name("  ");
        update(&mut session, id, &patch).unwrap();

        let stored = get(&session, id).unwrap().unwrap();
        let mut expected = alice().into_student(id);
        expected.department = Some("Physics".to_string());
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_update_date_and_gpa() {
        let mut session = open(Dialect::Named);
        let id = add(&mut session, &alice()).unwrap();

        let date = parse_date("2023-01-10").unwrap();
        update(&mut session, id, &StudentPatch::new().gpa(2.0).enrollment_date(date)).unwrap();

        let stored = get(&session, id).unwrap().unwrap();
        assert_eq!(stored.gpa, Some(2.0));
        assert_eq!(stored.enrollment_date, Some(date));
    }

    #[test]
    fn test_update_to_duplicate_email_fails() {
        let mut session = open(Dialect::Positional);
        add(&mut session, &alice()).unwrap();
        let bob = add(&mut session, &NewStudent::new("Bob", "bob@x")).unwrap();

        let err = update(&mut session, bob, &StudentPatch::new().email("alice.j@university.edu"))
            .unwrap_err();
        assert!(matches!(err, Error::Constraint(_)));
        assert_eq!(get(&session, bob).unwrap().unwrap().email, "bob@x");
    }

    #[test]
    fn test_delete() {
        let mut session = open(Dialect::Positional);
        let id = add(&mut session, &alice()).unwrap();

        delete(&mut session, id).unwrap();
        assert!(get(&session, id).unwrap().is_none());
        assert!(matches!(delete(&mut session, id), Err(Error::NotFound(_))));
    }
}
