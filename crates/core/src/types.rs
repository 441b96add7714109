//! Core type definitions for StudentDB.

use std::fmt;

use time::macros::format_description;
use time::Date;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Primary key of a stored record.
///
/// Student keys are generated by the store; employee keys are supplied by the
/// user. Both are plain SQL integers.
pub type RecordId = i64;

// ============================================================================
// DATES
// ============================================================================

/// Parse an ISO `YYYY-MM-DD` date.
///
/// Surrounding whitespace is ignored.
///
/// # Example
/// ```
/// use studentdb_core::parse_date;
///
/// let date = parse_date("2024-09-01").unwrap();
/// assert_eq!(date.year(), 2024);
/// assert!(parse_date("09/01/2024").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<Date, time::error::Parse> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]"))
}

/// Format a date as `YYYY-MM-DD`, the form it is stored in.
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

// ============================================================================
// FIELD VALUES
// ============================================================================

/// A single typed value bound to a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Real(f64),
    Text(String),
    Date(Date),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Real(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{}", v),
            FieldValue::Date(v) => write!(f, "{}", format_date(*v)),
        }
    }
}

// ============================================================================
// PARTIAL UPDATES
// ============================================================================

/// One `column = value` pair of an `UPDATE ... SET` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: &'static str,
    pub value: FieldValue,
}

impl Assignment {
    /// Text assignment; blank text counts as "not supplied".
    pub fn text(column: &'static str, value: &Option<String>) -> Option<Self> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Self {
                column,
                value: FieldValue::Text(v.to_string()),
            })
    }

    pub fn real(column: &'static str, value: Option<f64>) -> Option<Self> {
        value.map(|v| Self {
            column,
            value: FieldValue::Real(v),
        })
    }

    pub fn date(column: &'static str, value: Option<Date>) -> Option<Self> {
        value.map(|v| Self {
            column,
            value: FieldValue::Date(v),
        })
    }
}

/// A record change where every mutable field is present or absent.
///
/// Only the present fields end up in the `SET` clause; absent fields keep
/// their stored values.
pub trait PartialUpdate {
    /// Assignments for the fields actually supplied, in column order.
    fn assignments(&self) -> Vec<Assignment>;

    /// True when no field was supplied.
    fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }
}

// ============================================================================
// STUDENTS
// ============================================================================

/// A row of the `students` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub gpa: Option<f64>,
    pub enrollment_date: Option<Date>,
}

/// Field values for a student that has no key yet.
///
/// # Example
/// ```
/// use studentdb_core::{parse_date, NewStudent};
///
/// let student = NewStudent::new("Ada", "ada@uni.edu")
///     .with_department("Mathematics")
///     .with_gpa(3.9)
///     .with_enrollment_date(parse_date("2023-09-01").unwrap());
/// assert_eq!(student.gpa, Some(3.9));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub gpa: Option<f64>,
    pub enrollment_date: Option<Date>,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: None,
            gpa: None,
            enrollment_date: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_gpa(mut self, gpa: f64) -> Self {
        self.gpa = Some(gpa);
        self
    }

    pub fn with_enrollment_date(mut self, date: Date) -> Self {
        self.enrollment_date = Some(date);
        self
    }

    /// The stored row this insert produces once the store assigns `id`.
    pub fn into_student(self, id: RecordId) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
            gpa: self.gpa,
            enrollment_date: self.enrollment_date,
        }
    }
}

/// Partial update of a student. `None` (or blank text) leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub gpa: Option<f64>,
    pub enrollment_date: Option<Date>,
}

impl StudentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn gpa(mut self, gpa: f64) -> Self {
        self.gpa = Some(gpa);
        self
    }

    pub fn enrollment_date(mut self, date: Date) -> Self {
        self.enrollment_date = Some(date);
        self
    }

    /// Apply the present fields to an in-memory copy.
    ///
    /// Mirrors what the `UPDATE` does to the stored row.
    pub fn apply_to(&self, student: &mut Student) {
        for assignment in self.assignments() {
            match (assignment.column, assignment.value) {
                ("name", FieldValue::Text(v)) => student.name = v,
                ("email", FieldValue::Text(v)) => student.email = v,
                ("department", FieldValue::Text(v)) => student.department = Some(v),
                ("gpa", FieldValue::Real(v)) => student.gpa = Some(v),
                ("enrollment_date", FieldValue::Date(v)) => student.enrollment_date = Some(v),
                _ => {}
            }
        }
    }
}

impl PartialUpdate for StudentPatch {
    fn assignments(&self) -> Vec<Assignment> {
        [
            Assignment::text("name", &self.name),
            Assignment::text("email", &self.email),
            Assignment::text("department", &self.department),
            Assignment::real("gpa", self.gpa),
            Assignment::date("enrollment_date", self.enrollment_date),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

// ============================================================================
// EMPLOYEES
// ============================================================================

/// A row of the `employees` table. The key is chosen by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    pub salary: Option<f64>,
}

impl Employee {
    pub fn new(id: RecordId, name: impl Into<String>, salary: Option<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            salary,
        }
    }
}

/// Partial update of an employee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub salary: Option<f64>,
}

impl EmployeePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
        self
    }
}

impl PartialUpdate for EmployeePatch {
    fn assignments(&self) -> Vec<Assignment> {
        [
            Assignment::text("name", &self.name),
            Assignment::real("salary", self.salary),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
