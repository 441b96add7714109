//! Core record types for StudentDB.
//!
//! This crate holds the data model shared by the storage and menu layers,
//! with no database dependency of its own:
//!
//! # Types
//! - [`Student`] / [`NewStudent`] / [`StudentPatch`] - Student rows, inserts, partial updates
//! - [`Employee`] / [`EmployeePatch`] - Employee rows and partial updates
//! - [`FieldValue`] - A typed value bound to a statement parameter
//! - [`PartialUpdate`] - Present-or-absent fields consumed by one generic `UPDATE`
//!
//! # Example
//! ```
//! use studentdb_core::{PartialUpdate, StudentPatch};
//!
//! // Blank input means "leave this field alone"
//! let patch = StudentPatch::new().name("").gpa(3.7);
//! let columns: Vec<_> = patch.assignments().iter().map(|a| a.column).collect();
//! assert_eq!(columns, vec!["gpa"]);
//! ```

pub mod types;

// Re-export commonly used items at crate root
pub use types::{
    format_date, parse_date, Assignment, Employee, EmployeePatch, FieldValue, NewStudent,
    PartialUpdate, RecordId, Student, StudentPatch,
};
