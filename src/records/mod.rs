//! Record operations.
//!
//! Each operation builds one parameterized statement against a borrowed
//! [`Session`](crate::storage::Session) and returns a typed result:
//! - [`students`] - Surrogate-keyed student records
//! - [`employees`] - Naturally keyed employee records
//! - [`table`] - Shared select, partial update and delete routines

pub mod employees;
pub mod students;
pub mod table;

pub use table::{apply_update, delete_by_key, Table, EMPLOYEES, STUDENTS};
