//! Common types and utilities shared across StudentDB.
//!
//! This module contains the pieces every layer touches:
//! - Configuration constants and [`ConnectionConfig`]
//! - Error types
//! - Record types re-exported from `studentdb-core`

pub mod config;
pub mod error;

pub use config::{ConnectionConfig, RecordKind};
pub use error::{Error, Result};
pub use studentdb_core::{
    Employee, EmployeePatch, FieldValue, NewStudent, PartialUpdate, RecordId, Student,
    StudentPatch,
};
