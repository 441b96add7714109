//! StudentDB - interactive CRUD over a student (or employee) table.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           StudentDB                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Interactive Menu (menu/)                    │   │
//! │  │      Console → choice → prompts → record operation       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             Record Operations (records/)                 │   │
//! │  │   add | list | get | update (partial) | delete           │   │
//! │  │         students (surrogate) · employees (natural)       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Storage Layer (storage/)                  │   │
//! │  │   Session + Bindings + schema bootstrap                  │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  Dialects: Positional (?N)  |  Named (:name)    │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │                    SQLite (rusqlite, bundled)                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config, record types)
//! - [`storage`] - Session, dialects, statement bindings, schema bootstrap
//! - [`records`] - Record operations for students and employees
//! - [`menu`] - The interactive text menu
//!
//! # Quick Start
//! ```
//! use studentdb::common::{ConnectionConfig, NewStudent, RecordKind, StudentPatch};
//! use studentdb::records::students;
//! use studentdb::storage::Session;
//!
//! let mut session = Session::open(ConnectionConfig::in_memory(RecordKind::Students)).unwrap();
//!
//! let id = students::add(&mut session, &NewStudent::new("Ada", "ada@uni.edu")).unwrap();
//! students::update(&mut session, id, &StudentPatch::new().gpa(4.0)).unwrap();
//!
//! let ada = students::get(&session, id).unwrap().unwrap();
//! assert_eq!(ada.gpa, Some(4.0));
//! ```

pub mod common;
pub mod menu;
pub mod records;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::{ConnectionConfig, Error, RecordId, RecordKind, Result};
pub use storage::{Dialect, Session};
