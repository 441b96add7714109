//! Configuration for StudentDB.
//!
//! There is no configuration file: defaults live here as constants and the
//! menu lets the user override the database path at startup.

use crate::storage::Dialect;

/// Database file used for student records when the prompt is left blank.
pub const DEFAULT_STUDENT_DATABASE: &str = "students.db";

/// Database file used for employee records when the prompt is left blank.
pub const DEFAULT_EMPLOYEE_DATABASE: &str = "employees.db";

/// Database name that opens a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Sequence that hands out student keys under [`Dialect::Named`].
pub const STUDENT_SEQUENCE: &str = "student_seq";

/// GPA range shown as a hint in prompts. Not enforced by the store.
pub const GPA_HINT: (f64, f64) = (0.0, 4.0);

/// Environment variable holding the log level (`error` .. `trace`).
pub const LOG_ENV_VAR: &str = "STUDENTDB_LOG";

/// Which table a session manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Students,
    Employees,
}

impl RecordKind {
    pub fn default_database(self) -> &'static str {
        match self {
            RecordKind::Students => DEFAULT_STUDENT_DATABASE,
            RecordKind::Employees => DEFAULT_EMPLOYEE_DATABASE,
        }
    }
}

/// Everything needed to open a [`Session`](crate::storage::Session).
///
/// # Example
/// ```
/// use studentdb::common::{ConnectionConfig, RecordKind};
/// use studentdb::storage::Dialect;
///
/// let config = ConnectionConfig::new(RecordKind::Students)
///     .with_dialect(Dialect::Named)
///     .with_database(":memory:");
/// assert!(config.is_in_memory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Path of the database file, or [`IN_MEMORY_DATABASE`].
    pub database: String,
    pub dialect: Dialect,
    pub kind: RecordKind,
}

impl ConnectionConfig {
    /// Defaults for `kind`: its default file and the positional dialect.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            database: kind.default_database().to_string(),
            dialect: Dialect::default(),
            kind,
        }
    }

    /// In-memory database for `kind`, mostly useful in tests.
    pub fn in_memory(kind: RecordKind) -> Self {
        Self::new(kind).with_database(IN_MEMORY_DATABASE)
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY_DATABASE
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(RecordKind::Students)
    }
}
