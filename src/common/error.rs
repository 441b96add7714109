//! Error types for StudentDB.

use rusqlite::ErrorCode;
use thiserror::Error;

use crate::common::RecordId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in StudentDB.
///
/// Every record operation returns one of these instead of printing and
/// carrying on, so the menu can pattern-match on the kind to pick its message.
///
/// # Classes
/// - Fatal setup: [`Error::Connect`], [`Error::Io`]
/// - Recoverable: everything the menu reports and then keeps looping over
/// - Unvalidated input: [`Error::InvalidInput`], which ends the menu loop
#[derive(Debug, Error)]
pub enum Error {
    /// The database could not be opened.
    #[error("Unable to connect to database: {0}")]
    Connect(#[source] rusqlite::Error),

    /// A bootstrap statement failed for a reason other than "already exists".
    #[error("Schema setup failed for {object}: {source}")]
    Schema {
        object: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A `UNIQUE`, `NOT NULL` or primary key constraint rejected a write.
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Any other failure reported by the database.
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// The statement matched no row.
    #[error("No record found with ID: {0}")]
    NotFound(RecordId),

    /// An update was requested with no field supplied.
    #[error("No fields to update")]
    NothingToUpdate,

    /// Text typed where a number was expected.
    ///
    /// This is the one input error the menu does not recover from.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A date that is not `YYYY-MM-DD`.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// The session was used after `close()`.
    #[error("Database session is closed")]
    Closed,

    /// Terminal I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the menu should report this error and keep looping.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Error::Connect(_) | Error::InvalidInput { .. } | Error::Io(_)
        )
    }

    /// True for a `CREATE` rejected because the object is already present.
    ///
    /// SQLite reports this while preparing the statement, so it arrives as
    /// `SqlInputError` from the bundled library and as `SqliteFailure` from
    /// older system libraries.
    pub(crate) fn is_already_exists(err: &rusqlite::Error) -> bool {
        let message = match err {
            rusqlite::Error::SqlInputError { msg, .. } => Some(msg.as_str()),
            rusqlite::Error::SqliteFailure(_, message) => message.as_deref(),
            _ => None,
        };
        message.is_some_and(|m| m.contains("already exists"))
    }

    /// True for an insert rejected because its primary key is taken.
    pub(crate) fn is_duplicate_key(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Error::Constraint(message.unwrap_or_else(|| failure.to_string()))
            }
            other => Error::Database(other),
        }
    }
}
