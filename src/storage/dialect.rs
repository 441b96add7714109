//! SQL dialects: placeholder style plus key and DDL strategy.

use std::fmt;

/// How statements are written for a session.
///
/// | Dialect | Placeholders | Surrogate keys | Table creation |
/// |---|---|---|---|
/// | `Positional` | `?1, ?2, ...` | `AUTOINCREMENT` column | `CREATE TABLE IF NOT EXISTS` |
/// | `Named` | `:name, :email, ...` | `student_seq` sequence | unconditional, "already exists" discarded |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Positional,
    Named,
}

impl Dialect {
    /// Placeholder text for the parameter `name` bound at 1-based `position`.
    ///
    /// # Example
    /// ```
    /// use studentdb::storage::Dialect;
    ///
    /// assert_eq!(Dialect::Positional.placeholder("email", 2), "?2");
    /// assert_eq!(Dialect::Named.placeholder("email", 2), ":email");
    /// ```
    pub fn placeholder(self, name: &str, position: usize) -> String {
        match self {
            Dialect::Positional => format!("?{}", position),
            Dialect::Named => format!(":{}", name),
        }
    }

    /// Whether the store supports `CREATE TABLE IF NOT EXISTS`.
    pub fn has_if_not_exists(self) -> bool {
        matches!(self, Dialect::Positional)
    }

    /// Whether surrogate keys come from a sequence object.
    pub fn uses_sequence(self) -> bool {
        matches!(self, Dialect::Named)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Positional => write!(f, "positional"),
            Dialect::Named => write!(f, "named"),
        }
    }
}
