//! Parameter bindings for one statement.
//!
//! Values are collected together with the placeholder text that refers to
//! them, then bound by position or by name depending on the dialect.

use rusqlite::types::Value;
use rusqlite::{Connection, Row, Statement};
use studentdb_core::{format_date, FieldValue};
use tracing::debug;

use crate::storage::Dialect;

/// Collects the values of one parameterized statement.
///
/// # Example
/// ```
/// use studentdb::storage::{Bindings, Dialect};
///
/// let mut bindings = Bindings::new(Dialect::Named);
/// let ph = bindings.bind("name", "Ada".to_string());
/// assert_eq!(ph, ":name");
/// assert_eq!(bindings.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Bindings {
    dialect: Dialect,
    /// `(":name", value)` in bind order.
    entries: Vec<(String, Value)>,
}

impl Bindings {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            entries: Vec::new(),
        }
    }

    /// Add a value and return the placeholder to splice into the SQL.
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) -> String {
        self.entries.push((format!(":{}", name), value.into()));
        self.dialect.placeholder(name, self.entries.len())
    }

    /// Like [`bind`](Self::bind) for a record field value.
    pub fn bind_field(&mut self, name: &str, value: FieldValue) -> String {
        let value = match value {
            FieldValue::Real(v) => Value::Real(v),
            FieldValue::Text(v) => Value::Text(v),
            FieldValue::Date(v) => Value::Text(format_date(v)),
        };
        self.bind(name, value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn apply(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<()> {
        for (position, (name, value)) in self.entries.iter().enumerate() {
            let index = match self.dialect {
                Dialect::Positional => position + 1,
                Dialect::Named => stmt
                    .parameter_index(name)?
                    .ok_or_else(|| rusqlite::Error::InvalidParameterName(name.clone()))?,
            };
            stmt.raw_bind_parameter(index, value)?;
        }
        Ok(())
    }

    /// Execute `sql` and return the affected row count.
    pub fn execute(&self, conn: &Connection, sql: &str) -> rusqlite::Result<usize> {
        debug!(sql, params = self.entries.len(), "execute");
        let mut stmt = conn.prepare(sql)?;
        self.apply(&mut stmt)?;
        stmt.raw_execute()
    }

    /// Run `sql` and map every returned row.
    pub fn query<T, F>(
        &self,
        conn: &Connection,
        sql: &str,
        mut map: F,
    ) -> rusqlite::Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(sql, params = self.entries.len(), "query");
        let mut stmt = conn.prepare(sql)?;
        self.apply(&mut stmt)?;

        let mut rows = stmt.raw_query();
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(map(row)?);
        }
        Ok(out)
    }

    /// Run `sql` and map the first row, if any.
    pub fn query_optional<T, F>(
        &self,
        conn: &Connection,
        sql: &str,
        mut map: F,
    ) -> rusqlite::Result<Option<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(sql, params = self.entries.len(), "query_optional");
        let mut stmt = conn.prepare(sql)?;
        self.apply(&mut stmt)?;

        let mut rows = stmt.raw_query();
        match rows.next()? {
            Some(row) => Ok(Some(map(row)?)),
            None => Ok(None),
        }
    }
}
