//! Storage layer - the database session and the SQL around it.
//!
//! This module handles everything that touches the connection:
//! - [`Session`] - Owns the connection; scoped write transactions
//! - [`Dialect`] - Placeholder style and key/DDL strategy
//! - [`Bindings`] - Parameter values for one statement
//! - [`schema`] - Idempotent table and sequence bootstrap

mod bindings;
mod dialect;
pub mod schema;
mod session;

pub use bindings::Bindings;
pub use dialect::Dialect;
pub use schema::BootstrapReport;
pub use session::Session;
