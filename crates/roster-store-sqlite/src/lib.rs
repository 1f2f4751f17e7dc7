//! SQLite backend for the Roster person registry.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. The natural-key uniqueness
//! invariant lives here, enforced by a unique index rather than a
//! check-then-write sequence.

mod encode;
mod error;
mod schema;
mod store;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;
