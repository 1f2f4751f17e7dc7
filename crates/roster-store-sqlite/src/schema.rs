//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup via `execute_batch`. Future
//! migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// AUTOINCREMENT keeps ids monotonically increasing, so an id is never
/// reused even after the record holding it is deleted. The unique index on
/// `national_id_digits` makes the duplicate-key check atomic with every
/// insert and update.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS people (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name          TEXT NOT NULL,
    national_id        TEXT NOT NULL,        -- as given by the client
    national_id_digits TEXT NOT NULL UNIQUE, -- normalized natural key
    birth_date         TEXT NOT NULL,        -- ISO 8601 calendar date
    email              TEXT,
    sex                TEXT,
    birthplace         TEXT,
    nationality        TEXT,
    registered_at      TEXT NOT NULL,        -- RFC 3339 UTC; server-assigned
    updated_at         TEXT NOT NULL         -- RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS people_full_name_idx ON people(full_name);

PRAGMA user_version = 1;
";
