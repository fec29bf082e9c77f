//! Employee table definition.
//!
//! # Invariants
//! - DDL is idempotent and safe to run on every startup.
//! - Column names follow the persisted file format (`nome`, `salario`, `cargo`).

use super::DbResult;
use rusqlite::Connection;

/// Name of the single table owned by the store.
pub const EMPLOYEE_TABLE: &str = "funcionarios";

const CREATE_EMPLOYEE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS funcionarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    salario REAL NOT NULL,
    cargo TEXT NOT NULL
);";

/// Creates the `funcionarios` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_EMPLOYEE_TABLE_SQL)?;
    Ok(())
}

/// Returns whether a table with `name` exists in the main schema.
pub fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Reads `PRAGMA user_version`; used as a cheap liveness probe.
pub fn user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
