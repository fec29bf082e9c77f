//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure the busy timeout used while another process holds a lock.
//!
//! # Invariants
//! - Opening a file path creates the database file when absent.
//! - File paths are plain file names; `file:` URIs are not interpreted.
//! - Schema creation is not part of opening; callers run `ensure_schema`.

use super::DbResult;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Busy timeout applied when the caller does not override it.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// rusqlite's default flags without SQLITE_OPEN_URI.
const FILE_OPEN_FLAGS: OpenFlags = OpenFlags::SQLITE_OPEN_READ_WRITE
    .union(OpenFlags::SQLITE_OPEN_CREATE)
    .union(OpenFlags::SQLITE_OPEN_NO_MUTEX);

/// Opens (or creates) a SQLite database file.
///
/// # Side effects
/// - Creates the file if it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, busy_timeout: Duration) -> DbResult<Connection> {
    open_with("file", busy_timeout, || {
        Connection::open_with_flags(path.as_ref(), FILE_OPEN_FLAGS)
    })
}

/// Opens a private in-memory SQLite database.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory(busy_timeout: Duration) -> DbResult<Connection> {
    open_with("memory", busy_timeout, Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    busy_timeout: Duration,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match open().and_then(|conn| {
        conn.busy_timeout(busy_timeout)?;
        Ok(conn)
    }) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::{open_db, DEFAULT_BUSY_TIMEOUT, FILE_OPEN_FLAGS};
    use rusqlite::OpenFlags;

    #[test]
    fn file_flags_create_read_write_without_uri_parsing() {
        assert!(FILE_OPEN_FLAGS.contains(OpenFlags::SQLITE_OPEN_READ_WRITE));
        assert!(FILE_OPEN_FLAGS.contains(OpenFlags::SQLITE_OPEN_CREATE));
        assert!(!FILE_OPEN_FLAGS.contains(OpenFlags::SQLITE_OPEN_URI));
    }

    #[test]
    fn query_like_suffix_is_part_of_the_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db?mode=ro");

        let conn = open_db(&path, DEFAULT_BUSY_TIMEOUT).unwrap();
        conn.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);")
            .unwrap();

        assert!(path.exists());
    }
}
