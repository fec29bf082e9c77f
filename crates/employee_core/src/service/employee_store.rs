//! Employee store: connection owner and use-case entry points.
//!
//! # Responsibility
//! - Own one SQLite connection, opened lazily and reused for the store lifetime.
//! - Validate caller input before touching storage.
//! - Classify failures into the store error taxonomy.
//!
//! # Invariants
//! - At most one connection is opened per store; a failed open leaves the
//!   store unconnected so the caller can retry.
//! - Each data operation issues exactly one statement; rows are never cached.
//! - Methods take `&mut self`, so overlapping calls on one store cannot be
//!   expressed.

use crate::db::schema::{ensure_schema, user_version};
use crate::db::{open_db, open_db_in_memory, DbError, DEFAULT_BUSY_TIMEOUT};
use crate::model::employee::{
    parse_real, require_fragment, Employee, EmployeeField, EmployeeId, EmployeeValidationError,
    NewEmployee,
};
use crate::repo::employee_repo::{EmployeeRepository, RepoError, SqliteEmployeeRepository};
use log::{error, info, warn};
use rusqlite::Connection;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Database file name used when the caller only picks a directory.
pub const DEFAULT_DB_FILE_NAME: &str = "meu_banco.db";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure category of a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorKind {
    Connection,
    Schema,
    Validation,
    Write,
    Query,
}

/// Store-level error. Every variant is recoverable by retrying the action.
#[derive(Debug)]
pub enum StoreError {
    /// Storage could not be opened.
    Connection(DbError),
    /// Table creation failed.
    Schema(DbError),
    /// Caller-supplied value failed a local precondition.
    Validation(EmployeeValidationError),
    /// Insert rejected by storage.
    Write(RepoError),
    /// Read rejected by storage or returned a row that could not be decoded.
    Query(RepoError),
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Connection(_) => StoreErrorKind::Connection,
            Self::Schema(_) => StoreErrorKind::Schema,
            Self::Validation(_) => StoreErrorKind::Validation,
            Self::Write(_) => StoreErrorKind::Write,
            Self::Query(_) => StoreErrorKind::Query,
        }
    }

    fn write(err: RepoError) -> Self {
        match err {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Write(other),
        }
    }

    fn query(err: RepoError) -> Self {
        match err {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Query(other),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "failed to open database: {err}"),
            Self::Schema(err) => write!(f, "failed to create employee table: {err}"),
            Self::Validation(err) => write!(f, "invalid input: {err}"),
            Self::Write(err) => write!(f, "failed to insert employee: {err}"),
            Self::Query(err) => write!(f, "failed to query employees: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) | Self::Schema(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Write(err) | Self::Query(err) => Some(err),
        }
    }
}

impl From<EmployeeValidationError> for StoreError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Where the store keeps its database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

/// Store construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: DbLocation,
    /// How long SQLite waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl StoreConfig {
    /// Uses the database file at `path`, created on first connect if absent.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DbLocation::File(path.into()),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Uses [`DEFAULT_DB_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::file(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    /// Uses a private in-memory database, discarded with the store.
    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::Memory,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}

/// Owner of the employee database connection.
///
/// Construct with [`EmployeeStore::new`], then call [`EmployeeStore::connect`]
/// (or any operation, which connects on demand).
pub struct EmployeeStore {
    config: StoreConfig,
    conn: Option<Connection>,
}

impl EmployeeStore {
    /// Creates an unconnected store. No I/O happens here.
    pub fn new(config: StoreConfig) -> Self {
        Self { config, conn: None }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns whether the connection has been opened.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Opens the connection on first call and returns the live handle.
    ///
    /// Later calls return the same handle without reopening.
    pub fn connect(&mut self) -> StoreResult<&Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.open()?,
        };
        let conn: &Connection = self.conn.insert(conn);
        Ok(conn)
    }

    fn open(&self) -> StoreResult<Connection> {
        let opened = match &self.config.location {
            DbLocation::File(path) => open_db(path, self.config.busy_timeout),
            DbLocation::Memory => open_db_in_memory(self.config.busy_timeout),
        };
        opened.map_err(|err| {
            error!("event=store_connect module=store status=error error={err}");
            StoreError::Connection(err)
        })
    }

    /// Connects if needed and reads `PRAGMA user_version` as a liveness check.
    pub fn probe(&mut self) -> StoreResult<u32> {
        let conn = self.connect()?;
        user_version(conn).map_err(StoreError::Connection)
    }

    /// Creates the `funcionarios` table if absent. Safe to call on every start.
    pub fn ensure_schema(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        let conn = self.connect()?;
        match ensure_schema(conn) {
            Ok(()) => {
                info!(
                    "event=ensure_schema module=store status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=ensure_schema module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(StoreError::Schema(err))
            }
        }
    }

    /// Validates raw form values and inserts one employee.
    ///
    /// Validation runs before the connection is touched, so invalid input
    /// never opens or writes storage. Returns the new row id.
    pub fn insert(&mut self, name: &str, salary: &str, role: &str) -> StoreResult<EmployeeId> {
        let draft = NewEmployee::parse(name, salary, role).map_err(|err| {
            warn!(
                "event=employee_insert module=store status=rejected field={}",
                err.field().as_str()
            );
            StoreError::Validation(err)
        })?;
        self.insert_employee(&draft)
    }

    /// Inserts an already validated draft and returns the new row id.
    pub fn insert_employee(&mut self, draft: &NewEmployee) -> StoreResult<EmployeeId> {
        let started_at = Instant::now();
        let result = self.with_repo(|repo| repo.create_employee(draft), StoreError::write);
        match &result {
            Ok(id) => info!(
                "event=employee_insert module=store status=ok id={id} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=employee_insert module=store status=error kind={:?} duration_ms={} error={}",
                err.kind(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    /// Returns every employee in ascending id order.
    pub fn find_all(&mut self) -> StoreResult<Vec<Employee>> {
        self.run_query("find_all", |repo| repo.list_employees())
    }

    /// Returns employees whose name contains `fragment`.
    ///
    /// ASCII letters match case-insensitively. Blank fragments are rejected.
    pub fn find_by_name_substring(&mut self, fragment: &str) -> StoreResult<Vec<Employee>> {
        require_fragment(fragment)?;
        self.run_query("find_by_name", |repo| repo.find_by_name_fragment(fragment))
    }

    /// Returns employees whose role contains `fragment`.
    pub fn find_by_role_substring(&mut self, fragment: &str) -> StoreResult<Vec<Employee>> {
        require_fragment(fragment)?;
        self.run_query("find_by_role", |repo| repo.find_by_role_fragment(fragment))
    }

    /// Parses `threshold` and returns employees with `salary >= threshold`.
    pub fn find_by_min_salary(&mut self, threshold: &str) -> StoreResult<Vec<Employee>> {
        let threshold = parse_real(threshold, EmployeeField::SearchTerm)?;
        self.find_by_min_salary_value(threshold)
    }

    /// Typed variant of [`EmployeeStore::find_by_min_salary`].
    pub fn find_by_min_salary_value(&mut self, threshold: f64) -> StoreResult<Vec<Employee>> {
        if !threshold.is_finite() {
            return Err(EmployeeValidationError::NotFinite(EmployeeField::SearchTerm).into());
        }
        self.run_query("find_by_min_salary", |repo| {
            repo.find_by_min_salary(threshold)
        })
    }

    /// Returns the number of stored employees.
    pub fn count(&mut self) -> StoreResult<u64> {
        self.run_query("count", |repo| repo.count_employees())
    }

    fn run_query<T>(
        &mut self,
        event: &str,
        op: impl FnOnce(&SqliteEmployeeRepository<'_>) -> Result<T, RepoError>,
    ) -> StoreResult<T> {
        let started_at = Instant::now();
        let result = self.with_repo(op, StoreError::query);
        match &result {
            Ok(_) => info!(
                "event=employee_query module=store op={event} status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=employee_query module=store op={event} status=error kind={:?} duration_ms={} error={}",
                err.kind(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn with_repo<T>(
        &mut self,
        op: impl FnOnce(&SqliteEmployeeRepository<'_>) -> Result<T, RepoError>,
        classify: fn(RepoError) -> StoreError,
    ) -> StoreResult<T> {
        let conn = self.connect()?;
        let repo = SqliteEmployeeRepository::new(conn);
        op(&repo).map_err(classify)
    }
}
