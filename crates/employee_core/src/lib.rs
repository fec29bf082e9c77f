//! Local data-access core for employee records.
//! Screens call into this crate; it owns the SQLite connection and all SQL.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{
    Employee, EmployeeField, EmployeeId, EmployeeValidationError, NewEmployee,
};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::employee_store::{
    DbLocation, EmployeeStore, StoreConfig, StoreError, StoreErrorKind, StoreResult,
    DEFAULT_DB_FILE_NAME,
};
pub use service::response::{ActionResponse, QueryResponse};
