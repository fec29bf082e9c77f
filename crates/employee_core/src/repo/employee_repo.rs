//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert and query APIs over `funcionarios` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every statement binds values positionally; user text is never spliced
//!   into SQL.
//! - Rows that cannot be decoded (wrong column type) fail the whole read.
//! - Rows that decode but break an entity rule (e.g. a negative salary written
//!   by an older client) are still returned and logged as `invalid_row`.
//! - Substring filters match ASCII letters case-insensitively and treat `%`,
//!   `_` and `\` in the fragment literally.

use crate::db::DbError;
use crate::model::employee::{
    require_fragment, Employee, EmployeeField, EmployeeId, EmployeeValidationError, NewEmployee,
};
use log::warn;
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    nome,
    salario,
    cargo
FROM funcionarios";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for employee insert/query operations.
pub trait EmployeeRepository {
    fn create_employee(&self, draft: &NewEmployee) -> RepoResult<EmployeeId>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    fn find_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Employee>>;
    fn find_by_role_fragment(&self, fragment: &str) -> RepoResult<Vec<Employee>>;
    fn find_by_min_salary(&self, threshold: f64) -> RepoResult<Vec<Employee>>;
    fn count_employees(&self) -> RepoResult<u64>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_employees<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn find_by_fragment(&self, column: Column, fragment: &str) -> RepoResult<Vec<Employee>> {
        require_fragment(fragment)?;
        let filter = format!(
            "WHERE {} LIKE '%' || ?1 || '%' ESCAPE '\\'",
            column.as_sql()
        );
        self.query_employees(&filter, [escape_like(fragment)])
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, draft: &NewEmployee) -> RepoResult<EmployeeId> {
        self.conn.execute(
            "INSERT INTO funcionarios (nome, salario, cargo) VALUES (?1, ?2, ?3);",
            params![draft.name(), draft.salary(), draft.role()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.query_employees("", [])
    }

    fn find_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Employee>> {
        self.find_by_fragment(Column::Name, fragment)
    }

    fn find_by_role_fragment(&self, fragment: &str) -> RepoResult<Vec<Employee>> {
        self.find_by_fragment(Column::Role, fragment)
    }

    fn find_by_min_salary(&self, threshold: f64) -> RepoResult<Vec<Employee>> {
        if !threshold.is_finite() {
            return Err(EmployeeValidationError::NotFinite(EmployeeField::SearchTerm).into());
        }
        self.query_employees("WHERE salario >= ?1", [threshold])
    }

    fn count_employees(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM funcionarios;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

/// Text columns that support substring search.
#[derive(Debug, Clone, Copy)]
enum Column {
    Name,
    Role,
}

impl Column {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Name => "nome",
            Self::Role => "cargo",
        }
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let employee = Employee {
        id: row.get("id")?,
        name: row.get("nome")?,
        salary: row.get("salario")?,
        role: row.get("cargo")?,
    };
    if let Err(err) = employee.validate() {
        warn!(
            "event=employee_query module=repo status=invalid_row id={} field={}",
            employee.id,
            err.field().as_str()
        );
    }
    Ok(employee)
}

/// Escapes `LIKE` wildcards so the fragment matches literally under
/// `ESCAPE '\'`.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_escapes_wildcards_and_escape_char() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Ana"), "Ana");
    }
}
