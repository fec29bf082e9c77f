//! Employee domain model.
//!
//! # Responsibility
//! - Define the persisted `Employee` record and its insert draft.
//! - Validate caller-supplied form values before any storage access.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another employee.
//! - `name` and `role` are non-empty after trimming.
//! - `salary` is finite and non-negative for every row this crate writes.
//!   Rows written by other clients may break this and are still readable.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned row identifier (`funcionarios.id`).
pub type EmployeeId = i64;

/// Persisted employee row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub salary: f64,
    pub role: String,
}

/// Field names used to report validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Name,
    Salary,
    Role,
    /// Search fragment or threshold passed to a query.
    SearchTerm,
}

impl EmployeeField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Salary => "salary",
            Self::Role => "role",
            Self::SearchTerm => "search_term",
        }
    }
}

/// Local precondition failure for caller-supplied values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Field is empty or whitespace-only.
    Blank(EmployeeField),
    /// Text could not be parsed as a real number.
    NotANumber { field: EmployeeField, value: String },
    /// Number parsed but is NaN or infinite.
    NotFinite(EmployeeField),
    /// Salary below zero.
    NegativeSalary,
}

impl EmployeeValidationError {
    /// Returns the offending field.
    pub fn field(&self) -> EmployeeField {
        match self {
            Self::Blank(field) | Self::NotFinite(field) => *field,
            Self::NotANumber { field, .. } => *field,
            Self::NegativeSalary => EmployeeField::Salary,
        }
    }
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank(field) => write!(f, "{} cannot be empty", field.as_str()),
            Self::NotANumber { field, value } => {
                write!(f, "{} must be a number, got `{value}`", field.as_str())
            }
            Self::NotFinite(field) => write!(f, "{} must be a finite number", field.as_str()),
            Self::NegativeSalary => write!(f, "salary cannot be negative"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// Validated insert payload. The store assigns `id` on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    name: String,
    salary: f64,
    role: String,
}

impl NewEmployee {
    /// Builds a draft from typed values.
    ///
    /// `name` and `role` are trimmed before storage.
    pub fn new(
        name: impl AsRef<str>,
        salary: f64,
        role: impl AsRef<str>,
    ) -> Result<Self, EmployeeValidationError> {
        let name = require_text(name.as_ref(), EmployeeField::Name)?;
        let salary = validate_salary(salary)?;
        let role = require_text(role.as_ref(), EmployeeField::Role)?;
        Ok(Self { name, salary, role })
    }

    /// Builds a draft from raw form text.
    ///
    /// Fields are checked in form order (name, salary, role) and the first
    /// failure is returned.
    pub fn parse(name: &str, salary: &str, role: &str) -> Result<Self, EmployeeValidationError> {
        let name = require_text(name, EmployeeField::Name)?;
        let salary = validate_salary(parse_real(salary, EmployeeField::Salary)?)?;
        let role = require_text(role, EmployeeField::Role)?;
        Ok(Self { name, salary, role })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Attaches a storage-assigned id, producing the persisted shape.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            salary: self.salary,
            role: self.role,
        }
    }
}

impl Employee {
    /// Checks a row against entity invariants; used to flag rows on read.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.name.trim().is_empty() {
            return Err(EmployeeValidationError::Blank(EmployeeField::Name));
        }
        validate_salary(self.salary)?;
        if self.role.trim().is_empty() {
            return Err(EmployeeValidationError::Blank(EmployeeField::Role));
        }
        Ok(())
    }
}

/// Parses user-entered text as a finite real number.
///
/// Accepts surrounding whitespace and a decimal comma (`2500,50`) as typed on
/// pt-BR numeric keyboards. Trailing garbage such as `12abc` is rejected.
pub fn parse_real(raw: &str, field: EmployeeField) -> Result<f64, EmployeeValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EmployeeValidationError::Blank(field));
    }

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let value = normalized
        .parse::<f64>()
        .map_err(|_| EmployeeValidationError::NotANumber {
            field,
            value: trimmed.to_string(),
        })?;
    if !value.is_finite() {
        return Err(EmployeeValidationError::NotFinite(field));
    }
    Ok(value)
}

/// Rejects empty or whitespace-only search fragments.
pub fn require_fragment(fragment: &str) -> Result<(), EmployeeValidationError> {
    if fragment.trim().is_empty() {
        return Err(EmployeeValidationError::Blank(EmployeeField::SearchTerm));
    }
    Ok(())
}

fn require_text(raw: &str, field: EmployeeField) -> Result<String, EmployeeValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EmployeeValidationError::Blank(field));
    }
    Ok(trimmed.to_string())
}

fn validate_salary(salary: f64) -> Result<f64, EmployeeValidationError> {
    if !salary.is_finite() {
        return Err(EmployeeValidationError::NotFinite(EmployeeField::Salary));
    }
    if salary < 0.0 {
        return Err(EmployeeValidationError::NegativeSalary);
    }
    // Normalize -0.0 so it is stored as plain zero.
    Ok(salary + 0.0)
}
