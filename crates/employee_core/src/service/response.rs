//! Typed response envelopes for presentation callers.
//!
//! # Responsibility
//! - Turn store results into serializable values a UI can render directly.
//! - Carry success/failure as an explicit tag plus error kind.
//!
//! # Invariants
//! - `ok == error_kind.is_none()` for every envelope.
//! - `message` is display text only; callers branch on `ok`/`error_kind`.

use crate::model::employee::{Employee, EmployeeId};
use crate::service::employee_store::{StoreErrorKind, StoreResult};
use serde::Serialize;

/// Outcome of a command (connect, schema creation, insert).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    pub error_kind: Option<StoreErrorKind>,
    /// Row id assigned by an insert.
    pub employee_id: Option<EmployeeId>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, employee_id: Option<EmployeeId>) -> Self {
        Self {
            ok: true,
            error_kind: None,
            employee_id,
            message: message.into(),
        }
    }

    fn failure(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error_kind: Some(kind),
            employee_id: None,
            message: message.into(),
        }
    }

    /// Wraps a unit result, using `success_message` when it succeeded.
    pub fn from_unit(result: StoreResult<()>, success_message: &str) -> Self {
        match result {
            Ok(()) => Self::success(success_message, None),
            Err(err) => Self::failure(err.kind(), err.to_string()),
        }
    }

    /// Wraps an insert result.
    pub fn from_insert(result: StoreResult<EmployeeId>) -> Self {
        match result {
            Ok(id) => Self::success(format!("Employee {id} added."), Some(id)),
            Err(err) => Self::failure(err.kind(), err.to_string()),
        }
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub ok: bool,
    pub error_kind: Option<StoreErrorKind>,
    /// Matching rows; empty on failure or when nothing matched.
    pub items: Vec<Employee>,
    pub message: String,
}

impl QueryResponse {
    pub fn from_query(result: StoreResult<Vec<Employee>>) -> Self {
        match result {
            Ok(items) => {
                let message = if items.is_empty() {
                    "No results.".to_string()
                } else {
                    format!("Found {} result(s).", items.len())
                };
                Self {
                    ok: true,
                    error_kind: None,
                    items,
                    message,
                }
            }
            Err(err) => Self {
                ok: false,
                error_kind: Some(err.kind()),
                items: Vec::new(),
                message: err.to_string(),
            },
        }
    }

    /// Whether the query succeeded with no rows.
    pub fn is_empty_success(&self) -> bool {
        self.ok && self.items.is_empty()
    }
}
