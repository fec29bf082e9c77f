//! Domain model for the employee store.
//!
//! # Responsibility
//! - Define the single persisted entity and its insert draft.
//! - Keep field validation independent from SQLite.
//!
//! # Invariants
//! - Every persisted employee is identified by a storage-assigned `EmployeeId`.
//! - Rows are never updated or deleted through core APIs.

pub mod employee;
