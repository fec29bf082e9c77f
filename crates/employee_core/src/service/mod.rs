//! Core use-case services.
//!
//! # Responsibility
//! - Own the store connection lifecycle and expose employee use cases.
//! - Keep presentation callers decoupled from storage details.

pub mod employee_store;
pub mod response;
