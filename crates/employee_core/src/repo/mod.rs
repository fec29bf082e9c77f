//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the employee data access contract.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Write paths only accept validated `NewEmployee` drafts.
//! - Read paths return every decodable row; rule-breaking rows are logged.

pub mod employee_repo;
