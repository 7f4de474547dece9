//! Data layer for AgriBot: registered users and client status checks.
//!
//! Two backends sit behind the [`Store`] enum:
//!
//! ```text
//! Store
//!   |-- Memory   (MemoryStore: process-local tables, default for dev/tests)
//!   +-- Postgres (PostgresPool)
//!         |-- UserStore    (users table)
//!         +-- StatusStore  (status_checks table)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- Backend dispatch used by the HTTP layer
//! - [`records`] -- Stored user record including the password hash
//! - [`memory`] -- In-memory tables
//! - [`postgres`] -- `PostgreSQL` connection pool and migrations
//! - [`user_store`] -- `users` queries
//! - [`status_store`] -- `status_checks` queries
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod postgres;
pub mod records;
pub mod status_store;
pub mod store;
pub mod user_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use memory::MemoryStore;
pub use postgres::PostgresPool;
pub use records::{UserRecord, normalize_email};
pub use status_store::StatusStore;
pub use store::Store;
pub use user_store::UserStore;
