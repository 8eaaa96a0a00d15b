//! Storage crate: allow-list and balance persistence.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserSummary and the admin operation outcomes
//! - [`repository`] – AllowListStore trait (read side used by the authorization gate)
//! - [`access_repo`] – AccessRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod access_repo;
mod error;
mod models;
mod repository;
mod sqlite_pool;


pub use access_repo::AccessRepository;
pub use error::StorageError;
pub use models::{AllowOutcome, BalanceOutcome, RevokeOutcome, UserSummary};
pub use repository::AllowListStore;
pub use sqlite_pool::SqlitePoolManager;
