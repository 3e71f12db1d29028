//! Durable mapping stores.
//!
//! [`MySqlRepository`] is the production store; [`InMemoryRepository`] backs
//! tests and single-process runs. Both enforce short code uniqueness at
//! insert time and report a duplicate as [`StorageError::Conflict`].

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use tinylink_core::{ReadRepository, Repository, StorageError};
