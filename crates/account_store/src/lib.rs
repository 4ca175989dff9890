//! User and token storage for the account service.
//!
//! This crate provides a storage abstraction for user records and their
//! access tokens, with an in-memory implementation for tests and a SQLite
//! implementation for deployment. Email uniqueness is enforced here, at
//! the storage layer, so concurrent registrations of the same address
//! serialize on the store rather than on application locks.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
