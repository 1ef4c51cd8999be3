//! Persistence layer: storage traits plus the SQLite document-store
//! implementation.

pub mod sqlite;
pub mod traits;

pub use sqlite::{BookRepository, DbConnection, UserRepository};
pub use traits::{BookStore, UserStore};
