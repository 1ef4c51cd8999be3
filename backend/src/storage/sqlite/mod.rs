//! SQLite-backed document store.
//!
//! Records live as opaque JSON documents keyed by id, one table per
//! collection. The store knows nothing about the relationship between
//! users and books; keeping that consistent is the domain layer's job.

pub mod book_repository;
pub mod connection;
pub mod user_repository;

pub use book_repository::BookRepository;
pub use connection::DbConnection;
pub use user_repository::UserRepository;
