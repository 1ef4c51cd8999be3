//! Storage abstraction traits.
//!
//! The domain layer works exclusively against these traits, so the
//! concrete document store can be swapped for an in-memory or mocked
//! implementation in isolation tests. Uniqueness lookups take an
//! optional excluded id because edits must not collide with the record
//! being edited.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Book, User};

/// Interface for user persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new user document.
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Retrieve a user by id.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Find a user by exact username, optionally excluding one id.
    async fn find_user_by_username(
        &self,
        username: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<User>>;

    /// Find a user by exact email, optionally excluding one id.
    async fn find_user_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<User>>;

    /// List every user document.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Replace an existing user document.
    async fn update_user(&self, user: &User) -> Result<()>;

    /// Delete a user by id. Returns whether a record was removed.
    async fn delete_user(&self, user_id: &str) -> Result<bool>;
}

/// Interface for book persistence.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Store a new book document.
    async fn insert_book(&self, book: &Book) -> Result<()>;

    /// Retrieve a book by id.
    async fn get_book(&self, book_id: &str) -> Result<Option<Book>>;

    /// Find a book by exact slug, optionally excluding one id.
    async fn find_book_by_slug(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<Book>>;

    /// List every book document.
    async fn list_books(&self) -> Result<Vec<Book>>;

    /// Replace an existing book document.
    async fn update_book(&self, book: &Book) -> Result<()>;

    /// Delete a book by id. Returns whether a record was removed.
    async fn delete_book(&self, book_id: &str) -> Result<bool>;
}
