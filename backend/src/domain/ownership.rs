//! Keeps the `User.books` / `Book.author` cross-reference consistent.
//!
//! The document store has no foreign keys and no cascades, so every
//! mutation path that touches either side of the reference calls into
//! this service synchronously. Four paths exist: book created with an
//! author, book reassigned between authors, book deleted, and user
//! deleted.
//!
//! When a counterpart record is missing (already deleted, or the data
//! was inconsistent to begin with) the step is skipped with a warning
//! instead of failing the parent operation. The store also has no
//! transaction spanning the two persists of a transfer: if the second
//! write fails after the first succeeded, the book sits in nobody's
//! list until a later edit repairs it. Both gaps are accepted; the
//! warnings are the audit trail.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::models::User;
use crate::storage::traits::{BookStore, UserStore};

/// Maintains the bidirectional user/book reference.
#[derive(Clone)]
pub struct OwnershipService {
    users: Arc<dyn UserStore>,
    books: Arc<dyn BookStore>,
}

impl OwnershipService {
    pub fn new(users: Arc<dyn UserStore>, books: Arc<dyn BookStore>) -> Self {
        Self { users, books }
    }

    /// Add `book_id` to `author_id`'s book list.
    ///
    /// Invoked after a book is created with an author, and as the
    /// second half of a transfer. Skips silently when the author no
    /// longer exists; appending is idempotent.
    pub async fn record_ownership(&self, author_id: &str, book_id: &str) -> Result<()> {
        let Some(mut author) = self.users.get_user(author_id).await? else {
            warn!(author_id, book_id, "skipping ownership record, author missing");
            return Ok(());
        };

        if author.books.iter().any(|id| id == book_id) {
            debug!(author_id, book_id, "ownership already recorded");
            return Ok(());
        }

        author.books.push(book_id.to_string());
        author.updated_at = Utc::now();
        self.users.update_user(&author).await?;

        debug!(author_id, book_id, "ownership recorded");
        Ok(())
    }

    /// Remove `book_id` from `author_id`'s book list.
    ///
    /// Invoked when a book is deleted, and as the first half of a
    /// transfer. Skips silently when the author no longer exists.
    pub async fn erase_ownership(&self, author_id: &str, book_id: &str) -> Result<()> {
        let Some(mut author) = self.users.get_user(author_id).await? else {
            warn!(author_id, book_id, "skipping ownership erase, author missing");
            return Ok(());
        };

        let before = author.books.len();
        author.books.retain(|id| id != book_id);
        if author.books.len() == before {
            debug!(author_id, book_id, "ownership was not recorded, nothing to erase");
            return Ok(());
        }

        author.updated_at = Utc::now();
        self.users.update_user(&author).await?;

        debug!(author_id, book_id, "ownership erased");
        Ok(())
    }

    /// Move `book_id` from `previous` author's list to `next`'s.
    ///
    /// Either side may be absent (a book can be created unowned by a
    /// cascade, or orphaned by one). Removal from the old owner runs
    /// before addition to the new owner, each with its own persist.
    pub async fn transfer_ownership(
        &self,
        previous: Option<&str>,
        next: Option<&str>,
        book_id: &str,
    ) -> Result<()> {
        if previous == next {
            return Ok(());
        }

        if let Some(previous) = previous {
            self.erase_ownership(previous, book_id).await?;
        }
        if let Some(next) = next {
            self.record_ownership(next, book_id).await?;
        }
        Ok(())
    }

    /// Orphan every book a deleted user owned: null each book's author
    /// and persist it. Books that vanished in the meantime are skipped.
    pub async fn release_owned_books(&self, user: &User) -> Result<()> {
        for book_id in &user.books {
            let Some(mut book) = self.books.get_book(book_id).await? else {
                warn!(user_id = %user.id, %book_id, "skipping orphan step, book missing");
                continue;
            };

            book.author = None;
            book.updated_at = Utc::now();
            self.books.update_book(&book).await?;

            debug!(user_id = %user.id, %book_id, "book orphaned");
        }
        Ok(())
    }
}
