use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::Book;
use crate::storage::sqlite::DbConnection;
use crate::storage::traits::BookStore;

/// Document-store repository for the `books` collection.
#[derive(Clone)]
pub struct BookRepository {
    db: DbConnection,
}

impl BookRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn decode(doc: &str) -> Result<Book> {
        serde_json::from_str(doc).context("malformed book document in store")
    }

    fn encode(book: &Book) -> Result<String> {
        serde_json::to_string(book).context("failed to serialize book document")
    }
}

#[async_trait]
impl BookStore for BookRepository {
    async fn insert_book(&self, book: &Book) -> Result<()> {
        sqlx::query("INSERT INTO books (id, doc) VALUES (?, ?)")
            .bind(&book.id)
            .bind(Self::encode(book)?)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn get_book(&self, book_id: &str) -> Result<Option<Book>> {
        let row = sqlx::query("SELECT doc FROM books WHERE id = ?")
            .bind(book_id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(Self::decode(r.get("doc"))?)),
            None => Ok(None),
        }
    }

    async fn find_book_by_slug(
        &self,
        slug: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<Book>> {
        let row = match exclude_id {
            Some(id) => {
                sqlx::query(
                    "SELECT doc FROM books WHERE json_extract(doc, '$.slug') = ? AND id != ?",
                )
                .bind(slug)
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?
            }
            None => {
                sqlx::query("SELECT doc FROM books WHERE json_extract(doc, '$.slug') = ?")
                    .bind(slug)
                    .fetch_optional(self.db.pool())
                    .await?
            }
        };

        match row {
            Some(r) => Ok(Some(Self::decode(r.get("doc"))?)),
            None => Ok(None),
        }
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query("SELECT doc FROM books")
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(|row| Self::decode(row.get("doc"))).collect()
    }

    async fn update_book(&self, book: &Book) -> Result<()> {
        sqlx::query("UPDATE books SET doc = ? WHERE id = ?")
            .bind(Self::encode(book)?)
            .bind(&book.id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete_book(&self, book_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(book_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn setup_test() -> BookRepository {
        let db = DbConnection::init_test()
            .await
            .expect("failed to create test database");
        BookRepository::new(db)
    }

    fn sample_book(id: &str, title: &str, author: Option<&str>) -> Book {
        let now = Utc::now();
        Book {
            id: id.to_string(),
            title: title.to_string(),
            slug: Book::slugify(title),
            year: 2015,
            author: author.map(String::from),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let repo = setup_test().await;
        let book = sample_book("bbbbbbbbbbbbbbbbbbbbbbb1", "Go in Action", Some("aaaaaaaaaaaaaaaaaaaaaaa1"));

        repo.insert_book(&book).await.unwrap();
        let fetched = repo.get_book(&book.id).await.unwrap().unwrap();
        assert_eq!(fetched, book);
    }

    #[tokio::test]
    async fn null_author_survives_the_store() {
        let repo = setup_test().await;
        let book = sample_book("bbbbbbbbbbbbbbbbbbbbbbb1", "Orphan", None);

        repo.insert_book(&book).await.unwrap();
        let fetched = repo.get_book(&book.id).await.unwrap().unwrap();
        assert!(fetched.author.is_none());
    }

    #[tokio::test]
    async fn find_by_slug_respects_exclusion() {
        let repo = setup_test().await;
        let book = sample_book("bbbbbbbbbbbbbbbbbbbbbbb1", "Go in Action", None);
        repo.insert_book(&book).await.unwrap();

        assert!(repo.find_book_by_slug("go-in-action", None).await.unwrap().is_some());
        assert!(repo
            .find_book_by_slug("go-in-action", Some(&book.id))
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_book_by_slug("go-in-action", Some("bbbbbbbbbbbbbbbbbbbbbbb2"))
            .await
            .unwrap()
            .is_some());
        assert!(repo.find_book_by_slug("other-slug", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_document() {
        let repo = setup_test().await;
        let mut book = sample_book("bbbbbbbbbbbbbbbbbbbbbbb1", "Go in Action", None);
        repo.insert_book(&book).await.unwrap();

        book.title = "Go in Action, Second Edition".to_string();
        book.slug = Book::slugify(&book.title);
        repo.update_book(&book).await.unwrap();

        let fetched = repo.get_book(&book.id).await.unwrap().unwrap();
        assert_eq!(fetched.slug, "go-in-action-second-edition");
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let repo = setup_test().await;
        let book = sample_book("bbbbbbbbbbbbbbbbbbbbbbb1", "Go in Action", None);
        repo.insert_book(&book).await.unwrap();

        assert!(repo.delete_book(&book.id).await.unwrap());
        assert!(!repo.delete_book(&book.id).await.unwrap());
    }
}
