use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::User;
use crate::storage::sqlite::DbConnection;
use crate::storage::traits::UserStore;

/// Document-store repository for the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn decode(doc: &str) -> Result<User> {
        serde_json::from_str(doc).context("malformed user document in store")
    }

    fn encode(user: &User) -> Result<String> {
        serde_json::to_string(user).context("failed to serialize user document")
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query("INSERT INTO users (id, doc) VALUES (?, ?)")
            .bind(&user.id)
            .bind(Self::encode(user)?)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT doc FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(Self::decode(r.get("doc"))?)),
            None => Ok(None),
        }
    }

    async fn find_user_by_username(
        &self,
        username: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<User>> {
        let row = match exclude_id {
            Some(id) => {
                sqlx::query(
                    "SELECT doc FROM users WHERE json_extract(doc, '$.username') = ? AND id != ?",
                )
                .bind(username)
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?
            }
            None => {
                sqlx::query("SELECT doc FROM users WHERE json_extract(doc, '$.username') = ?")
                    .bind(username)
                    .fetch_optional(self.db.pool())
                    .await?
            }
        };

        match row {
            Some(r) => Ok(Some(Self::decode(r.get("doc"))?)),
            None => Ok(None),
        }
    }

    async fn find_user_by_email(
        &self,
        email: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<User>> {
        let row = match exclude_id {
            Some(id) => {
                sqlx::query(
                    "SELECT doc FROM users WHERE json_extract(doc, '$.email') = ? AND id != ?",
                )
                .bind(email)
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?
            }
            None => {
                sqlx::query("SELECT doc FROM users WHERE json_extract(doc, '$.email') = ?")
                    .bind(email)
                    .fetch_optional(self.db.pool())
                    .await?
            }
        };

        match row {
            Some(r) => Ok(Some(Self::decode(r.get("doc"))?)),
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT doc FROM users")
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(|row| Self::decode(row.get("doc"))).collect()
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        sqlx::query("UPDATE users SET doc = ? WHERE id = ?")
            .bind(Self::encode(user)?)
            .bind(&user.id)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn setup_test() -> UserRepository {
        let db = DbConnection::init_test()
            .await
            .expect("failed to create test database");
        UserRepository::new(db)
    }

    fn sample_user(id: &str, username: &str, email: &str) -> User {
        let now = Utc::now();
        User {
            id: id.to_string(),
            name: "Test User".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            books: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let repo = setup_test().await;
        let user = sample_user("aaaaaaaaaaaaaaaaaaaaaaa1", "ann1", "ann@x.io");

        repo.insert_user(&user).await.unwrap();
        let fetched = repo.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn get_missing_user_is_none() {
        let repo = setup_test().await;
        assert!(repo.get_user("aaaaaaaaaaaaaaaaaaaaaaa9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_username_respects_exclusion() {
        let repo = setup_test().await;
        let user = sample_user("aaaaaaaaaaaaaaaaaaaaaaa1", "ann1", "ann@x.io");
        repo.insert_user(&user).await.unwrap();

        let found = repo.find_user_by_username("ann1", None).await.unwrap();
        assert!(found.is_some());

        // Excluding the matching record itself means no collision.
        let found = repo
            .find_user_by_username("ann1", Some(&user.id))
            .await
            .unwrap();
        assert!(found.is_none());

        // Excluding a different record still reports the collision.
        let found = repo
            .find_user_by_username("ann1", Some("aaaaaaaaaaaaaaaaaaaaaaa2"))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn find_by_email_matches_exactly() {
        let repo = setup_test().await;
        repo.insert_user(&sample_user("aaaaaaaaaaaaaaaaaaaaaaa1", "ann1", "ann@x.io"))
            .await
            .unwrap();

        assert!(repo.find_user_by_email("ann@x.io", None).await.unwrap().is_some());
        assert!(repo.find_user_by_email("bob@x.io", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_document() {
        let repo = setup_test().await;
        let mut user = sample_user("aaaaaaaaaaaaaaaaaaaaaaa1", "ann1", "ann@x.io");
        repo.insert_user(&user).await.unwrap();

        user.name = "Ann Updated".to_string();
        user.books.push("bbbbbbbbbbbbbbbbbbbbbbb1".to_string());
        repo.update_user(&user).await.unwrap();

        let fetched = repo.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ann Updated");
        assert_eq!(fetched.books, vec!["bbbbbbbbbbbbbbbbbbbbbbb1"]);
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let repo = setup_test().await;
        let user = sample_user("aaaaaaaaaaaaaaaaaaaaaaa1", "ann1", "ann@x.io");
        repo.insert_user(&user).await.unwrap();

        assert!(repo.delete_user(&user.id).await.unwrap());
        assert!(!repo.delete_user(&user.id).await.unwrap());
        assert!(repo.get_user(&user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_every_document() {
        let repo = setup_test().await;
        repo.insert_user(&sample_user("aaaaaaaaaaaaaaaaaaaaaaa1", "ann1", "ann@x.io"))
            .await
            .unwrap();
        repo.insert_user(&sample_user("aaaaaaaaaaaaaaaaaaaaaaa2", "bob1", "bob@x.io"))
            .await
            .unwrap();

        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }
}
