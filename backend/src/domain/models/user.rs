use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model for a user record as held in the document store.
///
/// Unlike `shared::UserView`, this model carries the password hash; it
/// must never cross the REST boundary unmapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Argon2id hash string, never the plaintext password.
    pub password_hash: String,
    /// Ids of books whose `author` field points back at this user.
    /// Kept consistent manually by the ownership service.
    pub books: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
