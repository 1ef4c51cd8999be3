//! Wire-format types shared between the HTTP surface and any client.
//!
//! These structs define the JSON contract of the API: request payloads,
//! response views, the pagination envelope, and field-level validation
//! errors. The backend maps its internal domain models onto these types
//! at the REST boundary; nothing in here carries business logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload for `POST /api/v1/user`.
///
/// Every field is optional at the serde level so that a missing field
/// surfaces as a per-field validation error rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Payload for `PATCH /api/v1/user/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Payload for `PATCH /api/v1/user/:id/password`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Payload for `POST /api/v1/book` and `PATCH /api/v1/book/:id`.
///
/// `year` is a raw JSON value so that a non-integer year is reported as
/// a validation error ("year must be an integer …") instead of a 422.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: Option<String>,
    pub year: Option<serde_json::Value>,
    pub author: Option<String>,
}

/// Query string accepted by the list endpoints.
///
/// `page` stays a string because `page=all` is the sentinel that
/// disables pagination entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub query: Option<String>,
}

/// User as serialized to clients. There is deliberately no password
/// field on this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Identifiers of the books this user authored.
    pub books: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book as serialized to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub id: String,
    pub title: String,
    /// URL-safe key derived from the title; unique across books.
    pub slug: String,
    pub year: i64,
    /// Authoring user's id, or null for an orphaned book.
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bounded slice of a larger record set plus paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub limit: u64,
    pub page: u64,
    pub total_pages: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
}

impl<T> Page<T> {
    /// Map the documents of a page while keeping the metadata intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            docs: self.docs.into_iter().map(f).collect(),
            total_docs: self.total_docs,
            limit: self.limit,
            page: self.page,
            total_pages: self.total_pages,
            has_prev_page: self.has_prev_page,
            has_next_page: self.has_next_page,
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    /// Where the offending value came from: "body" or "params".
    pub location: String,
}

impl FieldError {
    /// A violation on a request body field.
    pub fn body(param: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: param.to_string(),
            location: "body".to_string(),
        }
    }

    /// A violation on a path parameter.
    pub fn param(param: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: param.to_string(),
            location: "params".to_string(),
        }
    }
}
