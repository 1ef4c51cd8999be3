//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are
//! **not** exposed over the public API. The REST layer is responsible
//! for mapping the wire DTOs defined in the `shared` crate to these
//! internal types.
//!
//! Request-derived fields stay `Option` here: presence is a validation
//! concern, and the validators want to report "x is required" instead
//! of the transport rejecting the payload.

/// Query parameters accepted by both list endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListCommand {
    /// 1-based page number as given on the wire; the literal "all"
    /// disables pagination.
    pub page: Option<String>,
    pub limit: Option<u32>,
    /// "desc" for descending; anything else sorts ascending.
    pub sort: Option<String>,
    /// Case-insensitive substring to match against the entity's text
    /// fields.
    pub query: Option<String>,
}

pub mod users {
    use super::ListCommand;
    use crate::domain::models::User;
    use shared::Page;

    /// Input for creating a new user.
    #[derive(Debug, Clone)]
    pub struct CreateUserCommand {
        pub name: Option<String>,
        pub username: Option<String>,
        pub email: Option<String>,
        pub password: Option<String>,
        pub confirm_password: Option<String>,
    }

    /// Input for editing a user's profile fields.
    #[derive(Debug, Clone)]
    pub struct UpdateUserCommand {
        pub user_id: String,
        pub name: Option<String>,
        pub username: Option<String>,
        pub email: Option<String>,
    }

    /// Input for changing a user's password.
    #[derive(Debug, Clone)]
    pub struct ChangePasswordCommand {
        pub user_id: String,
        pub old_password: Option<String>,
        pub password: Option<String>,
        pub confirm_password: Option<String>,
    }

    /// Input for listing users.
    #[derive(Debug, Clone, Default)]
    pub struct ListUsersCommand {
        pub list: ListCommand,
    }

    #[derive(Debug, Clone)]
    pub struct CreateUserResult {
        pub user: User,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateUserResult {
        pub user: User,
    }

    #[derive(Debug, Clone)]
    pub struct ChangePasswordResult {
        pub user: User,
    }

    /// Result of deleting a user; carries the removed record.
    #[derive(Debug, Clone)]
    pub struct DeleteUserResult {
        pub user: User,
    }

    #[derive(Debug, Clone)]
    pub struct ListUsersResult {
        pub page: Page<User>,
    }
}

pub mod books {
    use super::ListCommand;
    use crate::domain::models::Book;
    use shared::Page;

    /// Input for creating a new book. `year` is kept as raw JSON so the
    /// validator can distinguish "missing" from "not an integer".
    #[derive(Debug, Clone)]
    pub struct CreateBookCommand {
        pub title: Option<String>,
        pub year: Option<serde_json::Value>,
        pub author: Option<String>,
    }

    /// Input for editing a book.
    #[derive(Debug, Clone)]
    pub struct UpdateBookCommand {
        pub book_id: String,
        pub title: Option<String>,
        pub year: Option<serde_json::Value>,
        pub author: Option<String>,
    }

    /// Input for listing books.
    #[derive(Debug, Clone, Default)]
    pub struct ListBooksCommand {
        pub list: ListCommand,
    }

    #[derive(Debug, Clone)]
    pub struct CreateBookResult {
        pub book: Book,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateBookResult {
        pub book: Book,
    }

    /// Result of deleting a book; carries the removed record.
    #[derive(Debug, Clone)]
    pub struct DeleteBookResult {
        pub book: Book,
    }

    #[derive(Debug, Clone)]
    pub struct ListBooksResult {
        pub page: Page<Book>,
    }
}
