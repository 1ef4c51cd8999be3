//! Domain model to wire view mapping.
//!
//! The only interesting rule lives here: a `User` leaves the process as
//! a `UserView`, which has no password field at all, so a hash can
//! never leak through serialization.

use shared::{BookView, UserView};

use crate::domain::models::{Book, User};

pub fn user_view(user: User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        username: user.username,
        email: user.email,
        books: user.books,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn book_view(book: Book) -> BookView {
    BookView {
        id: book.id,
        title: book.title,
        slug: book.slug,
        year: book.year,
        author: book.author,
        created_at: book.created_at,
        updated_at: book.updated_at,
    }
}
