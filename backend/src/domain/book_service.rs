use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::commands::books::{
    CreateBookCommand, CreateBookResult, DeleteBookResult, ListBooksCommand, ListBooksResult,
    UpdateBookCommand, UpdateBookResult,
};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::Book;
use crate::domain::ownership::OwnershipService;
use crate::domain::validation::{check_id_param, BookValidator, Violations};
use crate::domain::{ids, pagination};
use crate::storage::traits::{BookStore, UserStore};

/// Service for managing book records.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    validator: BookValidator,
    ownership: OwnershipService,
}

impl BookService {
    pub fn new(
        users: Arc<dyn UserStore>,
        books: Arc<dyn BookStore>,
        ownership: OwnershipService,
    ) -> Self {
        let validator = BookValidator::new(users, books.clone());
        Self {
            books,
            validator,
            ownership,
        }
    }

    /// Create a book and record it in its author's book list.
    pub async fn create_book(&self, cmd: CreateBookCommand) -> ServiceResult<CreateBookResult> {
        info!(title = ?cmd.title, "creating book");

        let violations = self.validator.validate_create(&cmd).await?;
        ServiceError::check(violations)?;

        let title = cmd.title.unwrap_or_default();
        let now = Utc::now();
        let book = Book {
            id: ids::generate_record_id(),
            slug: Book::slugify(&title),
            title,
            year: cmd.year.as_ref().and_then(|y| y.as_i64()).unwrap_or_default(),
            author: cmd.author,
            created_at: now,
            updated_at: now,
        };

        self.books.insert_book(&book).await?;

        if let Some(author) = &book.author {
            self.ownership.record_ownership(author, &book.id).await?;
        }

        info!(book_id = %book.id, slug = %book.slug, "created book");
        Ok(CreateBookResult { book })
    }

    /// Get a book by id.
    pub async fn get_book(&self, book_id: &str) -> ServiceResult<Book> {
        let mut v = Violations::new();
        check_id_param(&mut v, book_id);
        ServiceError::check(v.into_vec())?;

        match self.books.get_book(book_id).await? {
            Some(book) => Ok(book),
            None => {
                warn!(book_id, "book not found");
                Err(ServiceError::NotFound("book"))
            }
        }
    }

    /// List books with free-text filtering, title sort, and pagination.
    pub async fn list_books(&self, cmd: ListBooksCommand) -> ServiceResult<ListBooksResult> {
        let books = self.books.list_books().await?;

        let page = pagination::paginate(
            books,
            &cmd.list,
            |b| vec![b.title.clone()],
            |b| b.title.clone(),
        );

        info!(total = page.total_docs, page = page.page, "listed books");
        Ok(ListBooksResult { page })
    }

    /// Edit a book; the slug follows the title and the ownership lists
    /// follow the author reference.
    pub async fn update_book(&self, cmd: UpdateBookCommand) -> ServiceResult<UpdateBookResult> {
        info!(book_id = %cmd.book_id, "updating book");

        let violations = self.validator.validate_update(&cmd).await?;
        ServiceError::check(violations)?;

        let mut book = self
            .books
            .get_book(&cmd.book_id)
            .await?
            .ok_or(ServiceError::NotFound("book"))?;

        let previous_author = book.author.clone();

        if let Some(title) = cmd.title {
            book.slug = Book::slugify(&title);
            book.title = title;
        }
        if let Some(year) = cmd.year.as_ref().and_then(|y| y.as_i64()) {
            book.year = year;
        }
        book.author = cmd.author;
        book.updated_at = Utc::now();

        self.books.update_book(&book).await?;

        if previous_author != book.author {
            self.ownership
                .transfer_ownership(
                    previous_author.as_deref(),
                    book.author.as_deref(),
                    &book.id,
                )
                .await?;
        }

        info!(book_id = %book.id, "updated book");
        Ok(UpdateBookResult { book })
    }

    /// Delete a book and erase it from its author's book list.
    pub async fn delete_book(&self, book_id: &str) -> ServiceResult<DeleteBookResult> {
        info!(book_id, "deleting book");

        let mut v = Violations::new();
        check_id_param(&mut v, book_id);
        ServiceError::check(v.into_vec())?;

        let book = self
            .books
            .get_book(book_id)
            .await?
            .ok_or(ServiceError::NotFound("book"))?;

        self.books.delete_book(book_id).await?;

        if let Some(author) = &book.author {
            self.ownership.erase_ownership(author, book_id).await?;
        }

        info!(book_id, "deleted book");
        Ok(DeleteBookResult { book })
    }
}
