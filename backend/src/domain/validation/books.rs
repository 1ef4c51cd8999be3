use std::sync::Arc;

use anyhow::Result;
use shared::FieldError;

use crate::domain::commands::books::{CreateBookCommand, UpdateBookCommand};
use crate::domain::ids;
use crate::domain::models::Book;
use crate::domain::validation::{check_id_param, Violations};
use crate::storage::traits::{BookStore, UserStore};

pub const MIN_YEAR: i64 = 1970;

/// Field rule sets for book requests. Needs both stores: slug
/// uniqueness checks the books collection, author existence the users
/// collection.
#[derive(Clone)]
pub struct BookValidator {
    users: Arc<dyn UserStore>,
    books: Arc<dyn BookStore>,
}

impl BookValidator {
    pub fn new(users: Arc<dyn UserStore>, books: Arc<dyn BookStore>) -> Self {
        Self { users, books }
    }

    /// Rules for `POST /api/v1/book`.
    pub async fn validate_create(&self, cmd: &CreateBookCommand) -> Result<Vec<FieldError>> {
        let mut v = Violations::new();

        self.check_title(&mut v, cmd.title.as_deref(), None).await?;
        self.check_year(&mut v, cmd.year.as_ref());
        self.check_author(&mut v, cmd.author.as_deref()).await?;

        Ok(v.into_vec())
    }

    /// Rules for `PATCH /api/v1/book/:id`. The slug collision check
    /// excludes the edited book itself.
    pub async fn validate_update(&self, cmd: &UpdateBookCommand) -> Result<Vec<FieldError>> {
        let mut v = Violations::new();

        check_id_param(&mut v, &cmd.book_id);
        self.check_title(&mut v, cmd.title.as_deref(), Some(cmd.book_id.as_str()))
            .await?;
        self.check_year(&mut v, cmd.year.as_ref());
        self.check_author(&mut v, cmd.author.as_deref()).await?;

        Ok(v.into_vec())
    }

    async fn check_title(
        &self,
        v: &mut Violations,
        title: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        let title = title.unwrap_or_default();
        if title.trim().is_empty() {
            v.body("title", "title is required");
        } else if self
            .books
            .find_book_by_slug(&Book::slugify(title), exclude_id)
            .await?
            .is_some()
        {
            v.body("title", "title already used");
        }
        Ok(())
    }

    fn check_year(&self, v: &mut Violations, year: Option<&serde_json::Value>) {
        match year {
            None | Some(serde_json::Value::Null) => v.body("year", "year is required"),
            Some(value) => match value.as_i64() {
                Some(year) if year >= MIN_YEAR => {}
                _ => v.body("year", "year must be an integer and at least 1970"),
            },
        }
    }

    async fn check_author(&self, v: &mut Violations, author: Option<&str>) -> Result<()> {
        let author = author.unwrap_or_default();
        if author.is_empty() {
            v.body("author", "author id is required");
        } else if !ids::is_record_id(author) {
            v.body("author", "author id is not valid");
        } else if self.users.get_user(author).await?.is_none() {
            v.body("author", "author not found");
        }
        Ok(())
    }
}
