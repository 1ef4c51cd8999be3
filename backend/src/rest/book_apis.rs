//! REST handlers for `/api/v1/book`.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use shared::{BookPayload, ListQuery};
use tracing::info;

use crate::domain::commands::books::{CreateBookCommand, ListBooksCommand, UpdateBookCommand};
use crate::domain::commands::ListCommand;
use crate::rest::envelope;
use crate::rest::mappers::book_view;
use crate::AppState;

/// GET /api/v1/book
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    info!("GET /api/v1/book - query: {:?}", query);

    let cmd = ListBooksCommand {
        list: ListCommand {
            page: query.page,
            limit: query.limit,
            sort: query.sort,
            query: query.query,
        },
    };

    match state.book_service.list_books(cmd).await {
        Ok(result) => envelope::data(result.page.map(book_view)),
        Err(e) => envelope::failure(e),
    }
}

/// GET /api/v1/book/:id
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("GET /api/v1/book/{id}");

    match state.book_service.get_book(&id).await {
        Ok(book) => envelope::data(book_view(book)),
        Err(e) => envelope::failure(e),
    }
}

/// POST /api/v1/book
pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<BookPayload>,
) -> Response {
    info!("POST /api/v1/book - title: {:?}", request.title);

    let cmd = CreateBookCommand {
        title: request.title,
        year: request.year,
        author: request.author,
    };

    match state.book_service.create_book(cmd).await {
        Ok(result) => envelope::data(book_view(result.book)),
        Err(e) => envelope::failure(e),
    }
}

/// PATCH /api/v1/book/:id
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<BookPayload>,
) -> Response {
    info!("PATCH /api/v1/book/{id}");

    let cmd = UpdateBookCommand {
        book_id: id,
        title: request.title,
        year: request.year,
        author: request.author,
    };

    match state.book_service.update_book(cmd).await {
        Ok(result) => envelope::data(book_view(result.book)),
        Err(e) => envelope::failure(e),
    }
}

/// DELETE /api/v1/book/:id
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("DELETE /api/v1/book/{id}");

    match state.book_service.delete_book(&id).await {
        Ok(result) => envelope::message_data("success delete book", book_view(result.book)),
        Err(e) => envelope::failure(e),
    }
}
