//! Bookshelf REST API backend.
//!
//! Layered the usual way: REST handlers translate HTTP to domain
//! commands, domain services enforce validation and keep the user/book
//! cross-reference consistent, and the storage layer persists JSON
//! documents in SQLite. Services reach persistence only through the
//! `storage::traits` seam, which is also what the test suites hang off.

pub mod config;
pub mod domain;
pub mod rest;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use config::AppConfig;
use domain::{BookService, OwnershipService, UserService};
use storage::{BookRepository, BookStore, DbConnection, UserRepository, UserStore};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub book_service: BookService,
    pub config: AppConfig,
}

impl AppState {
    /// Wire repositories and services over an established connection.
    pub fn build(db: DbConnection, config: AppConfig) -> Self {
        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db.clone()));
        let books: Arc<dyn BookStore> = Arc::new(BookRepository::new(db));

        let ownership = OwnershipService::new(users.clone(), books.clone());
        let user_service = UserService::new(users.clone(), ownership.clone());
        let book_service = BookService::new(users, books, ownership);

        Self {
            user_service,
            book_service,
            config,
        }
    }
}

/// Connect to the store and assemble the application state.
pub async fn initialize_backend(config: AppConfig) -> Result<AppState> {
    info!("setting up document store");
    let db = DbConnection::new(&config.database_url).await?;

    info!("setting up domain services");
    Ok(AppState::build(db, config))
}

/// Create the axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    // The original service accepted requests from anywhere; keep that.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let v1 = Router::new()
        .route(
            "/user",
            get(rest::user_apis::list_users).post(rest::user_apis::create_user),
        )
        .route(
            "/user/:id",
            get(rest::user_apis::get_user)
                .patch(rest::user_apis::update_user)
                .delete(rest::user_apis::delete_user),
        )
        .route("/user/:id/password", patch(rest::user_apis::change_password))
        .route(
            "/book",
            get(rest::book_apis::list_books).post(rest::book_apis::create_book),
        )
        .route(
            "/book/:id",
            get(rest::book_apis::get_book)
                .patch(rest::book_apis::update_book)
                .delete(rest::book_apis::delete_book),
        );

    let api = Router::new()
        .route("/", get(rest::meta_apis::api_index))
        .nest("/v1", v1);

    Router::new().nest("/api", api).layer(cors).with_state(state)
}
