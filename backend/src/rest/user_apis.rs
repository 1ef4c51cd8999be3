//! REST handlers for `/api/v1/user`.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use shared::{CreateUserRequest, ListQuery, UpdatePasswordRequest, UpdateUserRequest};
use tracing::info;

use crate::domain::commands::users::{
    ChangePasswordCommand, CreateUserCommand, ListUsersCommand, UpdateUserCommand,
};
use crate::domain::commands::ListCommand;
use crate::domain::ServiceError;
use crate::rest::mappers::user_view;
use crate::rest::envelope;
use crate::AppState;

/// GET /api/v1/user
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    info!("GET /api/v1/user - query: {:?}", query);

    let cmd = ListUsersCommand {
        list: ListCommand {
            page: query.page,
            limit: query.limit,
            sort: query.sort,
            query: query.query,
        },
    };

    match state.user_service.list_users(cmd).await {
        Ok(result) => envelope::data(result.page.map(user_view)),
        Err(e) => envelope::failure(e),
    }
}

/// GET /api/v1/user/:id
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("GET /api/v1/user/{id}");

    match state.user_service.get_user(&id).await {
        Ok(user) => envelope::data(user_view(user)),
        Err(e) => envelope::failure(e),
    }
}

/// POST /api/v1/user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Response {
    info!("POST /api/v1/user - username: {:?}", request.username);

    let cmd = CreateUserCommand {
        name: request.name,
        username: request.username,
        email: request.email,
        password: request.password,
        confirm_password: request.confirm_password,
    };

    match state.user_service.create_user(cmd).await {
        Ok(result) => envelope::message_data("success add user", user_view(result.user)),
        Err(e) => envelope::failure(e),
    }
}

/// PATCH /api/v1/user/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Response {
    info!("PATCH /api/v1/user/{id}");

    let cmd = UpdateUserCommand {
        user_id: id,
        name: request.name,
        username: request.username,
        email: request.email,
    };

    match state.user_service.update_user(cmd).await {
        Ok(result) => envelope::message_data("success update user", user_view(result.user)),
        Err(e) => envelope::failure(e),
    }
}

/// PATCH /api/v1/user/:id/password
///
/// Unlike the other user routes, a missing user here is a hard 400:
/// the caller claimed to know the current password of a record that
/// does not exist.
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Response {
    info!("PATCH /api/v1/user/{id}/password");

    let cmd = ChangePasswordCommand {
        user_id: id,
        old_password: request.old_password,
        password: request.password,
        confirm_password: request.confirm_password,
    };

    match state.user_service.change_password(cmd).await {
        Ok(result) => {
            envelope::message_data("success update user's password", user_view(result.user))
        }
        Err(ServiceError::NotFound(entity)) => {
            envelope::bad_request(&format!("{entity} not found"))
        }
        Err(e) => envelope::failure(e),
    }
}

/// DELETE /api/v1/user/:id
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("DELETE /api/v1/user/{id}");

    match state.user_service.delete_user(&id).await {
        Ok(result) => envelope::message_data("success delete user", user_view(result.user)),
        Err(e) => envelope::failure(e),
    }
}
