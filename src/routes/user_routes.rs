use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::user_dto::{
    CreateUserRequest, UpdateUserRequest, UserEditResponse, UserFormOptions, UserIndexResponse,
};
use crate::dto::ApiResponse;
use crate::listing::ListParams;
use crate::middleware::Principal;
use crate::models::User;
use crate::services::authorization_service::permissions::{
    CREATE_USERS, DELETE_USERS, EDIT_USERS, VIEW_DRIVERS, VIEW_USERS,
};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/create", get(create_user_form))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/edit", get(edit_user))
}

pub fn create_driver_router() -> Router<AppState> {
    Router::new().route("/", get(list_drivers))
}

async fn list_users(
    State(state): State<AppState>,
    principal: Principal,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<UserIndexResponse>> {
    principal.authorize(VIEW_USERS)?;
    let params = ListParams::from_pairs(pairs);
    Ok(Json(UserController::new(&state).index(&params, false).await?))
}

async fn list_drivers(
    State(state): State<AppState>,
    principal: Principal,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<UserIndexResponse>> {
    principal.authorize(VIEW_DRIVERS)?;
    let params = ListParams::from_pairs(pairs);
    Ok(Json(UserController::new(&state).index(&params, true).await?))
}

async fn create_user_form(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<UserFormOptions>> {
    principal.authorize(CREATE_USERS)?;
    Ok(Json(UserController::new(&state).create_options()))
}

async fn create_user(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    principal.authorize(CREATE_USERS)?;
    let user = UserController::new(&state).store(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(user, "User created successfully!")),
    ))
}

async fn get_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<User>>> {
    principal.authorize(VIEW_USERS)?;
    let user = UserController::new(&state).show(id).await?;
    Ok(Json(ApiResponse::success(user)))
}

async fn edit_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<UserEditResponse>> {
    principal.authorize(EDIT_USERS)?;
    Ok(Json(UserController::new(&state).edit(id).await?))
}

async fn update_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    principal.authorize(EDIT_USERS)?;
    let user = UserController::new(&state).update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(user, "User updated successfully!")))
}

async fn delete_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.authorize(DELETE_USERS)?;
    UserController::new(&state).destroy(&principal, id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully!")))
}
