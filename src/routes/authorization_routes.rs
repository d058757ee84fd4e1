use axum::{routing::get, Json, Router};

use crate::dto::role_dto::RoleResponse;
use crate::middleware::Principal;
use crate::services::authorization_service::{
    permissions::{self, VIEW_PERMISSIONS, VIEW_ROLES},
    Role,
};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_authorization_router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(list_roles))
        .route("/permissions", get(list_permissions))
}

async fn list_roles(principal: Principal) -> AppResult<Json<Vec<RoleResponse>>> {
    principal.authorize(VIEW_ROLES)?;
    Ok(Json(Role::ALL.into_iter().map(RoleResponse::from).collect()))
}

async fn list_permissions(principal: Principal) -> AppResult<Json<Vec<&'static str>>> {
    principal.authorize(VIEW_PERMISSIONS)?;
    Ok(Json(permissions::ALL.to_vec()))
}
