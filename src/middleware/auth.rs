//! Autenticación JWT
//!
//! El usuario que actúa se obtiene del header `Authorization: Bearer` y
//! llega a los handlers como un [`Principal`] explícito. Sin token válido,
//! o si el usuario no existe o no está activo, la respuesta es 401.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::{
    models::UserStatus,
    services::authorization_service::{self, Role},
    state::AppState,
    utils::{
        errors::{AppError, AppResult},
        jwt::verify_token,
    },
};

/// Usuario autenticado con sus roles
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: i64,
    pub roles: Vec<Role>,
}

impl Principal {
    /// Exigir un permiso al usuario actual
    pub fn authorize(&self, permission: &str) -> AppResult<()> {
        authorization_service::authorize(self.user_id, &self.roles, permission)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

        let claims = verify_token(token, &state.jwt)
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

        let user = state
            .users
            .find(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        if user.status != UserStatus::Active {
            return Err(AppError::Unauthorized("User is inactive or suspended".to_string()));
        }

        let roles = state.roles.roles_for(user.id).await?;
        tracing::debug!("🔐 User {} authenticated with roles {:?}", user.id, roles);

        Ok(Principal {
            user_id: user.id,
            roles,
        })
    }
}
