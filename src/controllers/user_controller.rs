//! Controller de usuarios
//!
//! Listado (con la vista de conductores), alta, edición y baja. El rol de
//! cada usuario se sincroniza con su `user_type` en el [`RoleStore`].

use std::sync::Arc;

use chrono::Utc;
use validator::ValidationErrors;

use crate::dto::user_dto::{
    CreateUserRequest, UpdateUserRequest, UserEditResponse, UserFilterOptions, UserFormOptions,
    UserIndexResponse, UserStats,
};
use crate::listing::{ListParams, ListQuery, Value};
use crate::middleware::Principal;
use crate::models::{BloodGroup, User, UserStatus, UserType, USER_SCHEMA};
use crate::repositories::{RoleStore, Store};
use crate::services::authorization_service::{role_for_user_type, Role};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, unique_error, AppError, AppResult};

pub struct UserController {
    users: Arc<dyn Store<User>>,
    roles: Arc<dyn RoleStore>,
    bcrypt_cost: u32,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            roles: state.roles.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    /// Índice de usuarios; con `drivers_only` se fija `user_type = driver`
    pub async fn index(&self, params: &ListParams, drivers_only: bool) -> AppResult<UserIndexResponse> {
        let mut query = ListQuery::from_params(&USER_SCHEMA, params)?;
        if drivers_only {
            query = query.with_fixed_filter("user_type", UserType::Driver.as_str());
        }

        let users = self.users.list(&query).await?;

        let filter_options = UserFilterOptions {
            user_types: self.users.distinct("user_type").await?,
            statuses: UserStatus::ALL.to_vec(),
            blood_groups: BloodGroup::ALL.to_vec(),
        };

        let stats = UserStats {
            total: self.users.count().await?,
            active: self.users.count_where("status", Value::from("active")).await?,
            drivers: self.users.count_where("user_type", Value::from("driver")).await?,
            admins: self.users.count_where("user_type", Value::from("admin")).await?,
        };

        Ok(UserIndexResponse {
            users,
            filter_options,
            stats,
            query_params: params.echo(),
        })
    }

    pub fn create_options(&self) -> UserFormOptions {
        UserFormOptions::new()
    }

    pub async fn store(&self, request: CreateUserRequest) -> AppResult<User> {
        let request = request.normalized();
        request.check()?;
        self.ensure_unique(&request.email, request.username.as_deref(), None).await?;

        let password_hash = self.hash_password(&request.password)?;
        let user = self
            .users
            .insert(request.into_new_user(password_hash, Utc::now()))
            .await?;

        if let Some(user_type) = user.user_type {
            self.roles.sync(user.id, role_for_user_type(user_type)).await?;
        }

        tracing::info!("👤 User {} created as {:?}", user.id, user.user_type);
        Ok(user)
    }

    pub async fn show(&self, id: i64) -> AppResult<User> {
        self.users
            .find(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn edit(&self, id: i64) -> AppResult<UserEditResponse> {
        Ok(UserEditResponse {
            user: self.show(id).await?,
            options: UserFormOptions::new(),
        })
    }

    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> AppResult<User> {
        self.show(id).await?;

        let request = request.normalized();
        request.check()?;
        self.ensure_unique(&request.email, request.username.as_deref(), Some(id)).await?;

        let password_hash = match request.password.as_deref() {
            Some(password) => Some(self.hash_password(password)?),
            None => None,
        };

        let user = self
            .users
            .update(id, request.into_changes(password_hash))
            .await?
            .ok_or_else(|| not_found_error("User", id))?;

        self.sync_role(&user).await?;
        tracing::info!("👤 User {} updated", user.id);
        Ok(user)
    }

    /// Baja de usuario; nadie puede borrar su propia cuenta
    pub async fn destroy(&self, principal: &Principal, id: i64) -> AppResult<()> {
        self.show(id).await?;

        if principal.user_id == id {
            return Err(AppError::SelfDeletion);
        }

        if !self.users.delete(id).await? {
            return Err(not_found_error("User", id));
        }
        self.roles.revoke_all(id).await?;

        tracing::info!("🗑️ User {} deleted by {}", id, principal.user_id);
        Ok(())
    }

    async fn ensure_unique(
        &self,
        email: &str,
        username: Option<&str>,
        except: Option<i64>,
    ) -> AppResult<()> {
        let mut errors = ValidationErrors::new();

        if self.users.exists("email", Value::from(email), except).await? {
            errors.add("email", unique_error("email", "email"));
        }
        if let Some(username) = username {
            if self.users.exists("username", Value::from(username), except).await? {
                errors.add("username", unique_error("username", "username"));
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// El rol sigue a `user_type`, salvo para quien ya es super-admin
    async fn sync_role(&self, user: &User) -> AppResult<()> {
        let current = self.roles.roles_for(user.id).await?;
        if current.contains(&Role::SuperAdmin) {
            return Ok(());
        }

        match user.user_type {
            Some(user_type) => self.roles.sync(user.id, role_for_user_type(user_type)).await,
            None => self.roles.revoke_all(user.id).await,
        }
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(|e| AppError::Hash(e.to_string()))
    }
}
