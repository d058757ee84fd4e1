//! Asignaciones usuario → rol
//!
//! Se consultan por id de usuario; el `User` no conoce sus roles.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::services::authorization_service::Role;
use crate::utils::errors::{map_db_error, AppResult};

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn roles_for(&self, user_id: i64) -> AppResult<Vec<Role>>;

    /// Añadir un rol (idempotente)
    async fn assign(&self, user_id: i64, role: Role) -> AppResult<()>;

    /// Reemplazar todos los roles del usuario por uno solo
    async fn sync(&self, user_id: i64, role: Role) -> AppResult<()>;

    async fn revoke_all(&self, user_id: i64) -> AppResult<()>;
}

pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn roles_for(&self, user_id: i64) -> AppResult<Vec<Role>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(names
            .iter()
            .filter_map(|name| {
                let role = Role::from_str(name);
                if role.is_none() {
                    tracing::warn!("⚠️ Unknown role '{}' for user {}", name, user_id);
                }
                role
            })
            .collect())
    }

    async fn assign(&self, user_id: i64, role: Role) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn sync(&self, user_id: i64, role: Role) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    async fn revoke_all(&self, user_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRoleStore {
    assignments: RwLock<HashMap<i64, Vec<Role>>>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn roles_for(&self, user_id: i64) -> AppResult<Vec<Role>> {
        let assignments = self.assignments.read().await;
        Ok(assignments.get(&user_id).cloned().unwrap_or_default())
    }

    async fn assign(&self, user_id: i64, role: Role) -> AppResult<()> {
        let mut assignments = self.assignments.write().await;
        let roles = assignments.entry(user_id).or_default();
        if !roles.contains(&role) {
            roles.push(role);
        }
        Ok(())
    }

    async fn sync(&self, user_id: i64, role: Role) -> AppResult<()> {
        self.assignments.write().await.insert(user_id, vec![role]);
        Ok(())
    }

    async fn revoke_all(&self, user_id: i64) -> AppResult<()> {
        self.assignments.write().await.remove(&user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_assigns_syncs_and_revokes() {
        let store = MemoryRoleStore::new();
        store.assign(1, Role::Admin).await.unwrap();
        store.assign(1, Role::Admin).await.unwrap();
        store.assign(1, Role::Manager).await.unwrap();
        assert_eq!(store.roles_for(1).await.unwrap(), vec![Role::Admin, Role::Manager]);

        store.sync(1, Role::Driver).await.unwrap();
        assert_eq!(store.roles_for(1).await.unwrap(), vec![Role::Driver]);

        store.revoke_all(1).await.unwrap();
        assert!(store.roles_for(1).await.unwrap().is_empty());
    }
}
