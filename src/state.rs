//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los stores son objetos de trait para que
//! el mismo router funcione contra Postgres o contra memoria.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::models::{Product, User, Vehicle};
use crate::repositories::{
    MemoryRoleStore, MemoryStore, PgRoleStore, PgStore, RoleStore, Store,
};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub users: Arc<dyn Store<User>>,
    pub vehicles: Arc<dyn Store<Vehicle>>,
    pub products: Arc<dyn Store<Product>>,
    pub roles: Arc<dyn RoleStore>,
}

impl AppState {
    /// Estado respaldado por Postgres
    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            config: Arc::new(config),
            users: Arc::new(PgStore::<User>::new(pool.clone())),
            vehicles: Arc::new(PgStore::<Vehicle>::new(pool.clone())),
            products: Arc::new(PgStore::<Product>::new(pool.clone())),
            roles: Arc::new(PgRoleStore::new(pool)),
        }
    }

    /// Estado en memoria, vacío
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            config: Arc::new(config),
            users: Arc::new(MemoryStore::<User>::new()),
            vehicles: Arc::new(MemoryStore::<Vehicle>::new()),
            products: Arc::new(MemoryStore::<Product>::new()),
            roles: Arc::new(MemoryRoleStore::new()),
        }
    }
}
