//! Persistencia
//!
//! [`store::Store`] es el contrato genérico; [`postgres_store`] y
//! [`memory_store`] lo implementan. Los módulos `*_repository` conectan
//! cada modelo con el contrato.

pub mod memory_store;
pub mod postgres_store;
pub mod product_repository;
pub mod role_repository;
pub mod store;
pub mod user_repository;
pub mod vehicle_repository;

pub use memory_store::MemoryStore;
pub use postgres_store::PgStore;
pub use role_repository::{MemoryRoleStore, PgRoleStore, RoleStore};
pub use store::{Assignments, Resource, Store};
