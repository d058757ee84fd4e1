//! Middleware del sistema
//!
//! Autenticación por JWT y configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::Principal;
pub use cors::cors_layer;
