//! Services module
//!
//! Lógica de negocio que no pertenece a un único recurso: el catálogo de
//! roles y permisos.

pub mod authorization_service;
