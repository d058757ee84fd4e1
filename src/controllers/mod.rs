//! Controllers
//!
//! Lógica de cada recurso sobre los stores; los handlers HTTP viven en
//! `routes` y sólo extraen, autorizan y delegan aquí.

pub mod product_controller;
pub mod user_controller;
pub mod vehicle_controller;
