//! Rutas HTTP
//!
//! Cada recurso expone su propio router; aquí se montan bajo `/api`.

pub mod authorization_routes;
pub mod product_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::Router;

use crate::state::AppState;

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/users", user_routes::create_user_router())
        .nest("/api/drivers", user_routes::create_driver_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/products", product_routes::create_product_router())
        .nest("/api", authorization_routes::create_authorization_router())
}
