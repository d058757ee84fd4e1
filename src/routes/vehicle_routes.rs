use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    VehicleEditResponse, VehicleFormOptions, VehicleIndexResponse, VehicleRequest,
};
use crate::dto::ApiResponse;
use crate::listing::ListParams;
use crate::middleware::Principal;
use crate::models::Vehicle;
use crate::services::authorization_service::permissions::{
    CREATE_VEHICLES, DELETE_VEHICLES, EDIT_VEHICLES, VIEW_VEHICLES,
};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/create", get(create_vehicle_form))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/edit", get(edit_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    principal: Principal,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<VehicleIndexResponse>> {
    principal.authorize(VIEW_VEHICLES)?;
    let params = ListParams::from_pairs(pairs);
    Ok(Json(VehicleController::new(&state).index(&params).await?))
}

async fn create_vehicle_form(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<VehicleFormOptions>> {
    principal.authorize(CREATE_VEHICLES)?;
    Ok(Json(VehicleController::new(&state).create_options()))
}

async fn create_vehicle(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<VehicleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Vehicle>>)> {
    principal.authorize(CREATE_VEHICLES)?;
    let vehicle = VehicleController::new(&state).store(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(vehicle, "Vehicle created successfully!")),
    ))
}

async fn get_vehicle(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    principal.authorize(VIEW_VEHICLES)?;
    let vehicle = VehicleController::new(&state).show(id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn edit_vehicle(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<VehicleEditResponse>> {
    principal.authorize(EDIT_VEHICLES)?;
    Ok(Json(VehicleController::new(&state).edit(id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(request): Json<VehicleRequest>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    principal.authorize(EDIT_VEHICLES)?;
    let vehicle = VehicleController::new(&state).update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(vehicle, "Vehicle updated successfully!")))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.authorize(DELETE_VEHICLES)?;
    VehicleController::new(&state).destroy(id).await?;
    Ok(Json(ApiResponse::message("Vehicle deleted successfully!")))
}
