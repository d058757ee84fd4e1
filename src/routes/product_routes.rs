use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::controllers::product_controller::ProductController;
use crate::dto::product_dto::{
    ProductEditResponse, ProductFormOptions, ProductIndexResponse, ProductRequest,
};
use crate::dto::ApiResponse;
use crate::listing::ListParams;
use crate::middleware::Principal;
use crate::models::Product;
use crate::services::authorization_service::permissions::{
    CREATE_PRODUCTS, DELETE_PRODUCTS, EDIT_PRODUCTS, EXPORT_PRODUCTS, VIEW_PRODUCTS,
};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_product_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/create", get(create_product_form))
        .route("/export", get(export_products))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/:id/edit", get(edit_product))
}

async fn list_products(
    State(state): State<AppState>,
    principal: Principal,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<ProductIndexResponse>> {
    principal.authorize(VIEW_PRODUCTS)?;
    let params = ListParams::from_pairs(pairs);
    Ok(Json(ProductController::new(&state).index(&params).await?))
}

async fn export_products(
    State(state): State<AppState>,
    principal: Principal,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    principal.authorize(EXPORT_PRODUCTS)?;
    let params = ListParams::from_pairs(pairs);
    let body = ProductController::new(&state).export(&params).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"products.csv\""),
        ],
        body,
    ))
}

async fn create_product_form(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<ProductFormOptions>> {
    principal.authorize(CREATE_PRODUCTS)?;
    Ok(Json(ProductController::new(&state).create_options().await?))
}

async fn create_product(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<ProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    principal.authorize(CREATE_PRODUCTS)?;
    let product = ProductController::new(&state).store(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(product, "Product created successfully!")),
    ))
}

async fn get_product(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Product>>> {
    principal.authorize(VIEW_PRODUCTS)?;
    let product = ProductController::new(&state).show(id).await?;
    Ok(Json(ApiResponse::success(product)))
}

async fn edit_product(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductEditResponse>> {
    principal.authorize(EDIT_PRODUCTS)?;
    Ok(Json(ProductController::new(&state).edit(id).await?))
}

async fn update_product(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(request): Json<ProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    principal.authorize(EDIT_PRODUCTS)?;
    let product = ProductController::new(&state).update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(product, "Product updated successfully!")))
}

async fn delete_product(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.authorize(DELETE_PRODUCTS)?;
    ProductController::new(&state).destroy(id).await?;
    Ok(Json(ApiResponse::message("Product deleted successfully!")))
}
