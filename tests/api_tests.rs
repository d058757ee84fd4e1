use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use fleet_admin::config::environment::{EnvironmentConfig, StorageBackend};
use fleet_admin::create_app;
use fleet_admin::seed::seed_demo_data;
use fleet_admin::services::authorization_service::Role;
use fleet_admin::state::AppState;
use fleet_admin::utils::jwt::generate_token;

// Ids asignados por el seed, en orden de creación
const ADMIN: i64 = 1;
const JOHN_DRIVER: i64 = 2;
const ALICE_MANAGER: i64 = 5;
const EMMA_EMPLOYEE: i64 = 7;
const DAVID_INACTIVE: i64 = 8;

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        storage: StorageBackend::Memory,
        database_url: None,
        jwt_secret: "test-secret".to_string(),
        jwt_expiration: 3600,
        cors_origins: Vec::new(),
        bcrypt_cost: 4,
        seed_demo_data: true,
    }
}

async fn create_test_app() -> (AppState, Router) {
    let state = AppState::in_memory(test_config());
    seed_demo_data(&state).await.unwrap();
    let app = create_app(state.clone());
    (state, app)
}

fn bearer(state: &AppState, user_id: i64) -> String {
    format!("Bearer {}", generate_token(user_id, &state.jwt).unwrap())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn get(app: &Router, state: &AppState, user_id: i64, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(state, user_id))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(
    app: &Router,
    state: &AppState,
    user_id: i64,
    method: Method,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(state, user_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn delete(app: &Router, state: &AppState, user_id: i64, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(state, user_id))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn names(page: &Value) -> Vec<String> {
    page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["name"].as_str().unwrap().to_string())
        .collect()
}

fn new_user_body(email: &str, user_type: &str) -> Value {
    json!({
        "name": "Nora Nuevo",
        "email": email,
        "password": "secret-pass",
        "password_confirmation": "secret-pass",
        "user_type": user_type,
        "status": "active",
    })
}

#[tokio::test]
async fn test_health_check() {
    let (_, app) = create_test_app().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_listing_requires_token() {
    let (_, app) = create_test_app().await;
    let request = Request::builder().uri("/api/users").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_inactive_user_token_is_rejected() {
    let (state, app) = create_test_app().await;
    let (status, _) = get(&app, &state, DAVID_INACTIVE, "/api/vehicles").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employee_cannot_list_users() {
    let (state, app) = create_test_app().await;

    let (status, body) = get(&app, &state, EMMA_EMPLOYEE, "/api/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = get(&app, &state, EMMA_EMPLOYEE, "/api/vehicles").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_index_defaults() {
    let (state, app) = create_test_app().await;
    let (status, body) = get(&app, &state, ADMIN, "/api/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"]["total"], 9);
    assert_eq!(body["users"]["per_page"], 10);
    assert_eq!(body["users"]["current_page"], 1);
    assert_eq!(body["stats"], json!({ "total": 9, "active": 7, "drivers": 3, "admins": 1 }));
    assert_eq!(body["queryParams"], json!({}));
    assert!(body["users"]["data"][0].get("password").is_none());
}

#[tokio::test]
async fn test_status_filter_keeps_stats_over_whole_table() {
    let (state, app) = create_test_app().await;
    let (status, body) = get(
        &app,
        &state,
        ADMIN,
        "/api/users?filters%5Bstatus%5D%5B%5D=inactive&filters%5Bstatus%5D%5B%5D=suspended&sort=name&direction=asc",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"]["total"], 2);
    assert_eq!(names(&body["users"]), vec!["David Worker", "Lisa Staff"]);
    assert_eq!(body["stats"]["active"], 7);
    assert_eq!(body["stats"]["total"], 9);
}

#[tokio::test]
async fn test_filter_options_ignore_active_filters() {
    let (state, app) = create_test_app().await;
    let (_, unfiltered) = get(&app, &state, ADMIN, "/api/users").await;
    let (_, filtered) = get(&app, &state, ADMIN, "/api/users?filters%5Buser_type%5D%5B%5D=manager").await;

    assert_eq!(filtered["users"]["total"], 2);
    assert_eq!(unfiltered["filterOptions"], filtered["filterOptions"]);
    assert_eq!(
        unfiltered["filterOptions"]["user_types"],
        json!(["admin", "driver", "employee", "manager"])
    );
}

#[tokio::test]
async fn test_search_and_query_params_echo() {
    let (state, app) = create_test_app().await;
    let (status, body) = get(&app, &state, ADMIN, "/api/users?search=sarah&per_page=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["users"]), vec!["Sarah Wilson"]);
    assert_eq!(body["queryParams"], json!({ "search": "sarah", "per_page": 5 }));
}

#[tokio::test]
async fn test_search_ignores_surrounding_whitespace() {
    let (state, app) = create_test_app().await;

    let (status, body) = get(&app, &state, ADMIN, "/api/users?search=%20sarah%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["users"]), vec!["Sarah Wilson"]);
    assert_eq!(body["queryParams"]["search"], " sarah ");

    let (status, body) = get(&app, &state, ADMIN, "/api/users?search=%20%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"]["total"], 9);
}

#[tokio::test]
async fn test_sorted_pagination() {
    let (state, app) = create_test_app().await;
    let (_, body) = get(&app, &state, ADMIN, "/api/users?sort=name&direction=asc&per_page=3&page=2").await;

    assert_eq!(names(&body["users"]), vec!["Emma Employee", "John Driver", "Lisa Staff"]);
    assert_eq!(body["users"]["last_page"], 3);
    assert_eq!(body["users"]["from"], 4);
    assert_eq!(body["users"]["to"], 6);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let (state, app) = create_test_app().await;
    let (status, body) = get(&app, &state, ADMIN, "/api/users?page=50").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"]["data"], json!([]));
    assert_eq!(body["users"]["total"], 9);
    assert!(body["users"]["from"].is_null());

    let (status, body) = get(&app, &state, ADMIN, "/api/users?page=1000001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"]["current_page"], 1_000_001);
    assert_eq!(body["users"]["data"], json!([]));
}

#[tokio::test]
async fn test_invalid_list_parameters_are_rejected() {
    let (state, app) = create_test_app().await;

    let (status, body) = get(&app, &state, ADMIN, "/api/users?sort=password").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"].get("sort").is_some());

    let (status, body) = get(&app, &state, ADMIN, "/api/users?per_page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("per_page").is_some());

    let (status, body) = get(&app, &state, ADMIN, "/api/users?filters%5Bpassword%5D%5B%5D=x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("filters").is_some());
}

#[tokio::test]
async fn test_drivers_view_only_lists_drivers() {
    let (state, app) = create_test_app().await;
    let (status, body) = get(&app, &state, ALICE_MANAGER, "/api/drivers?sort=name&direction=asc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["users"]), vec!["John Driver", "Mike Johnson", "Sarah Wilson"]);
    assert_eq!(body["stats"]["total"], 9);

    let (status, _) = get(&app, &state, JOHN_DRIVER, "/api/drivers").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_user_assigns_role() {
    let (state, app) = create_test_app().await;
    let (status, body) = send_json(
        &app,
        &state,
        ADMIN,
        Method::POST,
        "/api/users",
        new_user_body("nora@example.com", "manager"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created successfully!");
    assert!(body["data"].get("password").is_none());

    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(state.roles.roles_for(id).await.unwrap(), vec![Role::Manager]);
    assert_eq!(state.users.count().await.unwrap(), 10);
}

#[tokio::test]
async fn test_create_user_rejects_taken_email() {
    let (state, app) = create_test_app().await;
    let (status, body) = send_json(
        &app,
        &state,
        ADMIN,
        Method::POST,
        "/api/users",
        new_user_body("driver@example.com", "employee"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["email"][0]["code"], "unique");
    assert_eq!(state.users.count().await.unwrap(), 9);
}

#[tokio::test]
async fn test_create_driver_requires_driver_fields() {
    let (state, app) = create_test_app().await;
    let (status, body) = send_json(
        &app,
        &state,
        ADMIN,
        Method::POST,
        "/api/users",
        new_user_body("new.driver@example.com", "driver"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in [
        "driving_license_no",
        "nid_number",
        "present_address",
        "permanent_address",
        "emergency_contact_name",
        "emergency_contact_phone",
    ] {
        assert!(body["details"].get(field).is_some(), "missing error for {}", field);
    }
}

#[tokio::test]
async fn test_update_without_password_keeps_current_hash() {
    let (state, app) = create_test_app().await;
    let before = state.users.find(EMMA_EMPLOYEE).await.unwrap().unwrap();

    let (status, body) = send_json(
        &app,
        &state,
        ADMIN,
        Method::PUT,
        &format!("/api/users/{}", EMMA_EMPLOYEE),
        json!({
            "name": "Emma Promoted",
            "email": "emma.employee@example.com",
            "user_type": "manager",
            "status": "active",
            "password": "",
            "password_confirmation": "",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Emma Promoted");

    let after = state.users.find(EMMA_EMPLOYEE).await.unwrap().unwrap();
    assert_eq!(after.password, before.password);
    assert_eq!(state.roles.roles_for(EMMA_EMPLOYEE).await.unwrap(), vec![Role::Manager]);
}

#[tokio::test]
async fn test_admin_cannot_delete_own_account() {
    let (state, app) = create_test_app().await;
    let (status, body) = delete(&app, &state, ADMIN, &format!("/api/users/{}", ADMIN)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "SELF_DELETION_FORBIDDEN");
    assert_eq!(state.users.count().await.unwrap(), 9);
    assert!(state.users.find(ADMIN).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_user_removes_record_and_roles() {
    let (state, app) = create_test_app().await;
    let uri = format!("/api/users/{}", JOHN_DRIVER);

    let (status, body) = delete(&app, &state, ADMIN, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully!");
    assert!(state.roles.roles_for(JOHN_DRIVER).await.unwrap().is_empty());

    let (status, _) = get(&app, &state, ADMIN, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, &state, ADMIN, "/api/users/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manager_cannot_delete_users() {
    let (state, app) = create_test_app().await;
    let (status, _) = delete(&app, &state, ALICE_MANAGER, &format!("/api/users/{}", JOHN_DRIVER)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(state.users.count().await.unwrap(), 9);
}

#[tokio::test]
async fn test_vehicle_index_and_filters() {
    let (state, app) = create_test_app().await;

    let (status, body) = get(&app, &state, ADMIN, "/api/vehicles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"], json!({ "total": 5, "active": 4, "brands": 4, "inactive": 1 }));
    assert_eq!(body["filterOptions"]["brands"], json!(["Isuzu", "Mitsubishi", "Nissan", "Toyota"]));

    let (_, body) = get(&app, &state, ADMIN, "/api/vehicles?filters%5Bis_active%5D%5B%5D=0").await;
    assert_eq!(body["vehicles"]["total"], 1);
    assert_eq!(body["vehicles"]["data"][0]["brand"], "Isuzu");
    assert_eq!(body["stats"]["total"], 5);
}

#[tokio::test]
async fn test_vehicle_registration_must_be_unique() {
    let (state, app) = create_test_app().await;
    let (status, body) = send_json(
        &app,
        &state,
        ADMIN,
        Method::POST,
        "/api/vehicles",
        json!({
            "brand": "Honda",
            "model": "N-Van",
            "color": "Gray",
            "registration_number": "DHK-1001",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("registration_number").is_some());
    assert_eq!(state.vehicles.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_vehicle_update_keeps_active_flag_when_absent() {
    let (state, app) = create_test_app().await;
    let before = state.vehicles.find(4).await.unwrap().unwrap();
    assert_eq!(before.registration_number, "DHK-1004");
    assert!(!before.is_active);

    let (status, body) = send_json(
        &app,
        &state,
        ADMIN,
        Method::PUT,
        "/api/vehicles/4",
        json!({
            "brand": "Isuzu",
            "model": "D-Max",
            "color": "Red",
            "registration_number": "DHK-1004",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["color"], "Red");
    assert_eq!(body["data"]["is_active"], false);
}

#[tokio::test]
async fn test_product_crud() {
    let (state, app) = create_test_app().await;

    let (status, body) = send_json(
        &app,
        &state,
        ALICE_MANAGER,
        Method::POST,
        "/api/products",
        json!({
            "name": "Label Printer",
            "description": "Thermal printer",
            "price": "15.75",
            "category": "Electronics",
            "status": "pending",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["price"], "15.75");
    let id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = get(
        &app,
        &state,
        ALICE_MANAGER,
        "/api/products?search=Label%20Printer&filters%5Bstatus%5D%5B%5D=pending",
    )
    .await;
    assert_eq!(body["products"]["total"], 1);

    let (status, body) = send_json(
        &app,
        &state,
        ALICE_MANAGER,
        Method::PUT,
        &format!("/api/products/{}", id),
        json!({ "name": "Label Printer", "price": -1, "category": "Electronics", "status": "active" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("price").is_some());

    let (status, body) = send_json(
        &app,
        &state,
        ALICE_MANAGER,
        Method::POST,
        "/api/products",
        json!({ "name": "Forklift", "price": 1_000_000_000, "category": "Tools", "status": "active" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["price"][0]["code"], "max");

    // Los managers no tienen "delete products"
    let (status, _) = delete(&app, &state, ALICE_MANAGER, &format!("/api/products/{}", id)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = delete(&app, &state, ADMIN, &format!("/api/products/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found_before_validation() {
    let (state, app) = create_test_app().await;
    let (status, body) = send_json(
        &app,
        &state,
        ADMIN,
        Method::PUT,
        "/api/products/9999",
        json!({ "name": "", "price": -5, "category": "", "status": "archived" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_product_export_applies_filters_without_pagination() {
    let (state, app) = create_test_app().await;
    let request = Request::builder()
        .uri("/api/products/export?filters%5Bcategory%5D%5B%5D=Electronics&filters%5Bstatus%5D%5B%5D=active&sort=id&direction=asc&per_page=1")
        .header(header::AUTHORIZATION, bearer(&state, ALICE_MANAGER))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "ID,Name,Description,Price,Category,Status,Created At,Updated At");
    assert!(lines[1].starts_with("1,Standard Electronic,"));
    assert!(lines[1..].iter().all(|line| line.contains(",Electronics,Active,")));

    let (status, _) = get(&app, &state, EMMA_EMPLOYEE, "/api/products/export").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = get(&app, &state, ADMIN, "/api/products/export?sort=secret").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].get("sort").is_some());
}

#[tokio::test]
async fn test_role_catalogue() {
    let (state, app) = create_test_app().await;

    let (status, body) = get(&app, &state, ADMIN, "/api/roles").await;
    assert_eq!(status, StatusCode::OK);
    let roles = body.as_array().unwrap();
    assert_eq!(roles.len(), 5);
    assert_eq!(roles[0]["name"], "super-admin");

    let (status, body) = get(&app, &state, ADMIN, "/api/permissions").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().contains(&json!("view users")));

    let (status, _) = get(&app, &state, EMMA_EMPLOYEE, "/api/roles").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
