use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

pub const API_HEALTH: &str = "/api/health";

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn add_routes(router: Router) -> Router {
    router.route(API_HEALTH, get(health_check))
}
