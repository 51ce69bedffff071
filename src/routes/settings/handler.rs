// Settings endpoints are placeholders: they acknowledge the request but do
// not persist anything yet.

use axum::{Json, response::IntoResponse};
use serde_json::json;

use super::model::UpdateResponse;

#[axum::debug_handler]
pub async fn settings() -> impl IntoResponse {
    Json(json!({ "default_settings": null }))
}

#[axum::debug_handler]
pub async fn update_profile() -> impl IntoResponse {
    Json(UpdateResponse::ok("Profile updated successfully"))
}

#[axum::debug_handler]
pub async fn change_password() -> impl IntoResponse {
    Json(UpdateResponse::ok("Password changed successfully"))
}

#[axum::debug_handler]
pub async fn update_campaign_settings() -> impl IntoResponse {
    Json(UpdateResponse::ok("Campaign settings updated successfully"))
}
