/**
 * Service Routes
 * Public service listing, admin create/update/delete
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::db::models::{NewService, Service, ServiceChanges};
use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::routes::{parse_id, reject_blank_updates, require_non_blank};
use crate::state::AppState;

fn not_found() -> ApiError {
    ApiError::NotFound("Service not found".to_string())
}

/// GET /api/services
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    Ok(Json(state.services.list().await?))
}

/// GET /api/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Service>, ApiError> {
    let id = parse_id(&id)?;
    state.services.get(id).await?.map(Json).ok_or_else(not_found)
}

/// POST /api/services (auth required)
pub async fn create_service(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<NewService>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    require_non_blank(&[
        ("titleAr", payload.title_ar.as_str()),
        ("titleEn", payload.title_en.as_str()),
        ("descriptionAr", payload.description_ar.as_str()),
        ("descriptionEn", payload.description_en.as_str()),
    ])?;
    let service = state.services.create(payload).await?;
    tracing::info!(id = service.id, "service created");
    Ok((StatusCode::CREATED, Json(service)))
}

/// PATCH /api/services/{id} (auth required)
pub async fn update_service(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ServiceChanges>,
) -> Result<Json<Service>, ApiError> {
    let id = parse_id(&id)?;
    reject_blank_updates(&[
        ("titleAr", payload.title_ar.as_deref()),
        ("titleEn", payload.title_en.as_deref()),
        ("descriptionAr", payload.description_ar.as_deref()),
        ("descriptionEn", payload.description_en.as_deref()),
    ])?;
    state
        .services
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// DELETE /api/services/{id} (auth required)
pub async fn delete_service(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if !state.services.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(id, "service deleted");
    Ok(StatusCode::NO_CONTENT)
}
