/**
 * Content Routes
 * Raw site content rows, admin upserts and localized bundle resolution
 */
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{self, Language, ResolvedBundle};
use crate::db::models::{SiteContent, UpsertSiteContent};
use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/content/{sectionKey}/resolved
#[derive(Debug, Default, Deserialize)]
pub struct ResolveQuery {
    pub lang: Option<String>,
    /// Comma-separated required field names
    pub fields: Option<String>,
}

/// Request body for PUT /api/content/{sectionKey}
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentRequest {
    pub content_ar: Option<Value>,
    pub content_en: Option<Value>,
    pub image_url: Option<String>,
}

/// Response for GET /api/i18n/{lang}
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nResponse {
    pub language: Language,
    pub direction: String,
    pub sections: Vec<ResolvedBundle>,
}

// ============================================================================
// Helpers
// ============================================================================

pub(crate) fn parse_language(lang: Option<&str>) -> Result<Language, ApiError> {
    match lang.map(str::trim).filter(|l| !l.is_empty()) {
        None => Ok(Language::default()),
        Some(raw) => raw
            .parse()
            .map_err(|e: content::UnsupportedLanguage| ApiError::invalid_field("lang", e.to_string())),
    }
}

fn required_string(value: Option<Value>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ApiError::invalid_field(field, format!("{field} must be a string"))),
        None => Err(ApiError::invalid_field(field, format!("{field} is required"))),
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("Content not found".to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/content
pub async fn list_content(State(state): State<AppState>) -> Result<Json<Vec<SiteContent>>, ApiError> {
    Ok(Json(state.content.list_sections().await?))
}

/// GET /api/content/{sectionKey}
pub async fn get_content(
    State(state): State<AppState>,
    Path(section_key): Path<String>,
) -> Result<Json<SiteContent>, ApiError> {
    state
        .content
        .get_section(&section_key)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// PUT /api/content/{sectionKey} - Insert or overwrite a section (auth required)
pub async fn upsert_content(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(section_key): Path<String>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<Json<SiteContent>, ApiError> {
    let section_key = section_key.trim().to_string();
    if section_key.is_empty() {
        return Err(ApiError::invalid_field("sectionKey", "sectionKey is required"));
    }

    let content_ar = required_string(payload.content_ar, "contentAr")?;
    let content_en = required_string(payload.content_en, "contentEn")?;

    let row = state
        .content
        .upsert_section(UpsertSiteContent {
            section_key,
            content_ar,
            content_en,
            image_url: payload.image_url,
        })
        .await?;

    tracing::info!(section_key = %row.section_key, "site content updated");
    Ok(Json(row))
}

/// GET /api/content/{sectionKey}/resolved?lang=&fields=
pub async fn get_resolved_content(
    State(state): State<AppState>,
    Path(section_key): Path<String>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolvedBundle>, ApiError> {
    let language = parse_language(query.lang.as_deref())?;

    let required: Vec<String> = match query.fields.as_deref() {
        Some(fields) => fields
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(String::from)
            .collect(),
        None => content::default_required_fields(&section_key)
            .iter()
            .map(|f| f.to_string())
            .collect(),
    };

    // Content resolution never fails on storage problems; fall back to static copy.
    let row = match state.content.get_section(&section_key).await {
        Ok(row) => row,
        Err(e) => {
            tracing::warn!(section_key = %section_key, error = %e, "content lookup failed, using static copy");
            None
        }
    };

    content::resolve_section(row.as_ref(), &section_key, language, required.as_slice())
        .map(Json)
        .ok_or_else(not_found)
}

/// GET /api/i18n/{lang} - Every section resolved for one language
pub async fn get_translations(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Result<Json<I18nResponse>, ApiError> {
    let language = parse_language(Some(&lang))?;

    let rows = state.content.list_sections().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "content listing failed, using static copy");
        Vec::new()
    });

    Ok(Json(I18nResponse {
        language,
        direction: language.direction().to_string(),
        sections: content::resolve_all(&rows, language),
    }))
}
