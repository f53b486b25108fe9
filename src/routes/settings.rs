/**
 * Settings Routes
 * Public reads and admin upserts of site settings
 */
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::models::{SiteSetting, UpsertSiteSetting};
use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::state::AppState;

/// Request body for POST /api/settings
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingRequest {
    pub setting_key: Option<String>,
    pub setting_value: Option<String>,
    pub description: Option<String>,
}

/// GET /api/settings
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<Vec<SiteSetting>>, ApiError> {
    Ok(Json(state.settings.list().await?))
}

/// GET /api/settings/{key}
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SiteSetting>, ApiError> {
    state
        .settings
        .get(&key)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Setting not found".to_string()))
}

/// POST /api/settings - Insert or overwrite a setting (auth required)
pub async fn save_setting(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<SaveSettingRequest>,
) -> Result<Json<SiteSetting>, ApiError> {
    let setting_key = payload
        .setting_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::invalid_field("settingKey", "settingKey is required"))?;

    let setting = state
        .settings
        .upsert(UpsertSiteSetting {
            setting_key,
            setting_value: payload.setting_value,
            description: payload.description,
        })
        .await?;

    tracing::info!(setting_key = %setting.setting_key, "site setting saved");
    Ok(Json(setting))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::ErrorResponse;
    use crate::routes::auth::create_access_token;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn settings_router(state: AppState) -> Router {
        Router::new()
            .route("/api/settings", get(list_settings).post(save_setting))
            .route("/api/settings/{key}", get(get_setting))
            .with_state(state)
    }

    fn state() -> AppState {
        AppState::in_memory(AppConfig::for_tests("admin123"))
    }

    fn save(state: &AppState, body: &SaveSettingRequest) -> Request<Body> {
        let token = create_access_token(&state.config.auth, "admin@example.com").unwrap();
        Request::post("/api/settings")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_missing_setting_returns_not_found() {
        let req = Request::get("/api/settings/fb_pixel_id")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(settings_router(state()), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_save_requires_auth() {
        let req = Request::post("/api/settings")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"settingKey":"fb_pixel_id"}"#))
            .unwrap();
        let (status, _) = send(settings_router(state()), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_save_without_key_returns_bad_request() {
        let state = state();
        let req = save(&state, &SaveSettingRequest::default());
        let (status, body) = send(settings_router(state), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.field.as_deref(), Some("settingKey"));
    }

    #[tokio::test]
    async fn test_save_then_read_back() {
        let state = state();
        let app = settings_router(state.clone());

        for value in ["111", "222"] {
            let body = SaveSettingRequest {
                setting_key: Some("fb_pixel_id".into()),
                setting_value: Some(value.into()),
                description: None,
            };
            let (status, _) = send(app.clone(), save(&state, &body)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let req = Request::get("/api/settings").body(Body::empty()).unwrap();
        let (_, body) = send(app.clone(), req).await;
        let all: Vec<SiteSetting> = serde_json::from_slice(&body).unwrap();
        assert_eq!(all.len(), 1);

        let req = Request::get("/api/settings/fb_pixel_id")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        let setting: SiteSetting = serde_json::from_slice(&body).unwrap();
        assert_eq!(setting.setting_value.as_deref(), Some("222"));
    }
}
