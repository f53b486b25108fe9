/**
 * Project Routes
 * Public gallery reads, admin create/update/delete
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::db::models::{NewProject, Project, ProjectChanges};
use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::routes::{parse_id, reject_blank_updates, require_non_blank};
use crate::state::AppState;

fn not_found() -> ApiError {
    ApiError::NotFound("Project not found".to_string())
}

fn validate_new(input: &NewProject) -> Result<(), ApiError> {
    require_non_blank(&[
        ("titleAr", input.title_ar.as_str()),
        ("titleEn", input.title_en.as_str()),
        ("descriptionAr", input.description_ar.as_str()),
        ("descriptionEn", input.description_en.as_str()),
        ("category", input.category.as_str()),
    ])
}

fn validate_changes(changes: &ProjectChanges) -> Result<(), ApiError> {
    reject_blank_updates(&[
        ("titleAr", changes.title_ar.as_deref()),
        ("titleEn", changes.title_en.as_deref()),
        ("descriptionAr", changes.description_ar.as_deref()),
        ("descriptionEn", changes.description_en.as_deref()),
        ("category", changes.category.as_deref()),
    ])
}

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.projects.list().await?))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let id = parse_id(&id)?;
    state.projects.get(id).await?.map(Json).ok_or_else(not_found)
}

/// POST /api/projects (auth required)
pub async fn create_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    validate_new(&payload)?;
    let project = state.projects.create(payload).await?;
    tracing::info!(id = project.id, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH /api/projects/{id} (auth required)
pub async fn update_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProjectChanges>,
) -> Result<Json<Project>, ApiError> {
    let id = parse_id(&id)?;
    validate_changes(&payload)?;
    state
        .projects
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// DELETE /api/projects/{id} (auth required)
pub async fn delete_project(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if !state.projects.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::ErrorResponse;
    use crate::routes::auth::create_access_token;
    use axum::{body::Body, http::Request, routing::get, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::in_memory(AppConfig::for_tests("admin123"))
    }

    fn projects_router(state: AppState) -> Router {
        Router::new()
            .route("/api/projects", get(list_projects).post(create_project))
            .route(
                "/api/projects/{id}",
                get(get_project)
                    .patch(update_project)
                    .delete(delete_project),
            )
            .with_state(state)
    }

    fn authed(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let token = create_access_token(&state.config.auth, "admin@example.com").unwrap();
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {token}"));
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn villa() -> Value {
        json!({
            "titleAr": "فيلا",
            "titleEn": "Villa",
            "descriptionAr": "تمديدات كاملة",
            "descriptionEn": "Full rewiring",
            "category": "residential",
            "imageUrl": "/villa.png",
            "completionDate": "2024-03-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_create_get_update_delete_round() {
        let state = state();
        let app = projects_router(state.clone());

        let (status, body) = send(
            app.clone(),
            authed(&state, "POST", "/api/projects", Some(villa())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Project = serde_json::from_slice(&body).unwrap();
        assert!(!created.featured);
        assert!(created.completion_date.is_some());

        let (status, body) = send(
            app.clone(),
            authed(
                &state,
                "PATCH",
                &format!("/api/projects/{}", created.id),
                Some(json!({"featured": true})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: Project = serde_json::from_slice(&body).unwrap();
        assert!(updated.featured);
        assert_eq!(updated.image_url.as_deref(), Some("/villa.png"));

        let req = Request::get(format!("/api/projects/{}", created.id))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app.clone(), req).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            app.clone(),
            authed(&state, "DELETE", &format!("/api/projects/{}", created.id), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let req = Request::get("/api/projects").body(Body::empty()).unwrap();
        let (_, body) = send(app, req).await;
        let all: Vec<Project> = serde_json::from_slice(&body).unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_writes_require_auth() {
        let app = projects_router(state());
        let req = Request::post("/api/projects")
            .header("content-type", "application/json")
            .body(Body::from(villa().to_string()))
            .unwrap();
        let (status, _) = send(app.clone(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let req = Request::delete("/api/projects/1").body(Body::empty()).unwrap();
        let (status, _) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_missing_category_names_field() {
        let state = state();
        let mut body = villa();
        body.as_object_mut().unwrap().remove("category");
        let (status, body) = send(
            projects_router(state.clone()),
            authed(&state, "POST", "/api/projects", Some(body)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.field.as_deref(), Some("category"));
    }

    #[tokio::test]
    async fn test_unknown_and_non_numeric_ids() {
        let state = state();
        let app = projects_router(state.clone());

        let req = Request::get("/api/projects/7").body(Body::empty()).unwrap();
        let (status, _) = send(app.clone(), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            app,
            authed(&state, "PATCH", "/api/projects/villa", Some(json!({}))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.field.as_deref(), Some("id"));
    }
}
