/**
 * Blog Routes
 * Bilingual blog posts: public reads, admin CRUD
 */
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::models::{BlogListResponse, BlogPost};
use crate::error::ApiError;
use crate::routes::auth::AdminUser;
use crate::routes::parse_id;
use crate::state::AppState;

const POST_COLUMNS: &str = "id, title_ar, title_en, content_ar, content_en, excerpt_ar, \
     excerpt_en, slug, image_url, published, created_at";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/blog (list)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Highest page a list request may ask for.
const MAX_PAGE: i64 = 100_000;

impl BlogListQuery {
    /// (page, page_size, offset) with page in 1..=MAX_PAGE and page_size in 1..=100.
    fn window(&self) -> Result<(i64, i64, i64), ApiError> {
        if self.page > MAX_PAGE {
            return Err(ApiError::invalid_field(
                "page",
                format!("page must be at most {MAX_PAGE}"),
            ));
        }
        let page_size = self.page_size.clamp(1, 100);
        let page = self.page.max(1);
        Ok((page, page_size, (page - 1) * page_size))
    }
}

/// Request body for POST /api/blog (create)
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub content_ar: String,
    #[serde(default)]
    pub content_en: String,
    #[serde(default)]
    pub excerpt_ar: String,
    #[serde(default)]
    pub excerpt_en: String,
    #[serde(default)]
    pub slug: String,
    pub image_url: Option<String>,
    pub published: Option<bool>,
}

/// Request body for PATCH /api/blog/{id} (update)
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub content_ar: Option<String>,
    pub content_en: Option<String>,
    pub excerpt_ar: Option<String>,
    pub excerpt_en: Option<String>,
    pub slug: Option<String>,
    pub image_url: Option<String>,
    pub published: Option<bool>,
}

// ============================================================================
// Validation
// ============================================================================

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, and hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Sanitize HTML content using ammonia
fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

fn invalid_slug() -> ApiError {
    ApiError::invalid_field(
        "slug",
        "Slug must contain only lowercase letters, numbers, and hyphens",
    )
}

impl CreateBlogRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let required = [
            ("titleAr", &self.title_ar),
            ("titleEn", &self.title_en),
            ("contentAr", &self.content_ar),
            ("contentEn", &self.content_en),
            ("excerptAr", &self.excerpt_ar),
            ("excerptEn", &self.excerpt_en),
            ("slug", &self.slug),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ApiError::invalid_field(field, format!("{field} is required")));
        }
        if !is_valid_slug(&self.slug) {
            return Err(invalid_slug());
        }
        Ok(())
    }
}

impl UpdateBlogRequest {
    fn validate(&self) -> Result<(), ApiError> {
        match &self.slug {
            Some(slug) if !is_valid_slug(slug) => Err(invalid_slug()),
            _ => Ok(()),
        }
    }

    /// Overlay the provided fields onto `post`.
    fn apply(self, mut post: BlogPost) -> BlogPost {
        if let Some(v) = self.title_ar {
            post.title_ar = v;
        }
        if let Some(v) = self.title_en {
            post.title_en = v;
        }
        if let Some(v) = self.content_ar {
            post.content_ar = sanitize_html(&v);
        }
        if let Some(v) = self.content_en {
            post.content_en = sanitize_html(&v);
        }
        if let Some(v) = self.excerpt_ar {
            post.excerpt_ar = v;
        }
        if let Some(v) = self.excerpt_en {
            post.excerpt_en = v;
        }
        if let Some(v) = self.slug {
            post.slug = v;
        }
        if self.image_url.is_some() {
            post.image_url = self.image_url;
        }
        if let Some(v) = self.published {
            post.published = v;
        }
        post
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn slug_conflict(e: sqlx::Error) -> ApiError {
    if is_unique_violation(&e) {
        ApiError::Conflict("Slug already exists".to_string())
    } else {
        ApiError::Database(e)
    }
}

async fn fetch_page(
    pool: &PgPool,
    (page, page_size, offset): (i64, i64, i64),
    published_only: bool,
) -> Result<BlogListResponse, ApiError> {
    let filter = if published_only {
        "WHERE published = true"
    } else {
        ""
    };

    let items = sqlx::query_as::<_, BlogPost>(&format!(
        "SELECT {POST_COLUMNS} FROM blog_posts {filter} ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
    ))
    .bind(page_size)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM blog_posts {filter}"))
        .fetch_one(pool)
        .await?;

    Ok(BlogListResponse {
        items,
        page,
        page_size,
        total,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/blog - Published posts, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<BlogListResponse>, ApiError> {
    let window = query.window()?;
    let pool = state.require_pool()?;
    Ok(Json(fetch_page(pool, window, true).await?))
}

/// GET /api/admin/blog - Every post including drafts
pub async fn list_all_posts(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<BlogListResponse>, ApiError> {
    let window = query.window()?;
    let pool = state.require_pool()?;
    Ok(Json(fetch_page(pool, window, false).await?))
}

/// GET /api/blog/{slug} - Single published post
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    if !is_valid_slug(&slug) {
        return Err(invalid_slug());
    }
    let pool = state.require_pool()?;

    let post = sqlx::query_as::<_, BlogPost>(&format!(
        "SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = $1 AND published = true"
    ))
    .bind(&slug)
    .fetch_optional(pool)
    .await?;

    post.map(Json)
        .ok_or_else(|| ApiError::NotFound("Blog post not found".to_string()))
}

/// POST /api/blog - Create new blog post (auth required)
pub async fn create_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    payload.validate()?;
    let pool = state.require_pool()?;

    let post = sqlx::query_as::<_, BlogPost>(&format!(
        r#"
        INSERT INTO blog_posts (title_ar, title_en, content_ar, content_en, excerpt_ar, excerpt_en, slug, image_url, published)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(&payload.title_ar)
    .bind(&payload.title_en)
    .bind(sanitize_html(&payload.content_ar))
    .bind(sanitize_html(&payload.content_en))
    .bind(&payload.excerpt_ar)
    .bind(&payload.excerpt_en)
    .bind(&payload.slug)
    .bind(&payload.image_url)
    .bind(payload.published.unwrap_or(true))
    .fetch_one(pool)
    .await
    .map_err(slug_conflict)?;

    tracing::info!(id = post.id, slug = %post.slug, "blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// PATCH /api/blog/{id} - Partial update (auth required)
pub async fn update_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<BlogPost>, ApiError> {
    let id = parse_id(&id)?;
    payload.validate()?;
    let pool = state.require_pool()?;

    let existing = sqlx::query_as::<_, BlogPost>(&format!(
        "SELECT {POST_COLUMNS} FROM blog_posts WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Blog post not found".to_string()))?;

    let post = payload.apply(existing);

    let updated = sqlx::query_as::<_, BlogPost>(&format!(
        r#"
        UPDATE blog_posts
        SET title_ar = $1, title_en = $2, content_ar = $3, content_en = $4,
            excerpt_ar = $5, excerpt_en = $6, slug = $7, image_url = $8, published = $9
        WHERE id = $10
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(&post.title_ar)
    .bind(&post.title_en)
    .bind(&post.content_ar)
    .bind(&post.content_en)
    .bind(&post.excerpt_ar)
    .bind(&post.excerpt_en)
    .bind(&post.slug)
    .bind(&post.image_url)
    .bind(post.published)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(slug_conflict)?
    .ok_or_else(|| ApiError::NotFound("Blog post not found".to_string()))?;

    Ok(Json(updated))
}

/// DELETE /api/blog/{id} - Delete blog post (auth required)
pub async fn delete_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let pool = state.require_pool()?;

    let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Blog post not found".to_string()));
    }

    tracing::info!(id, "blog post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Published (slug, created_at) pairs for the sitemap, newest first.
pub async fn published_slugs(
    pool: &PgPool,
) -> Result<Vec<(String, chrono::DateTime<chrono::Utc>)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT slug, created_at FROM blog_posts WHERE published = true ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::ErrorResponse;
    use crate::routes::auth::create_access_token;
    use axum::{
        body::Body,
        http::Request,
        routing::get,
        Router,
    };
    use chrono::Utc;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::in_memory(AppConfig::for_tests("admin123"))
    }

    fn blog_router(state: AppState) -> Router {
        Router::new()
            .route("/api/blog", get(list_posts).post(create_post))
            .route("/api/admin/blog", get(list_all_posts))
            .route(
                "/api/blog/{slug}",
                get(get_post).patch(update_post).delete(delete_post),
            )
            .with_state(state)
    }

    fn bearer(state: &AppState) -> String {
        let token = create_access_token(&state.config.auth, "admin@example.com").unwrap();
        format!("Bearer {token}")
    }

    fn create_request() -> CreateBlogRequest {
        CreateBlogRequest {
            title_ar: "عنوان".into(),
            title_en: "Title".into(),
            content_ar: "<p>محتوى</p>".into(),
            content_en: "<p>Body</p>".into(),
            excerpt_ar: "مقتطف".into(),
            excerpt_en: "Excerpt".into(),
            slug: "first-post".into(),
            image_url: None,
            published: Some(true),
        }
    }

    fn sample_post() -> BlogPost {
        BlogPost {
            id: 1,
            title_ar: "عنوان".into(),
            title_en: "Title".into(),
            content_ar: "محتوى".into(),
            content_en: "Body".into(),
            excerpt_ar: "مقتطف".into(),
            excerpt_en: "Excerpt".into(),
            slug: "first-post".into(),
            image_url: Some("/img.png".into()),
            published: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("post-2024"));
        assert!(!is_valid_slug("Hello-World"));
        assert!(!is_valid_slug("hello--world"));
        assert!(!is_valid_slug("-hello"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_sanitize_html_strips_scripts() {
        let cleaned = sanitize_html("<p>ok</p><script>alert(1)</script>");
        assert!(cleaned.contains("<p>ok</p>"));
        assert!(!cleaned.contains("script"));
    }

    #[test]
    fn test_create_validation_reports_first_missing_field() {
        let mut req = create_request();
        req.excerpt_en = "  ".into();
        match req.validate() {
            Err(ApiError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("excerptEn")),
            other => panic!("unexpected: {other:?}"),
        }

        let mut req = create_request();
        req.slug = "Bad Slug".into();
        assert!(matches!(req.validate(), Err(ApiError::Validation { .. })));
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_update_apply_keeps_unset_fields() {
        let update = UpdateBlogRequest {
            title_en: Some("New".into()),
            content_en: Some("<b>x</b><script>y</script>".into()),
            published: Some(true),
            ..Default::default()
        };
        let post = update.apply(sample_post());
        assert_eq!(post.title_en, "New");
        assert_eq!(post.title_ar, "عنوان");
        assert!(!post.content_en.contains("script"));
        assert_eq!(post.image_url.as_deref(), Some("/img.png"));
        assert!(post.published);
    }

    #[test]
    fn test_list_window_clamps() {
        let q = BlogListQuery { page: 0, page_size: 500 };
        assert_eq!(q.window().unwrap(), (1, 100, 0));
        let q = BlogListQuery { page: 3, page_size: 0 };
        assert_eq!(q.window().unwrap(), (3, 1, 2));
        let q = BlogListQuery { page: i64::MIN, page_size: i64::MIN };
        assert_eq!(q.window().unwrap(), (1, 1, 0));
    }

    #[test]
    fn test_list_window_rejects_huge_page() {
        let q: BlogListQuery =
            serde_json::from_str(r#"{"page":9223372036854775807,"pageSize":100}"#).unwrap();
        match q.window() {
            Err(ApiError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("page")),
            other => panic!("unexpected: {other:?}"),
        }
        let q = BlogListQuery { page: MAX_PAGE, page_size: 100 };
        assert_eq!(q.window().unwrap().2, (MAX_PAGE - 1) * 100);
    }

    #[tokio::test]
    async fn test_huge_page_query_returns_bad_request() {
        let req = Request::get("/api/blog?page=9223372036854775807&pageSize=100")
            .body(Body::empty())
            .unwrap();
        let res = blog_router(state()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patch_with_slug_segment_returns_json_bad_request() {
        let state = state();
        let auth = bearer(&state);
        let app = blog_router(state);

        let req = Request::patch("/api/blog/some-slug")
            .header("content-type", "application/json")
            .header("authorization", auth.clone())
            .body(Body::from("{}"))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let err: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(err.field.as_deref(), Some("id"));

        let req = Request::delete("/api/blog/some-slug")
            .header("authorization", auth)
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_without_database_returns_service_unavailable() {
        let req = Request::get("/api/blog").body(Body::empty()).unwrap();
        let res = blog_router(state()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_get_post_invalid_slug_returns_bad_request() {
        let req = Request::get("/api/blog/Not_Valid").body(Body::empty()).unwrap();
        let res = blog_router(state()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_routes_require_auth() {
        let app = blog_router(state());

        let req = Request::get("/api/admin/blog").body(Body::empty()).unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = Request::delete("/api/blog/1").body(Body::empty()).unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = Request::post("/api/blog")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&create_request()).unwrap()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authorized_create_without_database_returns_service_unavailable() {
        let state = state();
        let auth = bearer(&state);
        let req = Request::post("/api/blog")
            .header("content-type", "application/json")
            .header("authorization", auth)
            .body(Body::from(serde_json::to_vec(&create_request()).unwrap()))
            .unwrap();
        let res = blog_router(state).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_authorized_create_with_missing_field_returns_bad_request() {
        let state = state();
        let auth = bearer(&state);
        let mut body = create_request();
        body.title_ar = String::new();
        let req = Request::post("/api/blog")
            .header("content-type", "application/json")
            .header("authorization", auth)
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let res = blog_router(state).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
