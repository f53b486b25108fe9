/**
 * Authentication Routes
 * JWT login and verification for the single admin account
 */
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap},
    Json,
};
use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Access token lifetime. There is no refresh flow; the admin logs in again.
const ACCESS_TOKEN_EXPIRY_DAYS: i64 = 7;

const ADMIN_USER_ID: &str = "local-admin";
const ADMIN_ROLE: &str = "ADMIN";

// ============================================================================
// Types
// ============================================================================

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// User info returned to frontend
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl From<Claims> for UserInfo {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserInfo,
    pub access_token: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub is_valid: bool,
    pub user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Extractor for handlers that require a valid admin token.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        require_admin(&parts.headers, &state.config.auth).map(AdminUser)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

pub fn create_access_token(
    auth: &AuthConfig,
    email: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::days(ACCESS_TOKEN_EXPIRY_DAYS);

    let claims = Claims {
        sub: ADMIN_USER_ID.to_string(),
        email: email.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
}

pub fn verify_access_token(
    auth: &AuthConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub fn require_admin(headers: &HeaderMap, auth: &AuthConfig) -> Result<Claims, ApiError> {
    let token = extract_bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    verify_access_token(auth, token).map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        ApiError::InvalidToken
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = payload.email.trim().to_string();

    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }
    if !email.contains('@') {
        return Err(ApiError::invalid_field("email", "Invalid email format"));
    }

    let auth = &state.config.auth;
    let email_matches = email.eq_ignore_ascii_case(&auth.admin_email);

    // bcrypt is CPU-bound; keep the async executor free.
    let password = payload.password;
    let hash = auth.admin_password_hash.clone();
    let password_ok = tokio::task::spawn_blocking(move || verify(&password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false);

    if !email_matches || !password_ok {
        tracing::warn!("Failed login attempt for: {}", email);
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = create_access_token(auth, &auth.admin_email)
        .map_err(|e| ApiError::Internal(format!("failed to create access token: {e}")))?;

    tracing::info!("Successful login for user: {}", auth.admin_email);

    Ok(Json(LoginResponse {
        success: true,
        user: UserInfo {
            user_id: ADMIN_USER_ID.to_string(),
            email: auth.admin_email.clone(),
            role: ADMIN_ROLE.to_string(),
        },
        access_token,
    }))
}

/// POST /api/auth/verify
/// Always 200; validity is reported in the body.
pub async fn verify_token(State(state): State<AppState>, headers: HeaderMap) -> Json<VerifyResponse> {
    match require_admin(&headers, &state.config.auth) {
        Ok(claims) => Json(VerifyResponse {
            success: true,
            is_valid: true,
            user: Some(claims.into()),
            error: None,
        }),
        Err(e) => Json(VerifyResponse {
            success: false,
            is_valid: false,
            user: None,
            error: Some(e.to_string()),
        }),
    }
}
