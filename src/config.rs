/*!
 * Configuration
 * Environment-driven settings, gathered once at startup and passed through `AppState`.
 */
use bcrypt::{hash, DEFAULT_COST};

use crate::error::ConfigError;

const DEFAULT_JWT_SECRET: &str = "default-jwt-secret-change-in-production";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_SITE_URL: &str = "https://aseskahraba.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match std::env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Credentials and signing material for the single admin account.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password_hash: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}

impl AuthConfig {
    /// Build from env. ADMIN_HASH_PASSWORD wins over ADMIN_PASSWORD, which wins
    /// over the development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());

        let admin_password_hash = match std::env::var("ADMIN_HASH_PASSWORD") {
            Ok(hashed) => hashed,
            Err(_) => {
                let plain = std::env::var("ADMIN_PASSWORD")
                    .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());
                hash(&plain, DEFAULT_COST)?
            }
        };

        Ok(Self {
            jwt_secret,
            admin_email,
            admin_password_hash,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret.is_empty() || self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub site_url: String,
    pub allowed_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let auth = AuthConfig::from_env()?;

        if environment.is_production() {
            if auth.uses_default_secret() {
                return Err(ConfigError::InsecureJwtSecret);
            }

            let admin_password_set = std::env::var("ADMIN_HASH_PASSWORD").is_ok()
                || std::env::var("ADMIN_PASSWORD").is_ok();
            if auth.admin_email.is_empty() || auth.admin_email == DEFAULT_ADMIN_EMAIL {
                tracing::warn!(
                    "SECURITY: ADMIN_EMAIL is using an insecure default. \
                     Set ADMIN_EMAIL to the real operator address."
                );
            }
            if !admin_password_set {
                tracing::warn!(
                    "SECURITY: Neither ADMIN_HASH_PASSWORD nor ADMIN_PASSWORD is set. \
                     The fallback default password is insecure."
                );
            }
        }

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: raw })?,
            Err(_) => 3001,
        };

        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            environment,
            host,
            port,
            site_url,
            allowed_origins: allowed_origins_from_env(),
            auth,
        })
    }

    /// Config for tests and tooling: development mode, a cheap bcrypt hash.
    pub fn for_tests(admin_password: &str) -> Self {
        Self {
            environment: Environment::Development,
            host: "127.0.0.1".to_string(),
            port: 0,
            site_url: DEFAULT_SITE_URL.to_string(),
            allowed_origins: Vec::new(),
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
                admin_password_hash: hash(admin_password, 4).unwrap_or_default(),
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN. Empty means the
/// localhost development defaults are used by the CORS layer.
fn allowed_origins_from_env() -> Vec<String> {
    let from_list: Vec<String> = std::env::var("ALLOWED_ORIGINS")
        .map(|s| {
            s.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !from_list.is_empty() {
        return from_list;
    }

    std::env::var("FRONTEND_ORIGIN")
        .ok()
        .filter(|origin| !origin.trim().is_empty())
        .map(|origin| vec![origin.trim().to_string()])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_labels() {
        assert_eq!(Environment::Production.as_str(), "production");
        assert!(!Environment::Development.is_production());
    }

    #[test]
    fn test_for_tests_hash_verifies() {
        let config = AppConfig::for_tests("s3cret");
        assert!(bcrypt::verify("s3cret", &config.auth.admin_password_hash).unwrap());
        assert!(!config.auth.uses_default_secret());
    }

    #[test]
    fn test_default_secret_is_detected() {
        let auth = AuthConfig {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password_hash: String::new(),
        };
        assert!(auth.uses_default_secret());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AppConfig::for_tests("hunter2");
        let printed = format!("{:?}", config.auth);
        assert!(!printed.contains("test-secret"));
        assert!(printed.contains("admin@example.com"));
    }
}
