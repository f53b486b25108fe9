//! Shared application state handed to every handler.

use sqlx::PgPool;
use std::{sync::Arc, time::Instant};

use crate::analytics::Analytics;
use crate::config::AppConfig;
use crate::content::ContentStore;
use crate::error::ApiError;
use crate::projects::ProjectStore;
use crate::services::ServiceStore;
use crate::settings::SettingsStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub content: ContentStore,
    pub settings: SettingsStore,
    pub projects: ProjectStore,
    pub services: ServiceStore,
    pub analytics: Arc<Analytics>,
    pool: Option<Arc<PgPool>>,
    started_at: Instant,
}

impl AppState {
    /// Postgres-backed stores when a pool is given, in-memory stores otherwise.
    pub fn new(config: AppConfig, pool: Option<Arc<PgPool>>) -> Self {
        let (content, settings, projects, services) = match &pool {
            Some(pool) => (
                ContentStore::Postgres(pool.clone()),
                SettingsStore::Postgres(pool.clone()),
                ProjectStore::Postgres(pool.clone()),
                ServiceStore::Postgres(pool.clone()),
            ),
            None => (
                ContentStore::in_memory(),
                SettingsStore::in_memory(),
                ProjectStore::in_memory(),
                ServiceStore::in_memory(),
            ),
        };

        Self {
            config: Arc::new(config),
            content,
            settings,
            projects,
            services,
            analytics: Arc::new(Analytics::new()),
            pool,
            started_at: Instant::now(),
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, None)
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_deref()
    }

    /// Pool for endpoints that have no in-memory fallback.
    pub fn require_pool(&self) -> Result<&PgPool, ApiError> {
        self.pool().ok_or(ApiError::DatabaseUnavailable)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
