/*!
 * Site Settings
 * Key/value settings (tracking ids) with the same one-row-per-key upsert rule as content.
 */
use chrono::Utc;
use sqlx::PgPool;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

use crate::db::models::{SiteSetting, UpsertSiteSetting};
use crate::error::StoreError;

pub const FB_PIXEL_ID: &str = "fb_pixel_id";
pub const GA_MEASUREMENT_ID: &str = "ga_measurement_id";

#[derive(Debug, Clone)]
pub enum SettingsStore {
    Postgres(Arc<PgPool>),
    Memory(Arc<RwLock<BTreeMap<String, SiteSetting>>>),
}

impl SettingsStore {
    pub fn in_memory() -> Self {
        SettingsStore::Memory(Arc::new(RwLock::new(BTreeMap::new())))
    }

    pub async fn list(&self) -> Result<Vec<SiteSetting>, StoreError> {
        match self {
            SettingsStore::Postgres(pool) => Ok(sqlx::query_as::<_, SiteSetting>(
                "SELECT id, setting_key, setting_value, description, updated_at \
                 FROM site_settings ORDER BY setting_key",
            )
            .fetch_all(pool.as_ref())
            .await?),
            SettingsStore::Memory(map) => Ok(map.read().await.values().cloned().collect()),
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<SiteSetting>, StoreError> {
        match self {
            SettingsStore::Postgres(pool) => Ok(sqlx::query_as::<_, SiteSetting>(
                "SELECT id, setting_key, setting_value, description, updated_at \
                 FROM site_settings WHERE setting_key = $1",
            )
            .bind(key)
            .fetch_optional(pool.as_ref())
            .await?),
            SettingsStore::Memory(map) => Ok(map.read().await.get(key).cloned()),
        }
    }

    pub async fn upsert(&self, input: UpsertSiteSetting) -> Result<SiteSetting, StoreError> {
        match self {
            SettingsStore::Postgres(pool) => Ok(sqlx::query_as::<_, SiteSetting>(
                r#"
                INSERT INTO site_settings (setting_key, setting_value, description, updated_at)
                VALUES ($1, $2, $3, now())
                ON CONFLICT (setting_key) DO UPDATE SET
                    setting_value = EXCLUDED.setting_value,
                    description = EXCLUDED.description,
                    updated_at = now()
                RETURNING id, setting_key, setting_value, description, updated_at
                "#,
            )
            .bind(&input.setting_key)
            .bind(&input.setting_value)
            .bind(&input.description)
            .fetch_one(pool.as_ref())
            .await?),
            SettingsStore::Memory(map) => {
                let mut map = map.write().await;
                let id = map
                    .get(&input.setting_key)
                    .map(|s| s.id)
                    .unwrap_or_else(|| map.values().map(|s| s.id).max().unwrap_or(0) + 1);
                let row = SiteSetting {
                    id,
                    setting_key: input.setting_key.clone(),
                    setting_value: input.setting_value,
                    description: input.description,
                    updated_at: Utc::now(),
                };
                map.insert(input.setting_key, row.clone());
                Ok(row)
            }
        }
    }

    /// Value of a setting, treating blank as unset.
    pub async fn value(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .get(key)
            .await?
            .and_then(|s| s.setting_value)
            .filter(|v| !v.trim().is_empty()))
    }
}
