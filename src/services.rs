/*!
 * Services
 * Services listed on the site, newest first. Same storage split as projects.
 */
use chrono::Utc;
use sqlx::PgPool;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

use crate::db::models::{NewService, Service, ServiceChanges};
use crate::error::StoreError;

const SERVICE_COLUMNS: &str =
    "id, title_ar, title_en, description_ar, description_en, icon, featured, created_at";

#[derive(Debug, Default)]
pub struct MemoryTable {
    next_id: i32,
    rows: BTreeMap<i32, Service>,
}

#[derive(Debug, Clone)]
pub enum ServiceStore {
    Postgres(Arc<PgPool>),
    Memory(Arc<RwLock<MemoryTable>>),
}

impl ServiceStore {
    pub fn in_memory() -> Self {
        ServiceStore::Memory(Arc::new(RwLock::new(MemoryTable::default())))
    }

    pub async fn list(&self) -> Result<Vec<Service>, StoreError> {
        match self {
            ServiceStore::Postgres(pool) => Ok(sqlx::query_as::<_, Service>(&format!(
                "SELECT {SERVICE_COLUMNS} FROM services ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(pool.as_ref())
            .await?),
            ServiceStore::Memory(table) => {
                Ok(table.read().await.rows.values().rev().cloned().collect())
            }
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Service>, StoreError> {
        match self {
            ServiceStore::Postgres(pool) => Ok(sqlx::query_as::<_, Service>(&format!(
                "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
            ))
            .bind(id)
            .fetch_optional(pool.as_ref())
            .await?),
            ServiceStore::Memory(table) => Ok(table.read().await.rows.get(&id).cloned()),
        }
    }

    pub async fn create(&self, input: NewService) -> Result<Service, StoreError> {
        match self {
            ServiceStore::Postgres(pool) => Ok(sqlx::query_as::<_, Service>(&format!(
                r#"
                INSERT INTO services (title_ar, title_en, description_ar, description_en, icon, featured)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {SERVICE_COLUMNS}
                "#
            ))
            .bind(&input.title_ar)
            .bind(&input.title_en)
            .bind(&input.description_ar)
            .bind(&input.description_en)
            .bind(&input.icon)
            .bind(input.featured)
            .fetch_one(pool.as_ref())
            .await?),
            ServiceStore::Memory(table) => {
                let mut table = table.write().await;
                table.next_id += 1;
                let row = Service {
                    id: table.next_id,
                    title_ar: input.title_ar,
                    title_en: input.title_en,
                    description_ar: input.description_ar,
                    description_en: input.description_en,
                    icon: input.icon,
                    featured: input.featured,
                    created_at: Utc::now(),
                };
                table.rows.insert(row.id, row.clone());
                Ok(row)
            }
        }
    }

    pub async fn update(
        &self,
        id: i32,
        changes: ServiceChanges,
    ) -> Result<Option<Service>, StoreError> {
        match self {
            ServiceStore::Postgres(pool) => Ok(sqlx::query_as::<_, Service>(&format!(
                r#"
                UPDATE services SET
                    title_ar = COALESCE($1, title_ar),
                    title_en = COALESCE($2, title_en),
                    description_ar = COALESCE($3, description_ar),
                    description_en = COALESCE($4, description_en),
                    icon = COALESCE($5, icon),
                    featured = COALESCE($6, featured)
                WHERE id = $7
                RETURNING {SERVICE_COLUMNS}
                "#
            ))
            .bind(&changes.title_ar)
            .bind(&changes.title_en)
            .bind(&changes.description_ar)
            .bind(&changes.description_en)
            .bind(&changes.icon)
            .bind(changes.featured)
            .bind(id)
            .fetch_optional(pool.as_ref())
            .await?),
            ServiceStore::Memory(table) => {
                let mut table = table.write().await;
                let Some(existing) = table.rows.get(&id).cloned() else {
                    return Ok(None);
                };
                let row = changes.apply(existing);
                table.rows.insert(id, row.clone());
                Ok(Some(row))
            }
        }
    }

    pub async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        match self {
            ServiceStore::Postgres(pool) => {
                let result = sqlx::query("DELETE FROM services WHERE id = $1")
                    .bind(id)
                    .execute(pool.as_ref())
                    .await?;
                Ok(result.rows_affected() > 0)
            }
            ServiceStore::Memory(table) => Ok(table.write().await.rows.remove(&id).is_some()),
        }
    }
}
