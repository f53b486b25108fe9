//! Content table access: Postgres when a pool is configured, in-memory otherwise.
//!
//! Both backends keep at most one row per `section_key`; upserts overwrite the
//! text and keep the stored image unless a new one is given.

use chrono::Utc;
use sqlx::PgPool;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

use crate::db::models::{SiteContent, UpsertSiteContent};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryTable {
    next_id: i32,
    rows: BTreeMap<String, SiteContent>,
}

#[derive(Debug, Clone)]
pub enum ContentStore {
    Postgres(Arc<PgPool>),
    Memory(Arc<RwLock<MemoryTable>>),
}

impl ContentStore {
    pub fn in_memory() -> Self {
        ContentStore::Memory(Arc::new(RwLock::new(MemoryTable::default())))
    }

    pub async fn get_section(&self, section_key: &str) -> Result<Option<SiteContent>, StoreError> {
        match self {
            ContentStore::Postgres(pool) => Ok(sqlx::query_as::<_, SiteContent>(
                r#"
                SELECT id, section_key, content_ar, content_en, image_url, updated_at
                FROM site_content
                WHERE section_key = $1
                "#,
            )
            .bind(section_key)
            .fetch_optional(pool.as_ref())
            .await?),
            ContentStore::Memory(table) => Ok(table.read().await.rows.get(section_key).cloned()),
        }
    }

    pub async fn list_sections(&self) -> Result<Vec<SiteContent>, StoreError> {
        match self {
            ContentStore::Postgres(pool) => Ok(sqlx::query_as::<_, SiteContent>(
                r#"
                SELECT id, section_key, content_ar, content_en, image_url, updated_at
                FROM site_content
                ORDER BY section_key
                "#,
            )
            .fetch_all(pool.as_ref())
            .await?),
            ContentStore::Memory(table) => Ok(table.read().await.rows.values().cloned().collect()),
        }
    }

    /// Insert the section or overwrite the existing row for its key.
    /// `image_url: None` keeps the existing image.
    /// Concurrent writers to one key never produce two rows; the last write wins.
    pub async fn upsert_section(&self, input: UpsertSiteContent) -> Result<SiteContent, StoreError> {
        match self {
            ContentStore::Postgres(pool) => Ok(sqlx::query_as::<_, SiteContent>(
                r#"
                INSERT INTO site_content (section_key, content_ar, content_en, image_url, updated_at)
                VALUES ($1, $2, $3, $4, now())
                ON CONFLICT (section_key) DO UPDATE SET
                    content_ar = EXCLUDED.content_ar,
                    content_en = EXCLUDED.content_en,
                    image_url = COALESCE(EXCLUDED.image_url, site_content.image_url),
                    updated_at = now()
                RETURNING id, section_key, content_ar, content_en, image_url, updated_at
                "#,
            )
            .bind(&input.section_key)
            .bind(&input.content_ar)
            .bind(&input.content_en)
            .bind(&input.image_url)
            .fetch_one(pool.as_ref())
            .await?),
            ContentStore::Memory(table) => {
                let mut table = table.write().await;
                let existing = table
                    .rows
                    .get(&input.section_key)
                    .map(|r| (r.id, r.image_url.clone()));
                let (id, previous_image) = match existing {
                    Some(found) => found,
                    None => {
                        table.next_id += 1;
                        (table.next_id, None)
                    }
                };
                let row = SiteContent {
                    id,
                    section_key: input.section_key.clone(),
                    content_ar: input.content_ar,
                    content_en: input.content_en,
                    image_url: input.image_url.or(previous_image),
                    updated_at: Utc::now(),
                };
                table.rows.insert(input.section_key, row.clone());
                Ok(row)
            }
        }
    }

    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        match self {
            ContentStore::Postgres(pool) => {
                let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM site_content")
                    .fetch_one(pool.as_ref())
                    .await?;
                Ok(count == 0)
            }
            ContentStore::Memory(table) => Ok(table.read().await.rows.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert(key: &str, ar: &str, en: &str, image: Option<&str>) -> UpsertSiteContent {
        UpsertSiteContent {
            section_key: key.to_string(),
            content_ar: ar.to_string(),
            content_en: en.to_string(),
            image_url: image.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_get_missing_section_is_none() {
        let store = ContentStore::in_memory();
        assert!(store.get_section("hero").await.unwrap().is_none());
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_without_image_keeps_row_and_stored_image() {
        let store = ContentStore::in_memory();
        let first = store
            .upsert_section(upsert("hero", r#"{"tagline":"أ"}"#, r#"{"tagline":"a"}"#, Some("/a.png")))
            .await
            .unwrap();
        let second = store
            .upsert_section(upsert("hero", r#"{"tagline":"ب"}"#, r#"{"tagline":"b"}"#, None))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);

        let rows = store.list_sections().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content_en, r#"{"tagline":"b"}"#);
        assert_eq!(rows[0].image_url.as_deref(), Some("/a.png"));
    }

    #[tokio::test]
    async fn test_new_image_replaces_old_one() {
        let store = ContentStore::in_memory();
        store
            .upsert_section(upsert("hero", "{}", "{}", Some("/hero.png")))
            .await
            .unwrap();
        let row = store
            .upsert_section(upsert("hero", "{}", "{}", Some("/hero-2.png")))
            .await
            .unwrap();
        assert_eq!(row.image_url.as_deref(), Some("/hero-2.png"));
    }

    #[tokio::test]
    async fn test_content_is_stored_verbatim() {
        let store = ContentStore::in_memory();
        store
            .upsert_section(upsert("about", "not json at all", "{", None))
            .await
            .unwrap();
        let row = store.get_section("about").await.unwrap().unwrap();
        assert_eq!(row.content_ar, "not json at all");
        assert_eq!(row.content_en, "{");
    }

    #[tokio::test]
    async fn test_distinct_keys_get_distinct_ids_and_sorted_listing() {
        let store = ContentStore::in_memory();
        store.upsert_section(upsert("hero", "{}", "{}", None)).await.unwrap();
        store.upsert_section(upsert("about", "{}", "{}", None)).await.unwrap();

        let rows = store.list_sections().await.unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.section_key.as_str()).collect();
        assert_eq!(keys, ["about", "hero"]);
        assert_ne!(rows[0].id, rows[1].id);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_to_one_key_leave_one_row() {
        let store = ContentStore::in_memory();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .upsert_section(upsert("contact", &format!("{{\"n\":{i}}}"), "{}", None))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.list_sections().await.unwrap().len(), 1);
    }
}
