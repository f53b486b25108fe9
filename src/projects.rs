/*!
 * Projects
 * Gallery of completed work, newest first. Postgres when a pool is configured, in-memory otherwise.
 */
use chrono::Utc;
use sqlx::PgPool;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

use crate::db::models::{NewProject, Project, ProjectChanges};
use crate::error::StoreError;

const PROJECT_COLUMNS: &str = "id, title_ar, title_en, description_ar, description_en, \
     image_url, category, completion_date, featured, created_at";

#[derive(Debug, Default)]
pub struct MemoryTable {
    next_id: i32,
    rows: BTreeMap<i32, Project>,
}

#[derive(Debug, Clone)]
pub enum ProjectStore {
    Postgres(Arc<PgPool>),
    Memory(Arc<RwLock<MemoryTable>>),
}

impl ProjectStore {
    pub fn in_memory() -> Self {
        ProjectStore::Memory(Arc::new(RwLock::new(MemoryTable::default())))
    }

    pub async fn list(&self) -> Result<Vec<Project>, StoreError> {
        match self {
            ProjectStore::Postgres(pool) => Ok(sqlx::query_as::<_, Project>(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(pool.as_ref())
            .await?),
            ProjectStore::Memory(table) => {
                Ok(table.read().await.rows.values().rev().cloned().collect())
            }
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Project>, StoreError> {
        match self {
            ProjectStore::Postgres(pool) => Ok(sqlx::query_as::<_, Project>(&format!(
                "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
            ))
            .bind(id)
            .fetch_optional(pool.as_ref())
            .await?),
            ProjectStore::Memory(table) => Ok(table.read().await.rows.get(&id).cloned()),
        }
    }

    pub async fn create(&self, input: NewProject) -> Result<Project, StoreError> {
        match self {
            ProjectStore::Postgres(pool) => Ok(sqlx::query_as::<_, Project>(&format!(
                r#"
                INSERT INTO projects (title_ar, title_en, description_ar, description_en,
                                      image_url, category, completion_date, featured)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {PROJECT_COLUMNS}
                "#
            ))
            .bind(&input.title_ar)
            .bind(&input.title_en)
            .bind(&input.description_ar)
            .bind(&input.description_en)
            .bind(&input.image_url)
            .bind(&input.category)
            .bind(input.completion_date)
            .bind(input.featured)
            .fetch_one(pool.as_ref())
            .await?),
            ProjectStore::Memory(table) => {
                let mut table = table.write().await;
                table.next_id += 1;
                let row = Project {
                    id: table.next_id,
                    title_ar: input.title_ar,
                    title_en: input.title_en,
                    description_ar: input.description_ar,
                    description_en: input.description_en,
                    image_url: input.image_url,
                    category: input.category,
                    completion_date: input.completion_date,
                    featured: input.featured,
                    created_at: Utc::now(),
                };
                table.rows.insert(row.id, row.clone());
                Ok(row)
            }
        }
    }

    /// Apply the provided fields; `Ok(None)` when no project has `id`.
    pub async fn update(
        &self,
        id: i32,
        changes: ProjectChanges,
    ) -> Result<Option<Project>, StoreError> {
        match self {
            ProjectStore::Postgres(pool) => Ok(sqlx::query_as::<_, Project>(&format!(
                r#"
                UPDATE projects SET
                    title_ar = COALESCE($1, title_ar),
                    title_en = COALESCE($2, title_en),
                    description_ar = COALESCE($3, description_ar),
                    description_en = COALESCE($4, description_en),
                    image_url = COALESCE($5, image_url),
                    category = COALESCE($6, category),
                    completion_date = COALESCE($7, completion_date),
                    featured = COALESCE($8, featured)
                WHERE id = $9
                RETURNING {PROJECT_COLUMNS}
                "#
            ))
            .bind(&changes.title_ar)
            .bind(&changes.title_en)
            .bind(&changes.description_ar)
            .bind(&changes.description_en)
            .bind(&changes.image_url)
            .bind(&changes.category)
            .bind(changes.completion_date)
            .bind(changes.featured)
            .bind(id)
            .fetch_optional(pool.as_ref())
            .await?),
            ProjectStore::Memory(table) => {
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

    /// `true` when a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        match self {
            ProjectStore::Postgres(pool) => {
                let result = sqlx::query("DELETE FROM projects WHERE id = $1")
                    .bind(id)
                    .execute(pool.as_ref())
                    .await?;
                Ok(result.rows_affected() > 0)
            }
            ProjectStore::Memory(table) => Ok(table.write().await.rows.remove(&id).is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str) -> NewProject {
        NewProject {
            title_ar: format!("{title} ar"),
            title_en: title.to_string(),
            description_ar: "وصف".into(),
            description_en: "Description".into(),
            category: "residential".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = ProjectStore::in_memory();
        store.create(project("Villa")).await.unwrap();
        store.create(project("Mall")).await.unwrap();

        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title_en)
            .collect();
        assert_eq!(titles, ["Mall", "Villa"]);
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let store = ProjectStore::in_memory();
        let mut input = project("Villa");
        input.image_url = Some("/villa.png".into());
        let created = store.create(input).await.unwrap();

        let updated = store
            .update(
                created.id,
                ProjectChanges {
                    featured: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.featured);
        assert_eq!(updated.title_en, "Villa");
        assert_eq!(updated.image_url.as_deref(), Some("/villa.png"));

        assert!(store
            .update(999, ProjectChanges::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let store = ProjectStore::in_memory();
        let created = store.create(project("Villa")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.get(created.id).await.unwrap().is_none());
    }
}
