//! Database Models - rows of the site tables (used by sqlx/serde).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One editable block of bilingual copy. `content_ar`/`content_en` hold JSON
/// text stored verbatim; shape is only checked when resolving.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub id: i32,
    pub section_key: String,
    pub content_ar: String,
    pub content_en: String,
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Insert-or-overwrite payload for a content section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSiteContent {
    pub section_key: String,
    pub content_ar: String,
    pub content_en: String,
    pub image_url: Option<String>,
}

/// Global site setting (tracking ids and the like)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSetting {
    pub id: i32,
    pub setting_key: String,
    pub setting_value: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSiteSetting {
    pub setting_key: String,
    pub setting_value: Option<String>,
    pub description: Option<String>,
}

/// Bilingual blog post
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i32,
    pub title_ar: String,
    pub title_en: String,
    pub content_ar: String,
    pub content_en: String,
    pub excerpt_ar: String,
    pub excerpt_en: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Blog list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListResponse {
    pub items: Vec<BlogPost>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

/// Completed work shown in the projects gallery
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title_ar: String,
    pub title_en: String,
    pub description_ar: String,
    pub description_en: String,
    pub image_url: Option<String>,
    pub category: String,
    pub completion_date: Option<DateTime<Utc>>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Create payload for a project. Missing text fields default to empty and are
/// rejected by route validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProject {
    pub title_ar: String,
    pub title_en: String,
    pub description_ar: String,
    pub description_en: String,
    pub image_url: Option<String>,
    pub category: String,
    pub completion_date: Option<DateTime<Utc>>,
    pub featured: bool,
}

/// Partial update for a project; `None` leaves the column as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectChanges {
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub completion_date: Option<DateTime<Utc>>,
    pub featured: Option<bool>,
}

impl ProjectChanges {
    pub fn apply(self, mut project: Project) -> Project {
        if let Some(v) = self.title_ar {
            project.title_ar = v;
        }
        if let Some(v) = self.title_en {
            project.title_en = v;
        }
        if let Some(v) = self.description_ar {
            project.description_ar = v;
        }
        if let Some(v) = self.description_en {
            project.description_en = v;
        }
        if self.image_url.is_some() {
            project.image_url = self.image_url;
        }
        if let Some(v) = self.category {
            project.category = v;
        }
        if self.completion_date.is_some() {
            project.completion_date = self.completion_date;
        }
        if let Some(v) = self.featured {
            project.featured = v;
        }
        project
    }
}

/// A service offered by the company (distinct from the calculator catalog)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    pub title_ar: String,
    pub title_en: String,
    pub description_ar: String,
    pub description_en: String,
    /// Icon name or URL
    pub icon: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewService {
    pub title_ar: String,
    pub title_en: String,
    pub description_ar: String,
    pub description_en: String,
    pub icon: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChanges {
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub icon: Option<String>,
    pub featured: Option<bool>,
}

impl ServiceChanges {
    pub fn apply(self, mut service: Service) -> Service {
        if let Some(v) = self.title_ar {
            service.title_ar = v;
        }
        if let Some(v) = self.title_en {
            service.title_en = v;
        }
        if let Some(v) = self.description_ar {
            service.description_ar = v;
        }
        if let Some(v) = self.description_en {
            service.description_en = v;
        }
        if self.icon.is_some() {
            service.icon = self.icon;
        }
        if let Some(v) = self.featured {
            service.featured = v;
        }
        service
    }
}
