/*!
 * Localized Content
 * Resolves the text bundle for a section in one language, preferring
 * operator-edited content over the built-in translations.
 */
pub mod fallback;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::db::models::SiteContent;

pub use fallback::{static_bundle, static_section_keys};
pub use store::ContentStore;

/// Resolved fields of one section in one language.
pub type Bundle = Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    pub const ALL: [Language; 2] = [Language::Ar, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    pub fn direction(&self) -> &'static str {
        match self {
            Language::Ar => "rtl",
            Language::En => "ltr",
        }
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    /// Accepts `ar`/`en` in any case, with or without a region tag (`ar-EG`, `en_US`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ar" => Ok(Language::Ar),
            "en" => Ok(Language::En),
            _ => Err(UnsupportedLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a resolved bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleSource {
    Dynamic,
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBundle {
    pub section_key: String,
    pub language: Language,
    pub source: BundleSource,
    pub fields: Bundle,
}

/// Fields the home page needs before it trusts a stored section.
pub fn default_required_fields(section_key: &str) -> &'static [&'static str] {
    match section_key {
        "hero" => &["tagline", "subtitle"],
        "about" => &["title", "content"],
        "contact" => &["title", "phone"],
        _ => &[],
    }
}

/// Parse the stored blob for `language` and accept it only if every required
/// field is a non-blank string. Anything else yields `None`.
fn usable_dynamic_bundle<S: AsRef<str>>(
    row: &SiteContent,
    language: Language,
    required_fields: &[S],
) -> Option<Bundle> {
    let raw = match language {
        Language::Ar => &row.content_ar,
        Language::En => &row.content_en,
    };

    let parsed = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::debug!(section = %row.section_key, %language, "stored content is not a JSON object");
            return None;
        }
        Err(e) => {
            tracing::debug!(section = %row.section_key, %language, error = %e, "stored content is not valid JSON");
            return None;
        }
    };

    let missing = required_fields.iter().map(AsRef::as_ref).find(|field| {
        !matches!(parsed.get(*field), Some(Value::String(s)) if !s.trim().is_empty())
    });

    if let Some(field) = missing {
        tracing::debug!(section = %row.section_key, %language, field, "stored content missing required field");
        return None;
    }

    Some(parsed)
}

/// Resolve the text bundle for `section_key` in `language`.
///
/// The stored row wins only when its blob parses as an object carrying every
/// required field; otherwise the whole static bundle is returned. Returns
/// `None` only when the key has no static translation at all.
pub fn resolve_section<S: AsRef<str>>(
    row: Option<&SiteContent>,
    section_key: &str,
    language: Language,
    required_fields: &[S],
) -> Option<ResolvedBundle> {
    if let Some(fields) = row.and_then(|r| usable_dynamic_bundle(r, language, required_fields)) {
        return Some(ResolvedBundle {
            section_key: section_key.to_string(),
            language,
            source: BundleSource::Dynamic,
            fields,
        });
    }

    match static_bundle(section_key, language) {
        Some(fields) => Some(ResolvedBundle {
            section_key: section_key.to_string(),
            language,
            source: BundleSource::Static,
            fields: fields.clone(),
        }),
        None => {
            tracing::error!(section = %section_key, %language, "no static translation for section");
            None
        }
    }
}

/// Resolve every section of the static table, each with its default required fields.
pub fn resolve_all(rows: &[SiteContent], language: Language) -> Vec<ResolvedBundle> {
    static_section_keys()
        .iter()
        .filter_map(|key| {
            let row = rows.iter().find(|r| r.section_key == *key);
            resolve_section(row, key, language, default_required_fields(key))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn row(key: &str, ar: Value, en: &str) -> SiteContent {
        SiteContent {
            id: 1,
            section_key: key.to_string(),
            content_ar: ar.to_string(),
            content_en: en.to_string(),
            image_url: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("ar".parse::<Language>().unwrap(), Language::Ar);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ar-EG".parse::<Language>().unwrap(), Language::Ar);
        assert_eq!("en_US".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_direction() {
        assert_eq!(Language::Ar.direction(), "rtl");
        assert_eq!(Language::En.direction(), "ltr");
    }

    #[test]
    fn test_every_static_section_resolves_without_rows() {
        for key in static_section_keys() {
            for lang in Language::ALL {
                let resolved = resolve_section(None, key, lang, default_required_fields(key))
                    .unwrap_or_else(|| panic!("{key}/{lang} should resolve"));
                assert_eq!(resolved.source, BundleSource::Static);
                assert!(!resolved.fields.is_empty());
            }
        }
    }

    #[test]
    fn test_complete_dynamic_content_wins_and_keeps_extra_fields() {
        let stored = row(
            "hero",
            json!({ "tagline": "عنوان جديد", "subtitle": "وصف", "badge": "جديد" }),
            "{}",
        );
        let resolved =
            resolve_section(Some(&stored), "hero", Language::Ar, &["tagline", "subtitle"]).unwrap();

        assert_eq!(resolved.source, BundleSource::Dynamic);
        assert_eq!(resolved.fields["tagline"], "عنوان جديد");
        assert_eq!(resolved.fields["badge"], "جديد");
        assert!(resolved.fields.get("cta").is_none());
    }

    #[test]
    fn test_picks_blob_for_requested_language() {
        let stored = row(
            "contact",
            json!({ "title": "تواصل", "phone": "0100" }),
            r#"{"title":"Reach us","phone":"+20 100"}"#,
        );
        let resolved =
            resolve_section(Some(&stored), "contact", Language::En, &["title", "phone"]).unwrap();
        assert_eq!(resolved.fields["title"], "Reach us");
    }

    #[test]
    fn test_whitespace_required_field_falls_back_to_whole_static_bundle() {
        let stored = row("hero", json!({ "tagline": "   ", "subtitle": "ok" }), "{}");
        let resolved =
            resolve_section(Some(&stored), "hero", Language::Ar, &["tagline", "subtitle"]).unwrap();

        assert_eq!(resolved.source, BundleSource::Static);
        assert_eq!(&resolved.fields, static_bundle("hero", Language::Ar).unwrap());
    }

    #[test]
    fn test_missing_or_non_string_field_falls_back() {
        let missing = row("about", json!({ "title": "About" }), "{}");
        let resolved =
            resolve_section(Some(&missing), "about", Language::Ar, &["title", "content"]).unwrap();
        assert_eq!(resolved.source, BundleSource::Static);

        let numeric = row("about", json!({ "title": "About", "content": 12 }), "{}");
        let resolved =
            resolve_section(Some(&numeric), "about", Language::Ar, &["title", "content"]).unwrap();
        assert_eq!(&resolved.fields, static_bundle("about", Language::Ar).unwrap());
    }

    #[test]
    fn test_malformed_or_non_object_json_falls_back() {
        let broken = row("contact", json!({}), "{not json");
        let resolved =
            resolve_section(Some(&broken), "contact", Language::En, &["title"]).unwrap();
        assert_eq!(resolved.source, BundleSource::Static);
        assert_eq!(&resolved.fields, static_bundle("contact", Language::En).unwrap());

        let array = row("contact", json!({}), r#"["title"]"#);
        let resolved = resolve_section(Some(&array), "contact", Language::En, &["title"]).unwrap();
        assert_eq!(resolved.source, BundleSource::Static);
    }

    #[test]
    fn test_no_required_fields_accepts_any_object() {
        let stored = row("footer", json!({ "company": "أسس" }), "{}");
        let resolved = resolve_section::<&str>(Some(&stored), "footer", Language::Ar, &[]).unwrap();
        assert_eq!(resolved.source, BundleSource::Dynamic);
    }

    #[test]
    fn test_unknown_section_without_row_is_none() {
        assert!(resolve_section::<&str>(None, "pricing-banner", Language::En, &[]).is_none());
    }

    #[test]
    fn test_unknown_section_with_usable_row_resolves_dynamically() {
        let stored = row("promo", json!({}), r#"{"headline":"Winter offer"}"#);
        let resolved =
            resolve_section(Some(&stored), "promo", Language::En, &["headline"]).unwrap();
        assert_eq!(resolved.source, BundleSource::Dynamic);
    }

    #[test]
    fn test_resolve_all_covers_static_table() {
        let rows = vec![row(
            "hero",
            json!({ "tagline": "جديد", "subtitle": "جديد" }),
            "{}",
        )];
        let resolved = resolve_all(&rows, Language::Ar);
        assert_eq!(resolved.len(), static_section_keys().len());

        let hero = resolved.iter().find(|b| b.section_key == "hero").unwrap();
        assert_eq!(hero.source, BundleSource::Dynamic);

        let hero_en = resolve_all(&rows, Language::En)
            .into_iter()
            .find(|b| b.section_key == "hero")
            .unwrap();
        assert_eq!(hero_en.source, BundleSource::Static);
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let stored = row("hero", json!({ "tagline": "x", "subtitle": "y" }), "{}");
        let first = resolve_section(Some(&stored), "hero", Language::Ar, &["tagline"]);
        let second = resolve_section(Some(&stored), "hero", Language::Ar, &["tagline"]);
        assert_eq!(first, second);
    }
}
