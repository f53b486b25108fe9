//! First-start seeding of the content and settings tables.

use serde_json::json;

use crate::content::ContentStore;
use crate::db::models::{UpsertSiteContent, UpsertSiteSetting};
use crate::error::StoreError;
use crate::settings::{SettingsStore, FB_PIXEL_ID, GA_MEASUREMENT_ID};

pub const DEFAULT_GA_MEASUREMENT_ID: &str = "G-WDRD35B2HV";

fn default_sections() -> Vec<UpsertSiteContent> {
    vec![
        UpsertSiteContent {
            section_key: "hero".to_string(),
            content_ar: json!({
                "tagline": "كهرباء معمولة صح… من أول مرة",
                "subtitle": "تنفيذ هندسي معتمد | بدون تنازلات | ضمان سنة كاملة",
                "cta": "اطلب معاينة هندسية",
                "ctaSecondary": "تواصل معنا"
            })
            .to_string(),
            content_en: json!({
                "tagline": "Electrical Work Done Right — From Day One",
                "subtitle": "Certified Engineering | No Compromises | 1-Year Warranty",
                "cta": "Request Engineering Visit",
                "ctaSecondary": "Contact Us"
            })
            .to_string(),
            image_url: None,
        },
        UpsertSiteContent {
            section_key: "about".to_string(),
            content_ar: json!({
                "title": "من نحن",
                "content": "أسس كهربا شركة متخصصة في الأعمال الكهربائية الاحترافية، بخبرة عملية منذ عام 2012 في التأسيس، التشطيب، التيار الخفيف، والأنظمة الذكية.\n\nنحن نؤمن أن الكهرباء علم هندسي وليس اجتهادًا، لذلك نعتمد فقط على حلول مدروسة، خامات معتمدة، وتنفيذ تحت إشراف هندسي مباشر، مع التزام كامل بالكود المصري والمعايير الدولية.\n\nهدفنا هو بناء بنية كهربائية آمنة، مستقرة، وقابلة للاعتماد عليها لسنوات طويلة بدون مشاكل.",
                "experience": "سنوات الخبرة",
                "experienceValue": "+12"
            })
            .to_string(),
            content_en: json!({
                "title": "About Us",
                "content": "Ases Kahraba is a professional electrical services company with hands-on experience since 2012 in electrical infrastructure, low current systems, and smart home solutions.\n\nWe believe electrical work is an engineering discipline—not guesswork. Every project is designed and executed using certified materials, proper calculations, and direct engineering supervision, fully compliant with local and international standards.\n\nOur mission is to deliver safe, reliable, and future-ready electrical systems.",
                "experience": "Years of Experience",
                "experienceValue": "12+"
            })
            .to_string(),
            image_url: None,
        },
        UpsertSiteContent {
            section_key: "contact".to_string(),
            content_ar: json!({
                "title": "تواصل معنا",
                "description": "نحن جاهزون لمناقشة مشروعك وتقديم الحل الهندسي الأنسب له.",
                "location": "19 محمد شفيق",
                "phone": "01004111999",
                "email": "info@aseskahraba.com",
                "cta": "احجز معاينة"
            })
            .to_string(),
            content_en: json!({
                "title": "Contact Us",
                "description": "Let's discuss your project and provide the right engineering solution.",
                "location": "19 Mohammed Shafeek",
                "phone": "+20 100 411 1999",
                "email": "info@aseskahraba.com",
                "cta": "Book a Visit"
            })
            .to_string(),
            image_url: None,
        },
    ]
}

/// Seed hero/about/contact when the content table is empty. Returns the number of rows written.
pub async fn seed_site_content(store: &ContentStore) -> Result<usize, StoreError> {
    if !store.is_empty().await? {
        return Ok(0);
    }

    let sections = default_sections();
    let count = sections.len();
    for section in sections {
        store.upsert_section(section).await?;
    }

    tracing::info!(sections = count, "Site content seeded successfully");
    Ok(count)
}

/// Seed the tracking-id settings when none exist.
pub async fn seed_settings(store: &SettingsStore) -> Result<usize, StoreError> {
    if !store.list().await?.is_empty() {
        return Ok(0);
    }

    let defaults = [
        UpsertSiteSetting {
            setting_key: FB_PIXEL_ID.to_string(),
            setting_value: Some(String::new()),
            description: Some("Facebook Pixel ID for tracking website events".to_string()),
        },
        UpsertSiteSetting {
            setting_key: GA_MEASUREMENT_ID.to_string(),
            setting_value: Some(DEFAULT_GA_MEASUREMENT_ID.to_string()),
            description: Some("Google Analytics Measurement ID".to_string()),
        },
    ];
    let count = defaults.len();
    for setting in defaults {
        store.upsert(setting).await?;
    }

    tracing::info!(settings = count, "Site settings seeded successfully");
    Ok(count)
}
