use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::routes::blog::published_slugs;
use crate::state::AppState;

/// Crawlers explicitly welcomed alongside the wildcard rule.
const ALLOWED_AGENTS: &[&str] = &[
    "GPTBot",
    "ChatGPT-User",
    "Google-Extended",
    "Claude-Web",
    "Anthropic-AI",
    "Bingbot",
    "Googlebot",
];

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn w3c_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

fn robots_body(site_url: &str) -> String {
    let mut body = format!("User-agent: *\nAllow: /\n\nSitemap: {site_url}/sitemap.xml\n");
    for agent in ALLOWED_AGENTS {
        body.push_str(&format!("\nUser-agent: {agent}\nAllow: /\n"));
    }
    body
}

fn sitemap_body(site_url: &str, today: &DateTime<Utc>, posts: &[(String, DateTime<Utc>)]) -> String {
    let home = format!("{site_url}/");
    let mut urls = format!(
        "  <url>\n\
         \x20   <loc>{loc}</loc>\n\
         \x20   <lastmod>{lastmod}</lastmod>\n\
         \x20   <changefreq>weekly</changefreq>\n\
         \x20   <priority>1.0</priority>\n\
         \x20   <xhtml:link rel=\"alternate\" hreflang=\"ar\" href=\"{ar}\"/>\n\
         \x20   <xhtml:link rel=\"alternate\" hreflang=\"en\" href=\"{en}\"/>\n\
         \x20 </url>\n",
        loc = escape_xml(&home),
        lastmod = w3c_date(today),
        ar = escape_xml(&format!("{home}?lang=ar")),
        en = escape_xml(&format!("{home}?lang=en")),
    );

    for (slug, created_at) in posts {
        urls.push_str(&format!(
            "  <url>\n\
             \x20   <loc>{}</loc>\n\
             \x20   <lastmod>{}</lastmod>\n\
             \x20   <changefreq>monthly</changefreq>\n\
             \x20   <priority>0.7</priority>\n\
             \x20 </url>\n",
            escape_xml(&format!("{site_url}/blog/{slug}")),
            w3c_date(created_at),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"\n\
         \x20       xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n\
         {urls}</urlset>\n"
    )
}

/// GET /robots.txt
pub async fn robots_txt(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_body(&state.config.site_url),
    )
        .into_response()
}

/// GET /sitemap.xml
pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let posts = match state.pool() {
        Some(pool) => published_slugs(pool).await.unwrap_or_else(|e| {
            tracing::error!("Failed to load blog posts for sitemap: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        sitemap_body(&state.config.site_url, &Utc::now(), &posts),
    )
        .into_response()
}
