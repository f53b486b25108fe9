/**
 * Calculator Routes
 * Foundation and finishing price estimates
 */
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::pricing::{FinishingInput, FinishingService, FoundationInput, Quote};
use crate::routes::content::parse_language;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ServicesQuery {
    pub lang: Option<String>,
}

/// One finishing catalog entry
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceOption {
    pub id: String,
    pub label: String,
    pub price: i64,
}

fn track(state: &AppState, quote: &Quote) {
    if let Some(event) = &quote.event {
        state.analytics.track(event);
    }
}

/// POST /api/calculator/foundation
pub async fn foundation_quote(
    State(state): State<AppState>,
    Json(input): Json<FoundationInput>,
) -> Json<Quote> {
    let quote = input.quote();
    track(&state, &quote);
    Json(quote)
}

/// POST /api/calculator/finishing
pub async fn finishing_quote(
    State(state): State<AppState>,
    Json(input): Json<FinishingInput>,
) -> Json<Quote> {
    let quote = input.quote();
    track(&state, &quote);
    Json(quote)
}

/// GET /api/calculator/finishing/services?lang=
pub async fn finishing_services(
    Query(query): Query<ServicesQuery>,
) -> Result<Json<Vec<ServiceOption>>, ApiError> {
    let language = parse_language(query.lang.as_deref())?;

    let services = FinishingService::ALL
        .iter()
        .map(|s| ServiceOption {
            id: s.id().to_string(),
            label: s.label(language).to_string(),
            price: s.unit_price(),
        })
        .collect();

    Ok(Json(services))
}
