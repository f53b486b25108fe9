//! Finishing estimator: area × base rate × room multiplier, plus selected line items.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{round_price, FormValue, Quote};
use crate::content::Language;

pub const CONTENT_NAME: &str = "Finishing Calculator";

/// Base installation rate, EGP per square meter.
pub const BASE_RATE_PER_M2: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    Office,
    Other,
}

impl RoomType {
    pub fn multiplier(&self) -> f64 {
        match self {
            RoomType::LivingRoom => 1.2,
            RoomType::Bedroom => 1.0,
            RoomType::Kitchen => 1.5,
            RoomType::Bathroom => 1.3,
            RoomType::Office => 1.1,
            RoomType::Other => 1.0,
        }
    }
}

impl From<&str> for RoomType {
    fn from(value: &str) -> Self {
        match value {
            "living-room" => RoomType::LivingRoom,
            "bedroom" => RoomType::Bedroom,
            "kitchen" => RoomType::Kitchen,
            "bathroom" => RoomType::Bathroom,
            "office" => RoomType::Office,
            _ => RoomType::Other,
        }
    }
}

/// Fixed-price add-ons offered by the finishing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinishingService {
    Outlets,
    Switches,
    Lighting,
    CeilingFans,
    AcOutlets,
    Internet,
    Tv,
    SmokeDetectors,
}

impl FinishingService {
    pub const ALL: [FinishingService; 8] = [
        FinishingService::Outlets,
        FinishingService::Switches,
        FinishingService::Lighting,
        FinishingService::CeilingFans,
        FinishingService::AcOutlets,
        FinishingService::Internet,
        FinishingService::Tv,
        FinishingService::SmokeDetectors,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FinishingService::Outlets => "outlets",
            FinishingService::Switches => "switches",
            FinishingService::Lighting => "lighting",
            FinishingService::CeilingFans => "ceiling-fans",
            FinishingService::AcOutlets => "ac-outlets",
            FinishingService::Internet => "internet",
            FinishingService::Tv => "tv",
            FinishingService::SmokeDetectors => "smoke-detectors",
        }
    }

    pub fn unit_price(&self) -> i64 {
        match self {
            FinishingService::Outlets => 150,
            FinishingService::Switches => 100,
            FinishingService::Lighting => 200,
            FinishingService::CeilingFans => 300,
            FinishingService::AcOutlets => 250,
            FinishingService::Internet => 180,
            FinishingService::Tv => 120,
            FinishingService::SmokeDetectors => 80,
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (FinishingService::Outlets, Language::Ar) => "مآخذ كهربائية",
            (FinishingService::Outlets, Language::En) => "Electrical outlets",
            (FinishingService::Switches, Language::Ar) => "مفاتيح إضاءة",
            (FinishingService::Switches, Language::En) => "Light switches",
            (FinishingService::Lighting, Language::Ar) => "تركيب الإضاءة",
            (FinishingService::Lighting, Language::En) => "Lighting installation",
            (FinishingService::CeilingFans, Language::Ar) => "مراوح سقف",
            (FinishingService::CeilingFans, Language::En) => "Ceiling fans",
            (FinishingService::AcOutlets, Language::Ar) => "مآخذ تكييف",
            (FinishingService::AcOutlets, Language::En) => "AC outlets",
            (FinishingService::Internet, Language::Ar) => "تمديدات الإنترنت",
            (FinishingService::Internet, Language::En) => "Internet wiring",
            (FinishingService::Tv, Language::Ar) => "تمديدات التلفزيون",
            (FinishingService::Tv, Language::En) => "TV wiring",
            (FinishingService::SmokeDetectors, Language::Ar) => "كاشفات الدخان",
            (FinishingService::SmokeDetectors, Language::En) => "Smoke detectors",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// Sum of unit prices for the distinct catalog ids in `selected`; unknown ids add nothing.
pub fn services_cost<I, S>(selected: I) -> i64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    selected
        .into_iter()
        .filter_map(|id| FinishingService::from_id(id.as_ref()))
        .collect::<HashSet<_>>()
        .into_iter()
        .map(|s| s.unit_price())
        .sum()
}

pub fn estimate_finishing<I, S>(area_m2: f64, room_type: RoomType, selected: I) -> i64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let installation = area_m2 * BASE_RATE_PER_M2 * room_type.multiplier();
    round_price(installation + services_cost(selected) as f64)
}

/// Raw calculator form. Missing area/room or an empty selection prices at zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishingInput {
    #[serde(default)]
    pub area: Option<FormValue>,
    #[serde(default)]
    pub room_type: Option<FormValue>,
    #[serde(default)]
    pub selected_services: Vec<String>,
}

impl FinishingInput {
    pub fn estimate(&self) -> i64 {
        if self.selected_services.is_empty() {
            return 0;
        }

        let area = self.area.as_ref().and_then(FormValue::positive_number);
        let room = self.room_type.as_ref().and_then(FormValue::choice);

        match (area, room) {
            (Some(area), Some(room)) => {
                estimate_finishing(area, RoomType::from(room.as_str()), &self.selected_services)
            }
            _ => 0,
        }
    }

    pub fn quote(&self) -> Quote {
        Quote::new(self.estimate(), CONTENT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(area: &str, room: &str, services: &[&str]) -> FinishingInput {
        FinishingInput {
            area: Some(area.into()),
            room_type: Some(room.into()),
            selected_services: services.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_kitchen_with_outlets_and_lighting() {
        assert_eq!(
            estimate_finishing(20.0, RoomType::Kitchen, ["outlets", "lighting"]),
            1850
        );
        assert_eq!(form("20", "kitchen", &["outlets", "lighting"]).estimate(), 1850);
    }

    #[test]
    fn test_room_multipliers() {
        assert_eq!(form("10", "living-room", &["tv"]).estimate(), 600 + 120);
        assert_eq!(form("10", "bathroom", &["tv"]).estimate(), 650 + 120);
        assert_eq!(form("10", "office", &["tv"]).estimate(), 550 + 120);
        assert_eq!(form("10", "bedroom", &["tv"]).estimate(), 500 + 120);
        assert_eq!(form("10", "garage", &["tv"]).estimate(), 500 + 120);
    }

    #[test]
    fn test_unknown_services_add_nothing() {
        assert_eq!(form("10", "bedroom", &["jacuzzi"]).estimate(), 500);
        assert_eq!(services_cost(["outlets", "solar-panels"]), 150);
    }

    #[test]
    fn test_selection_is_a_set() {
        assert_eq!(services_cost(["outlets", "outlets"]), 150);
    }

    #[test]
    fn test_full_catalog_cost() {
        let all: Vec<_> = FinishingService::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(services_cost(all), 1380);
    }

    #[test]
    fn test_incomplete_form_prices_at_zero() {
        assert_eq!(form("20", "kitchen", &[]).estimate(), 0);
        assert_eq!(form("", "kitchen", &["outlets"]).estimate(), 0);
        assert_eq!(form("20", "", &["outlets"]).estimate(), 0);
        assert_eq!(form("twenty", "kitchen", &["outlets"]).estimate(), 0);
        assert_eq!(FinishingInput::default().quote().price, 0);
    }

    #[test]
    fn test_catalog_ids_round_trip() {
        for service in FinishingService::ALL {
            assert_eq!(FinishingService::from_id(service.id()), Some(service));
            assert!(!service.label(Language::Ar).is_empty());
        }
        assert_eq!(FinishingService::from_id("Outlets"), None);
    }

    #[test]
    fn test_quote_event_name() {
        let quote = form("20", "kitchen", &["outlets", "lighting"]).quote();
        assert_eq!(quote.event.unwrap().content_name, "Finishing Calculator");
    }

    #[test]
    fn test_estimate_is_repeatable() {
        let input = form("31.7", "office", &["internet", "tv"]);
        assert_eq!(input.estimate(), input.estimate());
    }
}
