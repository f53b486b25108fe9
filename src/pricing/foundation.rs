//! Foundation-laying estimator: area × material rate × depth multiplier.

use serde::{Deserialize, Serialize};

use super::{round_price, FormValue, Quote};

pub const CONTENT_NAME: &str = "Foundation Calculator";

/// Depth at which the multiplier is exactly 1.0, in meters.
pub const REFERENCE_DEPTH_M: f64 = 0.5;
/// Multiplier change per meter away from the reference depth.
pub const DEPTH_STEP: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundationType {
    Concrete,
    Brick,
    Block,
    /// Anything else; priced at the default rate.
    Other,
}

impl FoundationType {
    /// EGP per square meter.
    pub fn base_rate(&self) -> f64 {
        match self {
            FoundationType::Concrete => 150.0,
            FoundationType::Brick => 120.0,
            FoundationType::Block => 130.0,
            FoundationType::Other => 140.0,
        }
    }
}

impl From<&str> for FoundationType {
    fn from(value: &str) -> Self {
        match value {
            "concrete" => FoundationType::Concrete,
            "brick" => FoundationType::Brick,
            "block" => FoundationType::Block,
            _ => FoundationType::Other,
        }
    }
}

/// Not clamped: shallower than the reference depth goes below 1.0.
pub fn depth_multiplier(depth_m: f64) -> f64 {
    1.0 + (depth_m - REFERENCE_DEPTH_M) * DEPTH_STEP
}

pub fn estimate_foundation(area_m2: f64, foundation_type: FoundationType, depth_m: f64) -> i64 {
    round_price(area_m2 * foundation_type.base_rate() * depth_multiplier(depth_m))
}

/// Raw calculator form. Any missing piece prices at zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundationInput {
    #[serde(default)]
    pub area: Option<FormValue>,
    #[serde(default)]
    pub foundation_type: Option<FormValue>,
    #[serde(default)]
    pub depth: Option<FormValue>,
}

impl FoundationInput {
    pub fn estimate(&self) -> i64 {
        let area = self.area.as_ref().and_then(FormValue::positive_number);
        let kind = self.foundation_type.as_ref().and_then(FormValue::choice);
        let depth = self.depth.as_ref().and_then(FormValue::positive_number);

        match (area, kind, depth) {
            (Some(area), Some(kind), Some(depth)) => {
                estimate_foundation(area, FoundationType::from(kind.as_str()), depth)
            }
            _ => 0,
        }
    }

    pub fn quote(&self) -> Quote {
        Quote::new(self.estimate(), CONTENT_NAME)
    }
}
