/*!
 * Pricing Calculators
 * Fixed-rate estimators for foundation laying and finishing work.
 *
 * Every estimator is a pure function of its inputs. Incomplete form input is
 * not an error: it prices at zero, which callers read as "nothing to show yet".
 */
pub mod finishing;
pub mod foundation;

use serde::{Deserialize, Serialize};

pub use finishing::{estimate_finishing, FinishingInput, FinishingService, RoomType};
pub use foundation::{estimate_foundation, FoundationInput, FoundationType};

pub const CURRENCY: &str = "EGP";
pub const EVENT_CATEGORY: &str = "Calculator";

/// A raw form field as the browser sends it: a JSON number or the text typed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    /// Finite, strictly positive number, or `None` for blank/unparseable/out-of-range input.
    pub fn positive_number(&self) -> Option<f64> {
        let n = match self {
            FormValue::Number(n) => *n,
            FormValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (n.is_finite() && n > 0.0).then_some(n)
    }

    /// Trimmed, non-blank selector value.
    pub fn choice(&self) -> Option<String> {
        match self {
            FormValue::Number(n) => Some(n.to_string()),
            FormValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
        }
    }
}

impl From<f64> for FormValue {
    fn from(n: f64) -> Self {
        FormValue::Number(n)
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

/// Analytics record for one successful (non-zero) estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorEvent {
    pub content_name: String,
    pub content_category: String,
    pub value: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: i64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<CalculatorEvent>,
}

impl Quote {
    pub(crate) fn new(price: i64, content_name: &str) -> Self {
        let event = (price != 0).then(|| CalculatorEvent {
            content_name: content_name.to_string(),
            content_category: EVENT_CATEGORY.to_string(),
            value: price,
            currency: CURRENCY.to_string(),
        });
        Self {
            price,
            currency: CURRENCY.to_string(),
            event,
        }
    }
}

/// Round to the nearest whole currency unit.
pub(crate) fn round_price(amount: f64) -> i64 {
    amount.round() as i64
}
