/*!
 * Analytics
 * Forwards calculator events once the tracker has been explicitly initialized.
 */
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::db::seed::DEFAULT_GA_MEASUREMENT_ID;
use crate::pricing::CalculatorEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub fb_pixel_id: Option<String>,
    pub ga_measurement_id: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            fb_pixel_id: None,
            ga_measurement_id: DEFAULT_GA_MEASUREMENT_ID.to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Build from stored setting values; blank values fall back to defaults.
    pub fn from_settings(fb_pixel_id: Option<String>, ga_measurement_id: Option<String>) -> Self {
        Self {
            fb_pixel_id: fb_pixel_id.filter(|id| !id.trim().is_empty()),
            ga_measurement_id: ga_measurement_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GA_MEASUREMENT_ID.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized,
    AlreadyInitialized,
}

/// Event sink. Starts uninitialized; the first `initialize` call fixes its config.
#[derive(Debug, Default)]
pub struct Analytics {
    config: OnceLock<AnalyticsConfig>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&self, config: AnalyticsConfig) -> InitOutcome {
        match self.config.set(config) {
            Ok(()) => {
                let config = self.config();
                tracing::info!(
                    ga_measurement_id = config.map(|c| c.ga_measurement_id.as_str()),
                    fb_pixel = config.is_some_and(|c| c.fb_pixel_id.is_some()),
                    "analytics initialized"
                );
                InitOutcome::Initialized
            }
            Err(_) => InitOutcome::AlreadyInitialized,
        }
    }

    pub fn config(&self) -> Option<&AnalyticsConfig> {
        self.config.get()
    }

    /// Emit the event; returns `false` (and drops it) when not initialized.
    pub fn track(&self, event: &CalculatorEvent) -> bool {
        let Some(config) = self.config.get() else {
            tracing::debug!(content_name = %event.content_name, "analytics not initialized; event dropped");
            return false;
        };

        tracing::info!(
            target: "analytics",
            event = "ViewContent",
            content_name = %event.content_name,
            content_category = %event.content_category,
            value = event.value,
            currency = %event.currency,
            fb_pixel_id = config.fb_pixel_id.as_deref().unwrap_or(""),
            "calculator event"
        );
        true
    }
}
