//! View configuration.

use serde::Deserialize;

/// Geometry and timing knobs of the month view.
///
/// Every field has a default, so a JSON override only needs to name what it
/// changes.
///
/// ```
/// use monatvido::ViewConfig;
///
/// let config = ViewConfig::from_json(r#"{ "scroll_epsilon": 1.0 }"#).unwrap();
/// assert_eq!(1.0, config.scroll_epsilon);
/// assert_eq!(42.0, config.week_title_height);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Vertical space kept free of week rows when sizing them, in pixels.
    pub reserved_height: f64,
    /// Height of the view type switcher above the calendar.
    pub switcher_height: f64,
    /// Height of the weekday title row.
    pub week_title_height: f64,
    /// Slack allowed when comparing scroll offsets with boundaries.
    pub scroll_epsilon: f64,
    /// Minimum spacing between two scroll evaluations, in milliseconds.
    pub throttle_wait_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            reserved_height: 100.0,
            switcher_height: 32.0,
            week_title_height: 42.0,
            scroll_epsilon: 0.5,
            throttle_wait_ms: 1,
        }
    }
}

impl ViewConfig {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Height of everything stacked above the scrolling rows.
    pub fn chrome_height(&self) -> f64 {
        self.switcher_height + self.week_title_height
    }
}
