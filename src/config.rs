//! Tuning constants for every page behaviour.
//!
//! `PageConfig::default()` reproduces the stock portfolio page. A page can
//! override any subset by passing JSON to `start_page_with_config`; absent
//! fields keep their defaults and unknown fields are rejected.

use serde::Deserialize;

use crate::error::PageResult;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Navbar gets the `scrolled` state strictly above this offset (px).
    pub scroll_threshold: f64,
    /// Viewports at or below this width use the collapsible menu (px).
    pub narrow_breakpoint: f64,
    pub parallax_speed: f64,
    /// Viewport area (px²) per particle.
    pub particle_area: f64,
    pub particle_rgb: (u8, u8, u8),
    /// Fraction of the remaining distance the cursor marker covers per frame.
    pub cursor_ease: f64,
    pub cursor_hover_scale: f64,
    pub tilt_damping: f64,
    pub tilt_lift_px: f64,
    pub tilt_perspective_px: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub progress_threshold: f64,
    pub progress_fill_delay_ms: u32,
    pub title_reveal_delay_ms: u32,
    pub counter_tick_ms: u32,
    pub anchor_offset_px: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 100.0,
            narrow_breakpoint: 968.0,
            parallax_speed: 0.5,
            particle_area: 15_000.0,
            particle_rgb: (102, 126, 234),
            cursor_ease: 0.15,
            cursor_hover_scale: 2.0,
            tilt_damping: 10.0,
            tilt_lift_px: 5.0,
            tilt_perspective_px: 1000.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -100px 0px".to_string(),
            progress_threshold: 0.5,
            progress_fill_delay_ms: 200,
            title_reveal_delay_ms: 500,
            counter_tick_ms: 16,
            anchor_offset_px: 80.0,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> PageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = PageConfig::from_json(r#"{ "scroll_threshold": 40, "particle_rgb": [1, 2, 3] }"#)
            .unwrap();
        assert_eq!(cfg.scroll_threshold, 40.0);
        assert_eq!(cfg.particle_rgb, (1, 2, 3));
        assert_eq!(cfg.narrow_breakpoint, 968.0);
        assert_eq!(cfg.reveal_root_margin, "0px 0px -100px 0px");
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PageConfig::from_json(r#"{ "scroll_treshold": 40 }"#).unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }
}
