//! Tuning constants for the canvas, overridable from local storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::NodeKind;

pub const CONFIG_STORAGE_KEY: &str = "portfolio.canvasConfig";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("local storage is not available")]
    StorageUnavailable,
    #[error("no stored canvas config")]
    Missing,
    #[error("invalid canvas config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid canvas config: {0}")]
    Invalid(&'static str),
}

/// Zoom levels for one viewport class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomLevels {
    pub mobile: f64,
    pub desktop: f64,
}

impl ZoomLevels {
    pub fn pick(&self, mobile: bool) -> f64 {
        if mobile { self.mobile } else { self.desktop }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Screen pixels a node drag must exceed on either axis before it stops being a click.
    pub drag_threshold: f64,
    /// Per-unit wheel zoom increment for pixel-mode deltas (trackpads, precise wheels).
    pub wheel_pixel_sensitivity: f64,
    /// Per-unit wheel zoom increment for line/page-mode deltas.
    pub wheel_line_sensitivity: f64,
    pub jitter_min: f64,
    pub jitter_max: f64,
    pub boot_step_ms: u32,
    pub boot_settle_ms: u32,
    pub fly_to_ms: u32,
    pub close_ms: u32,
    pub restore_flag_ms: u32,
    pub mobile_breakpoint: f64,
    pub tablet_breakpoint: f64,
    pub hero_mobile_scale: f64,
    pub hero_tablet_scale: f64,
    pub hero_height: f64,
    pub fit_padding: f64,
    pub fit_min_scale: f64,
    pub fit_max_scale: f64,
    pub tour_zoom: ZoomLevels,
    pub tour_node_height: f64,
    pub fly_to_zoom: ZoomLevels,
    pub fly_to_hub_zoom: ZoomLevels,
    pub default_width: f64,
    pub default_height: f64,
    pub hub_height: f64,
    pub bio_height: f64,
    pub project_height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 6.0,
            drag_threshold: 5.0,
            wheel_pixel_sensitivity: 0.002,
            wheel_line_sensitivity: 0.01,
            jitter_min: 40.0,
            jitter_max: 80.0,
            boot_step_ms: 600,
            boot_settle_ms: 800,
            fly_to_ms: 800,
            close_ms: 300,
            restore_flag_ms: 100,
            mobile_breakpoint: 768.0,
            tablet_breakpoint: 1280.0,
            hero_mobile_scale: 0.8,
            hero_tablet_scale: 0.9,
            hero_height: 550.0,
            fit_padding: 100.0,
            fit_min_scale: 0.45,
            fit_max_scale: 0.9,
            tour_zoom: ZoomLevels { mobile: 0.85, desktop: 1.1 },
            tour_node_height: 400.0,
            fly_to_zoom: ZoomLevels { mobile: 0.8, desktop: 1.0 },
            fly_to_hub_zoom: ZoomLevels { mobile: 0.75, desktop: 0.85 },
            default_width: 400.0,
            default_height: 400.0,
            hub_height: 500.0,
            bio_height: 600.0,
            project_height: 500.0,
        }
    }
}

impl CanvasConfig {
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Estimated rendered height for fly-to centering.
    pub fn estimated_height(&self, kind: NodeKind) -> f64 {
        match kind {
            NodeKind::ProjectHub | NodeKind::ExperienceHub => self.hub_height,
            NodeKind::Bio => self.bio_height,
            NodeKind::Project => self.project_height,
            _ => self.default_height,
        }
    }

    /// Estimated height used by the desktop fit; projects are hidden at rest so
    /// they fall back to the default.
    pub fn fit_height(&self, kind: NodeKind) -> f64 {
        match kind {
            NodeKind::Project => self.default_height,
            other => self.estimated_height(other),
        }
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(ConfigError::Invalid("scale bounds"));
        }
        if !(self.fit_min_scale <= self.fit_max_scale) {
            return Err(ConfigError::Invalid("fit scale bounds"));
        }
        if !(self.jitter_min <= self.jitter_max) {
            return Err(ConfigError::Invalid("jitter range"));
        }
        if self.drag_threshold < 0.0 {
            return Err(ConfigError::Invalid("drag threshold"));
        }
        Ok(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: CanvasConfig = serde_json::from_str(raw)?;
        cfg.validate()
    }

    /// Reads an override from local storage.
    pub fn load_stored() -> Result<Self, ConfigError> {
        let store = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(ConfigError::StorageUnavailable)?;
        let raw = store
            .get_item(CONFIG_STORAGE_KEY)
            .ok()
            .flatten()
            .ok_or(ConfigError::Missing)?;
        Self::from_json(&raw)
    }

    pub fn load_or_default() -> Self {
        match Self::load_stored() {
            Ok(cfg) => cfg,
            Err(ConfigError::Missing) => Self::default(),
            Err(err) => {
                crate::util::clog(&format!("canvas config fallback: {err}"));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = CanvasConfig::from_json(r#"{"drag_threshold": 8.0}"#).unwrap();
        assert_eq!(cfg.drag_threshold, 8.0);
        assert_eq!(cfg.max_scale, 6.0);
        assert_eq!(cfg.close_ms, 300);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = CanvasConfig::from_json(r#"{"min_scale": 3.0, "max_scale": 1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("scale bounds")));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(CanvasConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn clamp_handles_non_finite() {
        let cfg = CanvasConfig::default();
        assert_eq!(cfg.clamp_scale(f64::INFINITY), 6.0);
        assert_eq!(cfg.clamp_scale(f64::NAN), 0.1);
        assert_eq!(cfg.clamp_scale(100.0), 6.0);
    }
}
