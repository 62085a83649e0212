//! # Hit Marker Configuration
//!
//! Tunables for the overlay, loaded from TOML. Missing fields take their
//! defaults, so a file only needs the values it changes:
//!
//! ```toml
//! enabled = true
//! display_time = 1.5
//! hit_marker_color = { r = 1.0, g = 1.0, b = 1.0, a = 1.0 }
//! ```

use std::path::Path;
use std::sync::Arc;

use hitmark_core::DEFAULT_INBOX_CAPACITY;
use hitmark_ui::Color;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Configuration shared between the render loop and whoever edits settings.
pub type SharedConfig = Arc<RwLock<HitsConfig>>;

/// Hit marker tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitsConfig {
    /// Feature toggle as persisted.
    pub enabled: bool,
    /// Ring and crosshair tick color.
    pub hit_marker_color: Color,
    /// Armor-damage label color.
    pub armor_damage_color: Color,
    /// Health-damage label color.
    pub health_damage_color: Color,
    /// Seconds a marker stays fully opaque.
    pub display_time: f32,
    /// Seconds of linear fade after `display_time`.
    pub fade_out_time: f32,
    /// Draw the growing ring at the hit point.
    pub show_hit_marker: bool,
    /// Draw the armor-damage label.
    pub show_armor_damage: bool,
    /// Draw the health-damage label.
    pub show_health_damage: bool,
    /// Draw the crosshair tick at the screen center.
    pub show_cross_tick_marker: bool,
    /// Horizontal projection scale (non-1:1 display scaling).
    pub scale_x: f32,
    /// Vertical projection scale.
    pub scale_y: f32,
    /// Seconds the crosshair tick stays fully opaque.
    pub tick_display_time: f32,
    /// Seconds of crosshair tick fade.
    pub tick_fade_time: f32,
    /// Markers that may queue up between two frames before new hits are dropped.
    pub inbox_capacity: usize,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hit_marker_color: Color::HIT_MARKER,
            armor_damage_color: Color::ARMOR_DAMAGE,
            health_damage_color: Color::HEALTH_DAMAGE,
            display_time: 2.0,
            fade_out_time: 1.0,
            show_hit_marker: true,
            show_armor_damage: true,
            show_health_damage: true,
            show_cross_tick_marker: true,
            scale_x: 1.0,
            scale_y: 1.0,
            tick_display_time: 0.3,
            tick_fade_time: 1.0,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

impl HitsConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if rendering fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded hit marker config");
        Ok(config)
    }

    /// Loads `path`, falling back to defaults if it is missing or unusable.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.is_file() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default hit marker config");
            Self::default()
        })
    }

    /// Writes the configuration to `path` as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks every value the render pass does arithmetic with.
    ///
    /// Zero or negative fade times are allowed: the marker then stays opaque
    /// until it expires.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        let finite = [
            ("display_time", self.display_time),
            ("fade_out_time", self.fade_out_time),
            ("tick_display_time", self.tick_display_time),
            ("tick_fade_time", self.tick_fade_time),
            ("scale_x", self.scale_x),
            ("scale_y", self.scale_y),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid { field, reason: format!("{value} is not finite") });
            }
        }

        let colors = [
            ("hit_marker_color", self.hit_marker_color),
            ("armor_damage_color", self.armor_damage_color),
            ("health_damage_color", self.health_damage_color),
        ];
        for (field, color) in colors {
            if color.to_array().iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "color channels must be within 0..=1".into(),
                });
            }
        }

        if self.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "inbox_capacity",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Wraps the configuration for sharing across threads.
    #[must_use]
    pub fn shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HitsConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.display_time, 2.0);
        assert_eq!(config.fade_out_time, 1.0);
        assert_eq!(config.tick_display_time, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = HitsConfig::from_toml_str("enabled = true\ndisplay_time = 1.5").unwrap();
        assert!(config.enabled);
        assert_eq!(config.display_time, 1.5);
        assert_eq!(config.fade_out_time, 1.0);
        assert_eq!(config.hit_marker_color, Color::HIT_MARKER);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = HitsConfig::default();
        config.scale_x = 1.25;
        config.show_cross_tick_marker = false;
        config.armor_damage_color = Color::rgb(0.0, 0.0, 1.0);

        let text = config.to_toml_string().unwrap();
        assert_eq!(HitsConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = HitsConfig::from_toml_str("scale_y = nan").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "scale_y", .. }), "{err}");

        let err = HitsConfig::from_toml_str("inbox_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "inbox_capacity", .. }));

        let err =
            HitsConfig::from_toml_str("hit_marker_color = { r = 2.0, g = 0.0, b = 0.0, a = 1.0 }")
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "hit_marker_color", .. }));
    }

    #[test]
    fn test_negative_fade_is_allowed() {
        let config = HitsConfig::from_toml_str("fade_out_time = -1.0").unwrap();
        assert_eq!(config.fade_out_time, -1.0);
    }

    #[test]
    fn test_malformed_toml() {
        let err = HitsConfig::from_toml_str("display_time = \"long\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hits.toml");

        let mut config = HitsConfig::default();
        config.enabled = true;
        config.save(&path).unwrap();

        assert_eq!(HitsConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(HitsConfig::load(&path), Err(ConfigError::Io { .. })));
        assert_eq!(HitsConfig::load_or_default(&path), HitsConfig::default());
    }
}
