use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use eframe::egui::Color32;
use serde::Deserialize;

use crate::field::{ConnectionStrategy, FieldSettings};
use crate::util::parse_hex_color;

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub point_count: usize,
    pub link_threshold: f32,
    pub cursor_threshold: f32,
    pub point_radius: f32,
    pub max_speed: f32,
    pub line_width: f32,
    pub point_color: String,
    pub link_color: String,
    pub cursor_color: String,
    pub background_color: String,
    pub strategy: ConnectionStrategy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            point_count: 500,
            link_threshold: 120.0,
            cursor_threshold: 60.0,
            point_radius: 3.0,
            max_speed: 0.25,
            line_width: 1.0,
            point_color: "#ffffff".to_owned(),
            link_color: "#2d3436".to_owned(),
            cursor_color: "#ffffff".to_owned(),
            background_color: "#636e72".to_owned(),
            strategy: ConnectionStrategy::Pairwise,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackdropSettings {
    pub field: FieldSettings,
    pub background: Color32,
}

impl FieldConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("config is not valid JSON for the backdrop settings")
    }

    pub fn resolve(&self) -> Result<BackdropSettings> {
        ensure_positive("link_threshold", self.link_threshold)?;
        ensure_positive("cursor_threshold", self.cursor_threshold)?;
        ensure_positive("point_radius", self.point_radius)?;
        ensure_positive("line_width", self.line_width)?;
        ensure!(
            self.max_speed >= 0.0 && (self.max_speed * 2.0).is_finite(),
            "max_speed must be a finite, non-negative number whose velocity range fits in f32 (got {})",
            self.max_speed
        );

        let field = FieldSettings {
            point_count: self.point_count,
            link_threshold: self.link_threshold,
            cursor_threshold: self.cursor_threshold,
            point_radius: self.point_radius,
            max_speed: self.max_speed,
            line_width: self.line_width,
            point_color: parse_hex_color(&self.point_color).context("invalid point_color")?,
            link_color: parse_hex_color(&self.link_color).context("invalid link_color")?,
            cursor_color: parse_hex_color(&self.cursor_color).context("invalid cursor_color")?,
            strategy: self.strategy,
        };
        let background =
            parse_hex_color(&self.background_color).context("invalid background_color")?;

        Ok(BackdropSettings { field, background })
    }
}

fn ensure_positive(name: &str, value: f32) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "{name} must be a finite, positive number (got {value})"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_the_stock_backdrop() {
        let settings = FieldConfig::default().resolve().unwrap();
        assert_eq!(settings.field, FieldSettings::default());
        assert_eq!(settings.background, Color32::from_rgb(99, 110, 114));
    }

    #[test]
    fn json_overrides_only_the_given_fields() {
        let config =
            FieldConfig::from_json(r#"{ "point_count": 42, "strategy": "grid" }"#).unwrap();
        assert_eq!(config.point_count, 42);
        assert_eq!(config.strategy, ConnectionStrategy::Grid);
        assert_eq!(config.link_threshold, 120.0);
    }

    #[test]
    fn unknown_keys_and_bad_json_are_rejected() {
        assert!(FieldConfig::from_json(r#"{ "particles": 10 }"#).is_err());
        assert!(FieldConfig::from_json("{").is_err());
    }

    #[test]
    fn invalid_values_fail_validation() {
        let zero_threshold = FieldConfig {
            link_threshold: 0.0,
            ..FieldConfig::default()
        };
        assert!(zero_threshold.resolve().is_err());

        let negative_speed = FieldConfig {
            max_speed: -1.0,
            ..FieldConfig::default()
        };
        assert!(negative_speed.resolve().is_err());

        let bad_color = FieldConfig {
            link_color: "grey".to_owned(),
            ..FieldConfig::default()
        };
        let message = format!("{:#}", bad_color.resolve().unwrap_err());
        assert!(message.contains("link_color"));
    }

    #[test]
    fn max_speed_with_overflowing_range_is_rejected() {
        let config = FieldConfig::from_json(r#"{ "max_speed": 3.0e38 }"#).unwrap();
        let message = format!("{:#}", config.resolve().unwrap_err());
        assert!(message.contains("max_speed"));

        let largest_valid = FieldConfig {
            max_speed: f32::MAX / 2.0,
            ..FieldConfig::default()
        };
        assert!(largest_valid.resolve().is_ok());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = FieldConfig::load(Some(Path::new("/nonexistent/backdrop.json"))).unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/backdrop.json"));
    }
}
