//! Presentation preferences
//!
//! None of these affect the simulation; they only change what gets drawn.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.0,
        }
    }

    /// Whether to render the star field
    pub fn starfield_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }

    /// Whether to render glow halos behind sprites
    pub fn glow_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => false,
            QualityPreset::High => true,
        }
    }

    /// Segments used for round shapes (cockpits)
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 12,
            QualityPreset::High => 20,
        }
    }
}

/// Visual preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Player and enemy trails
    pub trails: bool,
    /// Drifting star field
    pub starfield: bool,
    /// Canvas shake at high difficulty
    pub screen_shake: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            trails: true,
            starfield: true,
            screen_shake: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.starfield = preset.starfield_enabled();
    }

    /// Read overrides from a URL query string such as `?quality=low&shake=off`
    ///
    /// Unknown keys and unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "quality" => match QualityPreset::from_str(value) {
                    Some(preset) => settings.apply_preset(preset),
                    None => log::warn!("Unknown quality preset '{}'", value),
                },
                "trails" => settings.trails = parse_flag(value).unwrap_or(settings.trails),
                "stars" => settings.starfield = parse_flag(value).unwrap_or(settings.starfield),
                "shake" => {
                    settings.screen_shake = parse_flag(value).unwrap_or(settings.screen_shake)
                }
                _ => {}
            }
        }
        settings
    }

    /// Number of trail points to draw out of `available`
    pub fn visible_trail_points(&self, available: usize) -> usize {
        if !self.trails {
            return 0;
        }
        (available as f32 * self.quality.trail_quality()).round() as usize
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_round_trip_names() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_low_preset_disables_starfield() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.starfield);
        assert_eq!(settings.visible_trail_points(10), 5);
    }

    #[test]
    fn test_query_overrides() {
        let settings = Settings::from_query("?quality=high&trails=off&shake=0&bogus=1");
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(!settings.trails);
        assert!(!settings.screen_shake);
        assert!(settings.starfield);
        assert_eq!(settings.visible_trail_points(10), 0);
    }

    #[test]
    fn test_empty_query_is_default() {
        let settings = Settings::from_query("");
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.trails && settings.starfield && settings.screen_shake);
    }
}
