//! Visual preferences
//!
//! Persisted in LocalStorage. Gameplay constants are fixed and not part of
//! the settings.

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

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Triangles used for a full circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 32,
            QualityPreset::High => 64,
        }
    }

    /// Triangles used for each rounded paddle corner
    pub fn corner_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 2,
            QualityPreset::Medium => 4,
            QualityPreset::High => 8,
        }
    }
}

/// Render preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation detail
    pub quality: QualityPreset,
    /// Soft glow around the ball
    pub ball_glow: bool,
    /// Darkened playfield edges
    pub vignette: bool,
    /// Dashed center line
    pub net: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            ball_glow: true,
            vignette: true,
            net: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset skips the overlay passes
        self.vignette = preset != QualityPreset::Low;
    }

    /// Apply a `?quality=` style query string, if it names a preset
    pub fn apply_query(&mut self, query: &str) {
        let preset = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "quality")
            .and_then(|(_, value)| QualityPreset::parse(value));

        if let Some(preset) = preset {
            log::info!("Quality override from URL: {}", preset.as_str());
            self.apply_preset(preset);
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "duel_pong_settings";

    /// Parse stored JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} store on native, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("LOW"), Some(QualityPreset::Low));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
    }

    #[test]
    fn test_low_preset_drops_vignette() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.vignette);
        assert!(settings.ball_glow);
        assert_eq!(settings.quality.circle_segments(), 16);
    }

    #[test]
    fn test_leaving_low_restores_vignette() {
        let mut settings = Settings::default();
        settings.apply_preset(QualityPreset::Low);
        settings.apply_preset(QualityPreset::High);
        assert!(settings.vignette);

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), Settings::from_preset(QualityPreset::High));
    }

    #[test]
    fn test_query_override() {
        let mut settings = Settings::default();
        settings.apply_query("?debug=1&quality=high");
        assert_eq!(settings.quality, QualityPreset::High);

        settings.apply_query("?quality=bogus");
        assert_eq!(settings.quality, QualityPreset::High);
    }

    #[test]
    fn test_json_partial_and_corrupt() {
        let settings = Settings::from_json(r#"{"ball_glow":false}"#);
        assert!(!settings.ball_glow);
        assert!(settings.net);
        assert_eq!(settings.quality, QualityPreset::Medium);

        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_json_roundtrip_keeps_preset() {
        let settings = Settings::from_preset(QualityPreset::High);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }
}
