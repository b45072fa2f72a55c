//! Scene settings and preferences
//!
//! Persisted in LocalStorage; the page query string can override any field
//! for a single visit (e.g. `?color=raw&orbit=off`).

use serde::{Deserialize, Serialize};

use crate::material::ColorPolicy;
use crate::textures::DEFAULT_TEXTURE_PATH;

/// Default tone-mapping exposure
pub const DEFAULT_EXPOSURE: f32 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Color management applied to every material
    pub color_policy: ColorPolicy,
    /// Tone-mapping exposure (only used with tone mapping)
    pub exposure: f32,
    /// Orbit controls enabled when the page opens
    pub orbit_on_start: bool,
    /// Show the controls overlay
    pub show_instructions: bool,
    /// Folder holding the ball texture maps
    pub texture_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_policy: ColorPolicy::LinearizedForPbr,
            exposure: DEFAULT_EXPOSURE,
            orbit_on_start: true,
            show_instructions: true,
            texture_path: DEFAULT_TEXTURE_PATH.to_string(),
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Apply `key=value` overrides from a query string (leading `?` optional).
    /// Unknown keys and unparseable values are ignored.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "color" => {
                    if let Some(policy) = ColorPolicy::from_str(value) {
                        self.color_policy = policy;
                    }
                }
                "exposure" => {
                    if let Ok(exposure) = value.parse::<f32>() {
                        if exposure.is_finite() && exposure > 0.0 {
                            self.exposure = exposure;
                        }
                    }
                }
                "orbit" => {
                    if let Some(on) = parse_switch(value) {
                        self.orbit_on_start = on;
                    }
                }
                "help" => {
                    if let Some(on) = parse_switch(value) {
                        self.show_instructions = on;
                    }
                }
                "textures" if !value.is_empty() => {
                    self.texture_path = value.to_string();
                }
                _ => log::debug!("Ignoring query parameter {key:?}"),
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "court_scene_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding stored settings: {e}"),
                }
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
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.color_policy, ColorPolicy::LinearizedForPbr);
        assert_eq!(settings.exposure, 1.2);
        assert!(settings.orbit_on_start);
    }

    #[test]
    fn test_query_overrides() {
        let mut settings = Settings::default();
        settings.apply_query("?color=raw&exposure=0.8&orbit=off&help=0");
        assert_eq!(settings.color_policy, ColorPolicy::Raw);
        assert_eq!(settings.exposure, 0.8);
        assert!(!settings.orbit_on_start);
        assert!(!settings.show_instructions);
    }

    #[test]
    fn test_bad_query_values_are_ignored() {
        let mut settings = Settings::default();
        settings.apply_query("color=sepia&exposure=-3&orbit=maybe&unknown=1&&");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"color_policy":"Raw"}"#).unwrap();
        assert_eq!(settings.color_policy, ColorPolicy::Raw);
        assert_eq!(settings.exposure, DEFAULT_EXPOSURE);
        assert_eq!(settings.texture_path, DEFAULT_TEXTURE_PATH);
    }
}
