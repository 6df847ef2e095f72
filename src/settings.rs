//! User preferences
//!
//! Persisted in LocalStorage. Only presentation choices live here; ball
//! positions are never saved.

use serde::{Deserialize, Serialize};

/// Display preferences shared by every view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    /// Fill colour for canvas balls (any CSS colour)
    pub ball_color: String,
    /// Outline colour for canvas balls
    pub ball_border_color: String,
    /// Outline width in pixels
    pub border_width: f64,

    // === HUD ===
    /// Log a frame-rate line once per second
    pub log_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_color: "red".to_string(),
            ball_border_color: "black".to_string(),
            border_width: 1.0,
            log_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bouncing_balls_settings";

    /// Keys accepted by `apply_overrides`, e.g. from `?ball_color=teal`
    pub const OVERRIDE_KEYS: [&'static str; 4] =
        ["ball_color", "ball_border_color", "border_width", "log_fps"];

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::info!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Settings from a stored JSON blob, defaults when absent or unreadable
    pub fn from_stored(json: Option<&str>) -> Self {
        match json.and_then(Self::from_json) {
            Some(settings) => {
                log::info!("Loaded stored settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Apply `key=value` overrides; returns true if anything changed
    ///
    /// Unknown keys and unparsable values are skipped.
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let before = self.clone();
        for (key, value) in pairs {
            let value = value.trim();
            match key {
                "ball_color" if !value.is_empty() => self.ball_color = value.to_string(),
                "ball_border_color" if !value.is_empty() => {
                    self.ball_border_color = value.to_string()
                }
                "border_width" => match value.parse::<f64>() {
                    Ok(width) if width.is_finite() && width >= 0.0 => self.border_width = width,
                    _ => log::warn!("Ignoring border_width={}", value),
                },
                "log_fps" => match value {
                    "1" | "true" | "on" => self.log_fps = true,
                    "0" | "false" | "off" => self.log_fps = false,
                    _ => log::warn!("Ignoring log_fps={}", value),
                },
                _ => {}
            }
        }
        *self != before
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        Self::from_stored(stored.as_deref())
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(json) = self.to_json() else {
            return;
        };
        match Self::storage().map(|s| s.set_item(Self::STORAGE_KEY, &json)) {
            Some(Ok(())) => log::info!("Settings saved"),
            _ => log::warn!("Settings not saved, LocalStorage unavailable"),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_stored(None)
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
    fn test_defaults_match_classic_look() {
        let s = Settings::default();
        assert_eq!(s.ball_color, "red");
        assert_eq!(s.ball_border_color, "black");
        assert_eq!(s.border_width, 1.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"ball_color":"teal"}"#).unwrap();
        assert_eq!(s.ball_color, "teal");
        assert_eq!(s.ball_border_color, "black");
        assert!(!s.log_fps);
    }

    #[test]
    fn test_malformed_json() {
        assert!(Settings::from_json("{not json").is_none());
        assert!(Settings::from_json(r#"{"border_width":"wide"}"#).is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings {
            log_fps: true,
            ..Default::default()
        };
        let json = s.to_json().unwrap();
        assert_eq!(Settings::from_json(&json), Some(s));
    }

    #[test]
    fn test_overrides_change_settings() {
        let mut s = Settings::default();
        let changed = s.apply_overrides([
            ("ball_color", "#00ff00"),
            ("border_width", "2.5"),
            ("log_fps", "1"),
            ("unknown", "x"),
        ]);
        assert!(changed);
        assert_eq!(s.ball_color, "#00ff00");
        assert_eq!(s.border_width, 2.5);
        assert!(s.log_fps);
        assert_eq!(s.ball_border_color, "black");
    }

    #[test]
    fn test_overrides_skip_bad_values() {
        let mut s = Settings::default();
        let changed = s.apply_overrides([
            ("border_width", "-1"),
            ("border_width", "wide"),
            ("log_fps", "maybe"),
            ("ball_color", "  "),
        ]);
        assert!(!changed);
        assert_eq!(s, Settings::default());

        // Same value again is not a change
        assert!(!s.apply_overrides([("ball_color", "red")]));
    }

    #[test]
    fn test_overrides_survive_storage_round_trip() {
        let mut s = Settings::default();
        assert!(s.apply_overrides([("ball_border_color", "navy"), ("log_fps", "true")]));

        let stored = s.to_json();
        let loaded = Settings::from_stored(stored.as_deref());
        assert_eq!(loaded, s);
        assert_eq!(loaded.ball_border_color, "navy");
    }

    #[test]
    fn test_from_stored_falls_back_to_defaults() {
        assert_eq!(Settings::from_stored(None), Settings::default());
        assert_eq!(Settings::from_stored(Some("[1,2]")), Settings::default());
        assert_eq!(Settings::load(), Settings::default());
    }
}
