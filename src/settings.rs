//! Game settings and tunables
//!
//! Persisted as JSON: LocalStorage on the web, a file natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Grid;

/// Surface orientation presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "Landscape",
            Orientation::Portrait => "Portrait",
        }
    }

    /// Surface size in pixels (landscape 4:3, portrait 2:3)
    pub fn surface_size(&self) -> (u32, u32) {
        match self {
            Orientation::Landscape => (640, 480),
            Orientation::Portrait => (480, 720),
        }
    }

    /// Narrow viewports get the portrait arena
    pub fn for_viewport_width(width: u32) -> Self {
        if width < 768 {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Surface width in pixels
    pub surface_width: u32,
    /// Surface height in pixels
    pub surface_height: u32,
    /// Pixels per grid cell
    pub cell_size: u32,

    // === Timing ===
    pub tick_interval_ms: u32,
    pub explosion_frames: u32,
    pub explosion_interval_ms: u32,

    // === Gameplay ===
    pub input_queue_capacity: usize,
    /// Chance an AI keeps going straight when that is safe (0.0 - 1.0)
    pub ai_straight_bias: f64,
    pub ai_count: usize,
    /// Player heading picked by the AI whenever no input is queued
    pub autopilot: bool,

    // === Storage ===
    pub high_score_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_orientation(Orientation::Landscape)
    }
}

impl Settings {
    /// Most AI opponents a round supports
    pub const MAX_AI_COUNT: usize = 6;

    /// Defaults sized for an orientation preset
    pub fn from_orientation(orientation: Orientation) -> Self {
        let (surface_width, surface_height) = orientation.surface_size();
        Self {
            surface_width,
            surface_height,
            cell_size: CELL_SIZE,

            tick_interval_ms: TICK_INTERVAL_MS,
            explosion_frames: EXPLOSION_FRAMES,
            explosion_interval_ms: EXPLOSION_INTERVAL_MS,

            input_queue_capacity: INPUT_QUEUE_CAPACITY,
            ai_straight_bias: AI_STRAIGHT_BIAS,
            ai_count: AI_COUNT,
            autopilot: false,

            high_score_key: HIGH_SCORE_KEY.to_string(),
        }
    }

    /// Arena grid for the configured surface
    pub fn grid(&self) -> Grid {
        Grid::for_surface(self.surface_width, self.surface_height, self.cell_size)
    }

    /// Copy with every tunable forced into a playable range
    pub fn validated(&self) -> Self {
        let mut s = self.clone();
        s.cell_size = s.cell_size.max(1);
        let min_px = MIN_GRID_CELLS * s.cell_size;
        s.surface_width = s.surface_width.max(min_px);
        s.surface_height = s.surface_height.max(min_px);
        s.tick_interval_ms = s.tick_interval_ms.max(1);
        s.explosion_frames = s.explosion_frames.max(1);
        s.explosion_interval_ms = s.explosion_interval_ms.max(1);
        s.input_queue_capacity = s.input_queue_capacity.max(1);
        s.ai_straight_bias = if s.ai_straight_bias.is_finite() {
            s.ai_straight_bias.clamp(0.0, 1.0)
        } else {
            AI_STRAIGHT_BIAS
        };
        s.ai_count = s.ai_count.min(Self::MAX_AI_COUNT);
        if s.high_score_key.is_empty() {
            s.high_score_key = HIGH_SCORE_KEY.to_string();
        }
        s
    }

    /// Parse settings JSON; unknown fields are ignored, missing ones default
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(|s| s.validated())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "light_cycle_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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

        let Some(storage) = storage else {
            log::warn!("Settings not saved: no LocalStorage");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved: {:?}", e),
            },
            Err(e) => log::warn!("Settings not encoded: {}", e),
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let settings = Settings::default();
        assert_eq!(settings.grid(), Grid::new(32, 24));
        assert_eq!(
            Settings::from_orientation(Orientation::Portrait).grid(),
            Grid::new(24, 36)
        );
    }

    #[test]
    fn test_validated_clamps() {
        let settings = Settings {
            cell_size: 0,
            surface_width: 3,
            tick_interval_ms: 0,
            explosion_frames: 0,
            input_queue_capacity: 0,
            ai_straight_bias: 3.5,
            ai_count: 40,
            high_score_key: String::new(),
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings.cell_size, 1);
        assert_eq!(settings.surface_width, MIN_GRID_CELLS);
        assert_eq!(settings.tick_interval_ms, 1);
        assert_eq!(settings.explosion_frames, 1);
        assert_eq!(settings.input_queue_capacity, 1);
        assert_eq!(settings.ai_straight_bias, 1.0);
        assert_eq!(settings.ai_count, Settings::MAX_AI_COUNT);
        assert_eq!(settings.high_score_key, HIGH_SCORE_KEY);

        let nan = Settings {
            ai_straight_bias: f64::NAN,
            ..Settings::default()
        };
        assert_eq!(nan.validated().ai_straight_bias, AI_STRAIGHT_BIAS);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "ai_count": 4, "tick_interval_ms": 80 }"#).unwrap();
        assert_eq!(settings.ai_count, 4);
        assert_eq!(settings.tick_interval_ms, 80);
        assert_eq!(settings.explosion_frames, EXPLOSION_FRAMES);
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_orientation_presets() {
        assert_eq!(Orientation::for_viewport_width(500), Orientation::Portrait);
        assert_eq!(Orientation::for_viewport_width(1024), Orientation::Landscape);
        assert_eq!(Orientation::Portrait.as_str(), "Portrait");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(Settings::load_from(&missing), Settings::default());

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "ai_count = lots").unwrap();
        assert_eq!(Settings::load_from(&garbage), Settings::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_from_reads_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "ai_count": 99, "autopilot": true }"#).unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.ai_count, Settings::MAX_AI_COUNT);
        assert!(settings.autopilot);
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
    }
}
