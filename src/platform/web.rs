//! Browser bindings (wasm32)
//!
//! The page owns the canvas and the animation loop. It forwards keys and
//! swipes here, calls `update` once per frame and paints the returned
//! snapshot JSON.

use wasm_bindgen::prelude::*;

use super::input::{command_for_key, heading_for_swipe};
use crate::game::{Game, Snapshot};
use crate::persistence::LocalStorageStore;
use crate::settings::{Orientation, Settings};

#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Light cycle starting...");
}

/// Renderer that keeps the latest snapshot as JSON
#[derive(Default)]
struct JsonFrame {
    latest: Option<String>,
}

impl crate::game::Renderer for JsonFrame {
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        match serde_json::to_string(snapshot) {
            Ok(json) => self.latest = Some(json),
            Err(e) => log::warn!("Snapshot encode failed: {}", e),
        }
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// New game sized for the viewport; settings come from LocalStorage
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: u32) -> WebGame {
        let orientation = Orientation::for_viewport_width(viewport_width);
        let (surface_width, surface_height) = orientation.surface_size();
        let settings = Settings {
            surface_width,
            surface_height,
            ..Settings::load()
        };
        log::info!("Arena: {} {}x{}", orientation.as_str(), surface_width, surface_height);
        let seed = js_sys::Date::now() as u64;
        WebGame {
            game: Game::new(settings, Box::new(LocalStorageStore::new()), seed),
        }
    }

    pub fn start(&mut self) -> bool {
        self.game.start()
    }

    pub fn close(&mut self) {
        self.game.close();
    }

    /// Forward a `KeyboardEvent.key`; returns whether it was handled
    pub fn key(&mut self, key: &str) -> bool {
        match command_for_key(key) {
            Some(command) => self.game.handle(command),
            None => false,
        }
    }

    pub fn swipe(&mut self, dx: f32, dy: f32) -> bool {
        match heading_for_swipe(dx, dy) {
            Some(heading) => self.game.enqueue(heading),
            None => false,
        }
    }

    /// Toggle demo mode and remember the choice for the next visit
    #[wasm_bindgen(js_name = setAutopilot)]
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.game.set_autopilot(enabled);
        self.game.settings().save();
    }

    /// Advance by `dt_ms`; returns the newest snapshot JSON if anything changed
    pub fn update(&mut self, dt_ms: f64) -> Option<String> {
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) as u32 } else { 0 };
        let mut frame = JsonFrame::default();
        self.game.update(dt, &mut frame);
        frame.latest
    }

    /// Snapshot JSON of the current state
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }
}
