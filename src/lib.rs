//! Light Cycle - A grid arena game against AI light cycles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, actors, input buffering, AI, tick engine)
//! - `game`: Phase state machine hosting the tick and explosion timers
//! - `timer`: Owned interval timers driven by elapsed host time
//! - `platform`: Input translation and browser bindings
//! - `persistence`: Key-value score stores
//! - `settings`: Tunable configuration

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod timer;

pub use game::{Game, Renderer, Snapshot};
pub use settings::{Orientation, Settings};

/// Game configuration constants
pub mod consts {
    /// Side length of one grid cell in surface pixels
    pub const CELL_SIZE: u32 = 20;

    /// Main simulation tick interval
    pub const TICK_INTERVAL_MS: u32 = 100;

    /// Explosion animation length and pacing
    pub const EXPLOSION_FRAMES: u32 = 15;
    pub const EXPLOSION_INTERVAL_MS: u32 = 50;

    /// Pending player turns kept between ticks
    pub const INPUT_QUEUE_CAPACITY: usize = 3;

    /// Probability an AI keeps going straight when it safely can
    pub const AI_STRAIGHT_BIAS: f64 = 0.85;
    /// Number of AI opponents
    pub const AI_COUNT: usize = 2;

    /// Store key for the best score
    pub const HIGH_SCORE_KEY: &str = "lightCycleHighScore";

    /// Longest host frame accepted by one `Game::update` call (clamps stalls)
    pub const MAX_FRAME_MS: u32 = 250;
    /// Maximum timer firings per update to prevent spiral of death
    pub const MAX_FIRINGS_PER_UPDATE: u32 = 32;

    /// Smallest playable grid edge
    pub const MIN_GRID_CELLS: u32 = 8;
}
