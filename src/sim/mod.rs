//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only
//! - Injected randomness only
//! - Stable iteration order (player first, then AIs by index)
//! - No rendering, timer or platform dependencies

pub mod actor;
pub mod ai;
pub mod grid;
pub mod input_queue;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId};
pub use ai::{DecisionSource, choose_heading, plan_ai_headings};
pub use grid::{Grid, Heading, in_bounds, occupies};
pub use input_queue::InputQueue;
pub use state::{CrashEvent, GameSession, Phase, SpawnLayout};
pub use tick::{TickInput, advanced, resolve_player_heading, tick};
