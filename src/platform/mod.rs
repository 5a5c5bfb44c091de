//! Platform abstraction layer
//!
//! Translates host events (keys, swipes) into game commands. The browser
//! bindings live in `web` and are only built for wasm32.

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Command, command_for_key, heading_for_swipe};
