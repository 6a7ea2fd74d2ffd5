//! GraviGrid Engine - scripted gravity-puzzle simulation in WASM
//!
//! One controllable player per level, moved by a host-supplied behavior
//! function under switchable four-directional gravity.
//!
//! Architecture:
//! - core/       - Grid storage and error taxonomy
//! - domain/     - Cell tags and level bundles
//! - systems/    - Visibility, viewport windowing, gravity movement
//! - simulation/ - Session orchestration and the WASM facade

pub mod core;
pub mod domain;
pub mod simulation;
pub mod systems;

// Compatibility re-exports (keeps host-facing paths short)
pub use crate::core::error::EngineError;
pub use crate::core::grid::{Grid, Position};
pub use domain::cells::{self, Cell};
pub use domain::levels::LevelLibrary;
pub use systems::movement::{Command, GravityDirection};
pub use systems::viewport;
pub use systems::visibility;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 GraviGrid WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use simulation::{Session, SessionCore, TickOutcome};

// Export cell id constants for JS
#[wasm_bindgen]
pub fn cell_player() -> u8 { cells::CELL_PLAYER }
#[wasm_bindgen]
pub fn cell_unknown() -> u8 { cells::CELL_UNKNOWN }
#[wasm_bindgen]
pub fn cell_air() -> u8 { cells::CELL_AIR }
#[wasm_bindgen]
pub fn cell_barrier() -> u8 { cells::CELL_BARRIER }
#[wasm_bindgen]
pub fn cell_kill() -> u8 { cells::CELL_KILL }
#[wasm_bindgen]
pub fn cell_ice() -> u8 { cells::CELL_ICE }
#[wasm_bindgen]
pub fn cell_finish() -> u8 { cells::CELL_FINISH }
#[wasm_bindgen]
pub fn cell_gravity_up() -> u8 { cells::CELL_GRAVITY_UP }
#[wasm_bindgen]
pub fn cell_gravity_right() -> u8 { cells::CELL_GRAVITY_RIGHT }
#[wasm_bindgen]
pub fn cell_gravity_down() -> u8 { cells::CELL_GRAVITY_DOWN }
#[wasm_bindgen]
pub fn cell_gravity_left() -> u8 { cells::CELL_GRAVITY_LEFT }
