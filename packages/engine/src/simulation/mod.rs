//! Session - one continuous play of a level
//!
//! Orchestration only: visibility, windowing, the single script invocation
//! and the movement resolution each live in their own module; SessionCore
//! wires them into an atomic per-tick transition.
//!
//! The externally ticked loop is: mask -> masked scene -> windowed view ->
//! script -> movement -> reorientation/terminal check.

use crate::core::error::EngineError;
use crate::core::grid::{Grid, Position};
use crate::domain::cells::Cell;
use crate::domain::levels::LevelLibrary;
use crate::systems::movement::{Command, GravityDirection};
use crate::systems::visibility::{self, VisibilityMask};
use crate::systems::viewport;

mod facade;
mod script;
mod tick;

pub use facade::Session;
pub use script::{ScriptCache, ScriptReply, ScriptRunner};

/// Window half-size and sight distance used by the original host
pub const DEFAULT_VIEW_RADIUS: usize = 3;

/// Result of one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Simulation proceeds to the next tick
    Continuing,
    /// Player reached a Finish cell
    Success,
    /// Player reached a Kill cell
    Failure,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Half-size of the square window handed to the script
    pub view_radius: usize,
    /// Euclidean sight cutoff for the visibility mask
    pub max_sight: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            view_radius: DEFAULT_VIEW_RADIUS,
            max_sight: DEFAULT_VIEW_RADIUS as f64,
        }
    }
}

/// Per-play-session state. Created when a level starts, dropped when the
/// host reloads. Owns the grid exclusively; nothing else holds a writable
/// alias during play.
pub struct SessionCore {
    grid: Grid,
    position: Position,
    gravity: GravityDirection,
    cache: ScriptCache,
    settings: SessionSettings,

    first_tick: bool,
    in_tick: bool,
    outcome: TickOutcome,
    tick_count: u64,
    last_command: Option<Command>,
    diagnostics: Vec<String>,
}

impl SessionCore {
    /// Start a session on an already validated grid
    pub fn new(grid: Grid) -> Result<Self, EngineError> {
        Self::with_settings(grid, SessionSettings::default())
    }

    pub fn with_settings(grid: Grid, settings: SessionSettings) -> Result<Self, EngineError> {
        let position = grid.find_player()?;
        Ok(Self {
            grid,
            position,
            gravity: GravityDirection::default(),
            cache: ScriptCache::Null,
            settings,
            first_tick: true,
            in_tick: false,
            outcome: TickOutcome::Continuing,
            tick_count: 0,
            last_command: None,
            diagnostics: Vec::new(),
        })
    }

    /// Start a session on a built-in level
    pub fn builtin_level(index: usize) -> Result<Self, EngineError> {
        Self::new(LevelLibrary::builtin().grid(index)?)
    }

    /// Start a session on a level from a bundle JSON
    pub fn from_bundle_json(json: &str, index: usize) -> Result<Self, EngineError> {
        Self::new(LevelLibrary::from_bundle_json(json)?.grid(index)?)
    }

    // === Accessors ===

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn gravity(&self) -> GravityDirection {
        self.gravity
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn outcome(&self) -> TickOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != TickOutcome::Continuing
    }

    /// Command accepted on the most recent tick; None before the first
    /// accepted reply.
    pub fn last_command(&self) -> Option<Command> {
        self.last_command
    }

    pub fn cache(&self) -> &ScriptCache {
        &self.cache
    }

    // === Renderer snapshots (read-only pulls, never pushes) ===

    /// Fresh visibility mask from the current grid and player position
    pub fn visibility_mask(&self) -> VisibilityMask {
        visibility::compute_visibility_mask(&self.grid, self.position, self.settings.max_sight)
    }

    /// Fog-of-war projection of the full scene
    pub fn masked_scene(&self) -> Grid {
        visibility::masked_scene(&self.grid, &self.visibility_mask())
    }

    /// The windowed, visibility-masked view the script sees this tick
    pub fn player_view(&self) -> Vec<Vec<Cell>> {
        viewport::window_view(&self.masked_scene(), self.position, self.settings.view_radius)
    }

    /// Drain pending script diagnostics for the host's errors panel
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Advance exactly one tick, invoking the script once
    pub fn tick(&mut self, runner: &mut dyn ScriptRunner) -> Result<TickOutcome, EngineError> {
        tick::tick(self, runner)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
