//! Cell tags - the closed terrain set
//!
//! Ids and string tokens mirror the content tables consumed by the web host,
//! so the grid buffer can be handed to JS as raw u8s and levels can be
//! authored as token matrices.

use serde::{Deserialize, Serialize};

pub type CellId = u8;

pub const CELL_PLAYER: CellId = 0;
pub const CELL_UNKNOWN: CellId = 1;
pub const CELL_AIR: CellId = 2;
pub const CELL_BARRIER: CellId = 3;
pub const CELL_KILL: CellId = 4;
pub const CELL_ICE: CellId = 5;
pub const CELL_FINISH: CellId = 10;
pub const CELL_GRAVITY_UP: CellId = 20;
pub const CELL_GRAVITY_RIGHT: CellId = 21;
pub const CELL_GRAVITY_DOWN: CellId = 22;
pub const CELL_GRAVITY_LEFT: CellId = 23;

/// One grid cell. Carries no identity beyond its tag and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[serde(rename = "p")]
    Player = CELL_PLAYER,
    /// Fog / out-of-bounds sentinel
    #[serde(rename = "u")]
    Unknown = CELL_UNKNOWN,
    #[serde(rename = "a")]
    Air = CELL_AIR,
    #[serde(rename = "b")]
    Barrier = CELL_BARRIER,
    #[serde(rename = "k")]
    Kill = CELL_KILL,
    #[serde(rename = "i")]
    Ice = CELL_ICE,
    #[serde(rename = "f")]
    Finish = CELL_FINISH,
    #[serde(rename = "g↑")]
    GravityUp = CELL_GRAVITY_UP,
    #[serde(rename = "g→")]
    GravityRight = CELL_GRAVITY_RIGHT,
    #[serde(rename = "g↓")]
    GravityDown = CELL_GRAVITY_DOWN,
    #[serde(rename = "g←")]
    GravityLeft = CELL_GRAVITY_LEFT,
}

impl Cell {
    pub const ALL: [Cell; 11] = [
        Cell::Player,
        Cell::Unknown,
        Cell::Air,
        Cell::Barrier,
        Cell::Kill,
        Cell::Ice,
        Cell::Finish,
        Cell::GravityUp,
        Cell::GravityRight,
        Cell::GravityDown,
        Cell::GravityLeft,
    ];

    #[inline]
    pub fn id(self) -> CellId {
        self as CellId
    }

    pub fn from_id(id: CellId) -> Option<Cell> {
        Cell::ALL.iter().copied().find(|c| c.id() == id)
    }

    /// Level-authoring token, identical to the JSON snapshot form
    pub fn token(self) -> &'static str {
        match self {
            Cell::Player => "p",
            Cell::Unknown => "u",
            Cell::Air => "a",
            Cell::Barrier => "b",
            Cell::Kill => "k",
            Cell::Ice => "i",
            Cell::Finish => "f",
            Cell::GravityUp => "g↑",
            Cell::GravityRight => "g→",
            Cell::GravityDown => "g↓",
            Cell::GravityLeft => "g←",
        }
    }

    pub fn from_token(token: &str) -> Option<Cell> {
        Cell::ALL.iter().copied().find(|c| c.token() == token)
    }

    /// Does this tag let line-of-sight rays pass?
    ///
    /// Player is only ever the ray origin, which is always passable.
    pub fn is_transparent(self) -> bool {
        matches!(
            self,
            Cell::Air | Cell::Ice | Cell::Finish | Cell::Unknown | Cell::Player
        )
    }

    /// Can the player step into this cell laterally?
    ///
    /// Kill, Finish and the gravity arrows accept entry (entering is how
    /// terminal outcomes and reorientation trigger) even though they stop
    /// free fall. Barrier and Unknown never accept entry.
    pub fn is_enterable(self) -> bool {
        matches!(
            self,
            Cell::Air
                | Cell::Ice
                | Cell::Kill
                | Cell::Finish
                | Cell::GravityUp
                | Cell::GravityRight
                | Cell::GravityDown
                | Cell::GravityLeft
        )
    }

    /// Free fall passes through Air only
    #[inline]
    pub fn is_fall_through(self) -> bool {
        self == Cell::Air
    }
}
