//! Gravity-directional movement
//!
//! One per-tick algorithm, written for the Down frame and executed for every
//! gravity direction by rotating the frame so that frame-down equals the
//! active gravity. Commands stay absolute screen directions and are rotated
//! into the frame before the lateral test, so a single code path serves all
//! four orientations.

use crate::core::error::EngineError;
use crate::core::grid::{Grid, Position};
use crate::domain::cells::Cell;

/// Absolute screen-relative script command, wire values 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Right,
    Down,
    Left,
}

impl Command {
    /// Accepts exactly the four wire values; anything else is a script
    /// contract violation handled by the caller.
    pub fn from_response(response: i64) -> Option<Command> {
        match response {
            0 => Some(Command::Up),
            1 => Some(Command::Right),
            2 => Some(Command::Down),
            3 => Some(Command::Left),
            _ => None,
        }
    }

    #[inline]
    fn vector(self) -> (i64, i64) {
        match self {
            Command::Up => (-1, 0),
            Command::Right => (0, 1),
            Command::Down => (1, 0),
            Command::Left => (0, -1),
        }
    }
}

/// Direction along which unsupported players fall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityDirection {
    Up,
    Right,
    Down,
    Left,
}

impl Default for GravityDirection {
    fn default() -> Self {
        GravityDirection::Down
    }
}

/// Quarter-turn clockwise in (row, col) screen space
#[inline]
fn rotate_cw(v: (i64, i64)) -> (i64, i64) {
    (v.1, -v.0)
}

impl GravityDirection {
    pub fn from_arrow(cell: Cell) -> Option<GravityDirection> {
        match cell {
            Cell::GravityUp => Some(GravityDirection::Up),
            Cell::GravityRight => Some(GravityDirection::Right),
            Cell::GravityDown => Some(GravityDirection::Down),
            Cell::GravityLeft => Some(GravityDirection::Left),
            _ => None,
        }
    }

    /// Unit vector along the gravity axis (frame-down in world coordinates)
    #[inline]
    pub fn vector(self) -> (i64, i64) {
        match self {
            GravityDirection::Up => (-1, 0),
            GravityDirection::Right => (0, 1),
            GravityDirection::Down => (1, 0),
            GravityDirection::Left => (0, -1),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            GravityDirection::Up => "g↑",
            GravityDirection::Right => "g→",
            GravityDirection::Down => "g↓",
            GravityDirection::Left => "g←",
        }
    }

    /// Clockwise quarter turns taking screen-down to this gravity
    #[inline]
    fn quarter_turns(self) -> u32 {
        match self {
            GravityDirection::Down => 0,
            GravityDirection::Left => 1,
            GravityDirection::Up => 2,
            GravityDirection::Right => 3,
        }
    }

    fn rotate_into_world(self, mut v: (i64, i64)) -> (i64, i64) {
        for _ in 0..self.quarter_turns() {
            v = rotate_cw(v);
        }
        v
    }

    /// World direction that frame-left maps to under this gravity
    #[inline]
    pub fn frame_left(self) -> (i64, i64) {
        self.rotate_into_world((0, -1))
    }

    /// World direction that frame-right maps to under this gravity
    #[inline]
    pub fn frame_right(self) -> (i64, i64) {
        self.rotate_into_world((0, 1))
    }
}

/// How a tick changed the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// No-op tick: nothing legal to do for this command
    None,
    /// Full-run free fall along the gravity axis, length in cells
    Fall(usize),
    /// Single lateral step perpendicular to gravity
    Lateral,
}

#[derive(Debug, Clone, Copy)]
pub struct MoveResolution {
    pub kind: MoveKind,
    /// Player position after the tick
    pub position: Position,
    /// Pre-overwrite tag of the destination cell; None when nothing moved
    pub entered: Option<Cell>,
}

#[inline]
fn offset(pos: Position, v: (i64, i64), scale: i64) -> (i64, i64) {
    (pos.row as i64 + v.0 * scale, pos.col as i64 + v.1 * scale)
}

/// Length of the maximal contiguous Air run strictly along `down` from `pos`.
/// The grid edge terminates the run: edges are solid ground.
fn fall_run(grid: &Grid, pos: Position, down: (i64, i64)) -> usize {
    let mut run = 0usize;
    loop {
        let (row, col) = offset(pos, down, run as i64 + 1);
        match grid.at(row, col) {
            Some(cell) if cell.is_fall_through() => run += 1,
            _ => break,
        }
    }
    run
}

/// Resolve one tick of movement.
///
/// Fall takes precedence over the command, except that a lateral command
/// whose target is enterable and supported (diagonal cell along gravity is
/// non-Air) commits instead of the fall. No lateral step is ever applied in
/// the same tick as a fall. Walking off a ledge commits the flat step now;
/// the fall happens on the next tick.
pub fn advance(
    grid: &mut Grid,
    position: Position,
    gravity: GravityDirection,
    command: Command,
) -> Result<MoveResolution, EngineError> {
    let down = gravity.vector();

    let lateral = {
        let v = command.vector();
        if v == gravity.frame_left() || v == gravity.frame_right() {
            Some(v)
        } else {
            None
        }
    };

    let run = fall_run(grid, position, down);
    if run > 0 {
        if let Some(lat) = lateral {
            let (diag_row, diag_col) = {
                let (row, col) = offset(position, lat, 1);
                (row + down.0, col + down.1)
            };
            // Edge counts as solid support.
            let supported = !matches!(grid.at(diag_row, diag_col), Some(Cell::Air));
            if supported {
                if let Some(step) = lateral_step(grid, position, lat)? {
                    return Ok(step);
                }
            }
        }

        let (row, col) = offset(position, down, run as i64);
        let dest = Position::new(row as usize, col as usize);
        grid.relocate_player(position, dest)?;
        return Ok(MoveResolution {
            kind: MoveKind::Fall(run),
            position: dest,
            entered: Some(Cell::Air),
        });
    }

    if let Some(lat) = lateral {
        if let Some(step) = lateral_step(grid, position, lat)? {
            return Ok(step);
        }
    }

    Ok(MoveResolution {
        kind: MoveKind::None,
        position,
        entered: None,
    })
}

/// Commit a lateral step if the target cell accepts entry
fn lateral_step(
    grid: &mut Grid,
    position: Position,
    lat: (i64, i64),
) -> Result<Option<MoveResolution>, EngineError> {
    let (row, col) = offset(position, lat, 1);
    let target = match grid.at(row, col) {
        Some(cell) if cell.is_enterable() => cell,
        _ => return Ok(None),
    };
    let dest = Position::new(row as usize, col as usize);
    grid.relocate_player(position, dest)?;
    Ok(Some(MoveResolution {
        kind: MoveKind::Lateral,
        position: dest,
        entered: Some(target),
    }))
}
