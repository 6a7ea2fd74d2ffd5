//! Grid - rectangular cell storage
//!
//! Row-major Vec<Cell>, dimensions fixed for the lifetime of a level. The
//! movement machine is the only writer during play and only ever relocates
//! the Player tag; terrain stays put.

use crate::core::error::EngineError;
use crate::domain::cells::Cell;

/// (row, column) of the single Player cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Construct from a rectangular literal grid
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, EngineError> {
        let height = rows.len();
        if height == 0 {
            return Err(EngineError::MalformedLevel("grid has no rows".to_string()));
        }
        let width = rows[0].len();
        if width == 0 {
            return Err(EngineError::MalformedLevel("grid rows are empty".to_string()));
        }
        let mut cells = Vec::with_capacity(width * height);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::MalformedLevel(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { width, height, cells })
    }

    pub(crate) fn from_raw(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && row < self.height as i64 && col >= 0 && col < self.width as i64
    }

    // === Cell access ===
    pub fn get(&self, pos: Position) -> Result<Cell, EngineError> {
        if pos.row >= self.height || pos.col >= self.width {
            return Err(EngineError::OutOfBounds {
                row: pos.row as i64,
                col: pos.col as i64,
            });
        }
        Ok(self.cells[self.index(pos.row, pos.col)])
    }

    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), EngineError> {
        if pos.row >= self.height || pos.col >= self.width {
            return Err(EngineError::OutOfBounds {
                row: pos.row as i64,
                col: pos.col as i64,
            });
        }
        let idx = self.index(pos.row, pos.col);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Signed probe used by ray sampling and movement checks; None when the
    /// coordinate lies outside the grid.
    #[inline]
    pub fn at(&self, row: i64, col: i64) -> Option<Cell> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(self.cells[self.index(row as usize, col as usize)])
    }

    // === Player queries ===

    /// Locate the unique Player cell, scanning row-major
    pub fn find_player(&self) -> Result<Position, EngineError> {
        for (idx, cell) in self.cells.iter().enumerate() {
            if *cell == Cell::Player {
                return Ok(Position::new(idx / self.width, idx % self.width));
            }
        }
        Err(EngineError::NoPlayerFound)
    }

    pub fn player_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Player).count()
    }

    /// Relocate the Player tag: source becomes Air, destination Player
    pub fn relocate_player(&mut self, from: Position, to: Position) -> Result<(), EngineError> {
        self.set(from, Cell::Air)?;
        self.set(to, Cell::Player)
    }

    // === Snapshots ===

    /// Token matrix for JSON snapshots
    pub fn to_tokens(&self) -> Vec<Vec<&'static str>> {
        (0..self.height)
            .map(|r| (0..self.width).map(|c| self.cells[self.index(r, c)].token()).collect())
            .collect()
    }

    /// Raw cell-id buffer for zero-copy rendering on the JS side.
    /// Cell is repr(u8), so the Vec<Cell> backing store is a valid u8 view.
    pub fn cells_ptr(&self) -> *const u8 {
        self.cells.as_ptr() as *const u8
    }

    pub fn cells_len(&self) -> usize {
        self.cells.len()
    }
}
