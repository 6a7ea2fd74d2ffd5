//! Line-of-sight visibility
//!
//! Sampled-ray test rather than an exact grid traversal: the ray is sampled
//! at 10 points per cell of the dominant-axis difference, each sample floored
//! to a cell and checked against the transparency table. Over-sampling keeps
//! thin single-cell walls from being stepped over while giving softer
//! diagonal sightlines than DDA. The grid edge is opaque to rays.

use crate::core::grid::{Grid, Position};
use crate::domain::cells::Cell;

/// Samples per unit of dominant-axis cell difference
const SAMPLES_PER_CELL: i64 = 10;

/// Is `target` visible from `origin` within `max_distance`?
///
/// Origin is always visible from itself. The distance cutoff is Euclidean
/// and independent of obstruction. Samples landing on the origin or target
/// cell are always passable.
pub fn is_visible(grid: &Grid, origin: Position, target: Position, max_distance: f64) -> bool {
    if origin == target {
        return true;
    }

    let dr = target.row as f64 - origin.row as f64;
    let dc = target.col as f64 - origin.col as f64;
    if (dr * dr + dc * dc).sqrt() > max_distance {
        return false;
    }

    let row_span = (target.row as i64 - origin.row as i64).abs();
    let col_span = (target.col as i64 - origin.col as i64).abs();
    let steps = SAMPLES_PER_CELL * row_span.max(col_span);

    for i in 1..steps {
        let ratio = i as f64 / steps as f64;
        let row = (origin.row as f64 + dr * ratio).floor() as i64;
        let col = (origin.col as f64 + dc * ratio).floor() as i64;

        if (row == origin.row as i64 && col == origin.col as i64)
            || (row == target.row as i64 && col == target.col as i64)
        {
            continue;
        }
        match grid.at(row, col) {
            Some(cell) if cell.is_transparent() => {}
            // Opaque cell, or the sample walked off the grid
            _ => return false,
        }
    }

    true
}

/// Grid-shaped boolean mask, recomputed fresh each tick
#[derive(Debug, Clone)]
pub struct VisibilityMask {
    width: usize,
    height: usize,
    visible: Vec<bool>,
}

impl VisibilityMask {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.visible[row * self.width + col]
    }

    /// 0/1 matrix for JSON snapshots
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|r| {
                (0..self.width)
                    .map(|c| self.visible[r * self.width + c] as u8)
                    .collect()
            })
            .collect()
    }
}

/// Apply `is_visible` to every cell against the player origin
pub fn compute_visibility_mask(grid: &Grid, origin: Position, max_distance: f64) -> VisibilityMask {
    let (width, height) = (grid.width(), grid.height());
    let mut visible = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            visible.push(is_visible(grid, origin, Position::new(row, col), max_distance));
        }
    }
    VisibilityMask { width, height, visible }
}

/// Fog-of-war projection: non-visible cells become Unknown, never their true
/// tag. This is the only scene the script and the player-view renderer see.
pub fn masked_scene(grid: &Grid, mask: &VisibilityMask) -> Grid {
    let (width, height) = (grid.width(), grid.height());
    let mut cells = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            if mask.is_visible(row, col) {
                cells.push(grid.at(row as i64, col as i64).unwrap_or(Cell::Unknown));
            } else {
                cells.push(Cell::Unknown);
            }
        }
    }
    Grid::from_raw(width, height, cells)
}
