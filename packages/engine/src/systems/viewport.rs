//! Viewport windower
//!
//! Fixed-radius square window centered on the player, padded with Unknown
//! outside the world. Always fed the visibility-masked scene, so the script
//! only observes true tags for cells that are both in-window and currently
//! visible.

use crate::core::grid::{Grid, Position};
use crate::domain::cells::Cell;

/// Extract the (2r+1)x(2r+1) sub-grid centered on the player.
///
/// Out-of-bounds world coordinates are a normal condition near edges and
/// yield the Unknown sentinel, never an error.
pub fn window_view(scene: &Grid, player: Position, radius: usize) -> Vec<Vec<Cell>> {
    let size = 2 * radius + 1;
    let mut view = Vec::with_capacity(size);
    for i in 0..size {
        let mut row = Vec::with_capacity(size);
        for j in 0..size {
            let world_row = player.row as i64 - radius as i64 + i as i64;
            let world_col = player.col as i64 - radius as i64 + j as i64;
            row.push(scene.at(world_row, world_col).unwrap_or(Cell::Unknown));
        }
        view.push(row);
    }
    view
}
