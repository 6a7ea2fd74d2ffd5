pub mod cells;
pub mod levels;
