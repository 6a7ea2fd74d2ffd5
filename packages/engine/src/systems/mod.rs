pub mod movement;
pub mod viewport;
pub mod visibility;
