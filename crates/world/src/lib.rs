#![warn(missing_docs)]
//! World state: block storage, generation, doors, and player interactions.

mod doors;
mod grid;
mod interaction;
mod worldgen;

pub use doors::{close_expired_doors, DOOR_AUTO_CLOSE_MS};
pub use grid::{WorldError, WorldGrid};
pub use interaction::{break_block, place_block, toggle_door};
pub use interaction::{BreakOutcome, PlaceOutcome, ToggleOutcome};
pub use worldgen::{generate_world, TREE_POSITIONS, WORLD_HALF_EXTENT};
