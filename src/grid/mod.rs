// Grid module - the tile grid model, its tile map and shared error types

pub mod model;
pub mod tiles;
pub mod traits;

// Re-export the main grid types for easy access
pub use model::{clamp_tile_size, pixel_to_cell, Change, ChangeCallback, GridModel};
pub use tiles::{TileMap, TileState};
pub use traits::{CellDisplay, GridError, GridResult};

pub use crate::config::GridConfig;
