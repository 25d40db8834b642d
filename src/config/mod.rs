// Configuration module
pub mod grid_config;

pub use grid_config::{GridConfig, MAX_GRID_DIMENSION, MAX_TILE_SIZE, MIN_TILE_SIZE};
