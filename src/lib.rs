// Tile Ray Cast: which tiles of a grid does a straight line pass through?
// The model converts two pixel endpoints to cells and marks the supercover
// traversal between them; renderers only read the result.

pub mod config;
pub mod display;
pub mod grid;
pub mod grid_display;
pub mod raycast_config;
pub mod traversal;

// Re-export main types for convenience
pub use config::GridConfig;
pub use grid::{
    CellDisplay, Change, ChangeCallback, GridError, GridModel, GridResult, TileMap, TileState,
};
pub use grid_display::{draw_grid, render_grid, GridDisplayConfig};
pub use raycast_config::RaycastConfig;
pub use traversal::{traversal_len, traverse, Traversal};
