// Grid geometry and endpoint configuration
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
    pub tile_size: i32,
    pub start: (i32, i32), // pixel position
    pub end: (i32, i32),   // pixel position
}

pub const MIN_TILE_SIZE: i32 = 8;
pub const MAX_TILE_SIZE: i32 = 128;

/// Upper bound on columns and rows; keeps tile count and pixel extents in range
pub const MAX_GRID_DIMENSION: usize = 4096;

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 10, // Default grid size
            rows: 10,
            tile_size: 32,
            start: (0, 0),
            end: (0, 0),
        }
    }
}

impl GridConfig {
    pub fn new(cols: usize, rows: usize, tile_size: i32) -> Self {
        Self {
            cols,
            rows,
            tile_size,
            ..Self::default()
        }
    }

    pub fn with_endpoints(mut self, start: (i32, i32), end: (i32, i32)) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}
