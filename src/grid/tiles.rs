// Tile map - the per-cell visited marking rebuilt on every recompute

use crate::config::MAX_GRID_DIMENSION;
use crate::grid::traits::CellDisplay;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileState {
    #[default]
    Default, // Line does not touch this tile
    Visited, // Line passes through this tile
}

impl CellDisplay for TileState {
    fn display_cell(&self) -> &str {
        match self {
            TileState::Default => " . ",
            TileState::Visited => " # ",
        }
    }

    fn fill_rgb(&self) -> (u8, u8, u8) {
        match self {
            TileState::Default => (255, 222, 173),
            TileState::Visited => (255, 99, 71),
        }
    }

    fn is_visited(&self) -> bool {
        matches!(self, TileState::Visited)
    }
}

/// Row-major tile states for a `columns x rows` grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    columns: usize,
    rows: usize,
    tiles: Vec<TileState>,
}

// Caps a side so columns * rows cannot overflow
fn bounded(dimension: usize) -> usize {
    if dimension > MAX_GRID_DIMENSION {
        warn!(
            "Tile map side {} exceeds {}, truncating",
            dimension, MAX_GRID_DIMENSION
        );
        MAX_GRID_DIMENSION
    } else {
        dimension
    }
}

impl TileMap {
    pub fn new(columns: usize, rows: usize) -> Self {
        let columns = bounded(columns);
        let rows = bounded(rows);
        Self {
            columns,
            rows,
            tiles: vec![TileState::Default; columns * rows],
        }
    }

    /// Clear every tile and resize to the given dimensions
    pub fn reset(&mut self, columns: usize, rows: usize) {
        self.columns = bounded(columns);
        self.rows = bounded(rows);
        self.tiles.clear();
        self.tiles.resize(self.columns * self.rows, TileState::Default);
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        if col >= self.columns || row >= self.rows {
            return None;
        }
        Some(row * self.columns + col)
    }

    /// Mark a tile visited. Returns false for coordinates outside the grid.
    pub fn visit(&mut self, col: i32, row: i32) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.tiles[idx] = TileState::Visited;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, col: i32, row: i32) -> Option<TileState> {
        self.index(col, row).map(|idx| self.tiles[idx])
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Iterate rows top to bottom, each a slice of `columns` tiles
    pub fn iter_rows(&self) -> impl Iterator<Item = &[TileState]> {
        // chunks() panics on zero, and an empty map has nothing to yield anyway
        self.tiles.chunks(self.columns.max(1))
    }

    pub fn visited_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_visited()).count()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
