// Grid Model - owns the grid geometry, the two endpoints and the tile map
// Every change that matters re-runs the whole traversal from scratch

use crate::config::{GridConfig, MAX_GRID_DIMENSION, MAX_TILE_SIZE, MIN_TILE_SIZE};
use crate::grid::tiles::{TileMap, TileState};
use crate::grid::traits::{GridError, GridResult};
use crate::traversal::traverse;
use log::{debug, warn};
use std::fmt;

/// Property that changed on the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    GridSize,
    TileSize,
    Start,
    End,
}

/// Observer invoked once per changed property
pub type ChangeCallback = Box<dyn Fn(Change) + Send + Sync>;

pub fn clamp_tile_size(tile_size: i32) -> i32 {
    tile_size.clamp(MIN_TILE_SIZE, MAX_TILE_SIZE)
}

/// Pixel to cell conversion. Truncating division, never rounding: the last
/// pixel of a tile still belongs to that tile.
pub fn pixel_to_cell(pixel: (i32, i32), tile_size: i32) -> (i32, i32) {
    (pixel.0 / tile_size, pixel.1 / tile_size)
}

pub struct GridModel {
    cols: usize,
    rows: usize,
    tile_size: i32,
    pixel_width: i32,
    pixel_height: i32,
    start: (i32, i32),
    end: (i32, i32),
    tiles: TileMap,
    path: Vec<(i32, i32)>,
    listeners: Vec<ChangeCallback>,
}

impl GridModel {
    pub fn new() -> Self {
        let defaults = GridConfig::default();
        let mut model = Self {
            cols: defaults.cols,
            rows: defaults.rows,
            tile_size: defaults.tile_size,
            pixel_width: 0,
            pixel_height: 0,
            start: (0, 0),
            end: (0, 0),
            tiles: TileMap::new(defaults.cols, defaults.rows),
            path: Vec::new(),
            listeners: Vec::new(),
        };
        model.update_extents();
        model.recompute();
        model
    }

    /// Build a model from a configuration, applying every clamp the setters apply
    pub fn from_config(config: &GridConfig) -> Self {
        let mut model = Self::new();
        model.set_grid_size(config.cols, config.rows);
        model.set_tile_size(config.tile_size);
        model.set_start(config.start.0, config.start.1);
        model.set_end(config.end.0, config.end.1);
        model
    }

    /// Snapshot of the current geometry and endpoints
    pub fn config(&self) -> GridConfig {
        GridConfig::new(self.cols, self.rows, self.tile_size).with_endpoints(self.start, self.end)
    }

    /// Register an observer for property changes
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: Fn(Change) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(callback));
    }

    fn notify(&self, change: Change) {
        for listener in &self.listeners {
            listener(change);
        }
    }

    fn coerce_dimension(value: usize, name: &str) -> usize {
        if value == 0 {
            warn!("Grid {} must be at least 1, using 1", name);
            1
        } else if value > MAX_GRID_DIMENSION {
            warn!(
                "Grid {} {} exceeds {}, using {}",
                name, value, MAX_GRID_DIMENSION, MAX_GRID_DIMENSION
            );
            MAX_GRID_DIMENSION
        } else {
            value
        }
    }

    /// Resize the grid in tiles. Returns true if anything changed.
    pub fn set_grid_size(&mut self, cols: usize, rows: usize) -> bool {
        let cols = Self::coerce_dimension(cols, "columns");
        let rows = Self::coerce_dimension(rows, "rows");
        if (cols, rows) == (self.cols, self.rows) {
            return false;
        }

        self.cols = cols;
        self.rows = rows;
        self.apply_geometry_change(Change::GridSize);
        true
    }

    /// Set the tile size in pixels, clamped to [8, 128]. Returns true if it changed.
    pub fn set_tile_size(&mut self, tile_size: i32) -> bool {
        let tile_size = clamp_tile_size(tile_size);
        if tile_size == self.tile_size {
            return false;
        }

        self.tile_size = tile_size;
        self.apply_geometry_change(Change::TileSize);
        true
    }

    pub fn set_start(&mut self, x: i32, y: i32) -> bool {
        let start = self.clamp_pixel((x, y));
        if start == self.start {
            return false;
        }

        self.start = start;
        self.recompute();
        self.notify(Change::Start);
        true
    }

    pub fn set_end(&mut self, x: i32, y: i32) -> bool {
        let end = self.clamp_pixel((x, y));
        if end == self.end {
            return false;
        }

        self.end = end;
        self.recompute();
        self.notify(Change::End);
        true
    }

    // Extents changed: endpoints are re-clamped before the tiles are rebuilt
    fn apply_geometry_change(&mut self, change: Change) {
        self.update_extents();

        let start = self.clamp_pixel(self.start);
        let end = self.clamp_pixel(self.end);
        let start_moved = start != self.start;
        let end_moved = end != self.end;
        self.start = start;
        self.end = end;

        self.recompute();

        self.notify(change);
        if start_moved {
            self.notify(Change::Start);
        }
        if end_moved {
            self.notify(Change::End);
        }
    }

    fn update_extents(&mut self) {
        self.pixel_width = Self::extent(self.cols, self.tile_size);
        self.pixel_height = Self::extent(self.rows, self.tile_size);
    }

    fn extent(tiles: usize, tile_size: i32) -> i32 {
        i32::try_from(tiles)
            .ok()
            .and_then(|tiles| tiles.checked_mul(tile_size))
            .unwrap_or(i32::MAX)
    }

    fn clamp_pixel(&self, (x, y): (i32, i32)) -> (i32, i32) {
        (
            x.clamp(0, (self.pixel_width - 1).max(0)),
            y.clamp(0, (self.pixel_height - 1).max(0)),
        )
    }

    /// Clear the tile map and mark every cell on the line between the endpoints
    fn recompute(&mut self) {
        self.tiles.reset(self.cols, self.rows);
        self.path = traverse(self.start_cell(), self.end_cell());
        for &(col, row) in &self.path {
            self.tiles.visit(col, row);
        }
        debug!(
            "Ray cast {:?} -> {:?}: {} tiles on a {}x{} grid",
            self.start_cell(),
            self.end_cell(),
            self.path.len(),
            self.cols,
            self.rows
        );
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn pixel_width(&self) -> i32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> i32 {
        self.pixel_height
    }

    pub fn start(&self) -> (i32, i32) {
        self.start
    }

    pub fn end(&self) -> (i32, i32) {
        self.end
    }

    pub fn start_cell(&self) -> (i32, i32) {
        pixel_to_cell(self.start, self.tile_size)
    }

    pub fn end_cell(&self) -> (i32, i32) {
        pixel_to_cell(self.end, self.tile_size)
    }

    fn cell_centre(&self, (col, row): (i32, i32)) -> (i32, i32) {
        // (cell + 0.5) * tile, rounded half up
        let half = (self.tile_size + 1) / 2;
        (
            col.saturating_mul(self.tile_size).saturating_add(half),
            row.saturating_mul(self.tile_size).saturating_add(half),
        )
    }

    /// Pixel centre of the start tile, where the connecting line begins
    pub fn start_centre(&self) -> (i32, i32) {
        self.cell_centre(self.start_cell())
    }

    pub fn end_centre(&self) -> (i32, i32) {
        self.cell_centre(self.end_cell())
    }

    pub fn start_label(&self) -> String {
        crate::display::format_cell_label(self.start_cell())
    }

    pub fn end_label(&self) -> String {
        crate::display::format_cell_label(self.end_cell())
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    /// Ordered cells of the current line, start to end
    pub fn path(&self) -> &[(i32, i32)] {
        &self.path
    }

    pub fn visited_count(&self) -> usize {
        self.tiles.visited_count()
    }

    pub fn is_visited(&self, col: i32, row: i32) -> GridResult<bool> {
        self.tiles
            .get(col, row)
            .map(|tile| tile == TileState::Visited)
            .ok_or(GridError::InvalidCoordinates {
                col,
                row,
                max_col: self.cols - 1,
                max_row: self.rows - 1,
            })
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridModel")
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("tile_size", &self.tile_size)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("visited", &self.path.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
