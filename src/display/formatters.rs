// Display formatting utilities
// Each helper writes into a String so the same text feeds stdout and the terminal UI

use std::fmt::Write;

/// Width of one rendered cell in characters
pub const CELL_WIDTH: usize = 3;

/// Width of the "NN: " row prefix in characters
pub const ROW_PREFIX_WIDTH: usize = 4;

/// Coordinate label drawn next to an endpoint, e.g. "3, 7"
pub fn format_cell_label((col, row): (i32, i32)) -> String {
    format!("{}, {}", col, row)
}

/// Column headers for a grid
pub fn format_column_headers(cols: usize) -> String {
    let mut line = " ".repeat(ROW_PREFIX_WIDTH);
    for col in 0..cols {
        let _ = write!(line, "{:>2} ", col % 100);
    }
    line
}

/// Row prefix for grid rows
pub fn format_row_prefix(row: usize) -> String {
    format!("{:>2}: ", row % 100)
}

/// Grid header with geometry and endpoint positions
pub fn format_grid_header(
    cols: usize,
    rows: usize,
    tile_size: i32,
    extents: (i32, i32),
    visited: usize,
) -> String {
    format!(
        "=== TILE RAY CAST ({} x {}, tile {} px, {}x{} px) - {} tiles visited ===",
        cols, rows, tile_size, extents.0, extents.1, visited
    )
}

/// One endpoint line: label, pixel position and cell centre
pub fn format_endpoint(name: &str, pixel: (i32, i32), cell: (i32, i32), centre: (i32, i32)) -> String {
    format!(
        "{:<5} pixel ({}, {}) -> cell [{}] centre ({}, {})",
        name,
        pixel.0,
        pixel.1,
        format_cell_label(cell),
        centre.0,
        centre.1
    )
}
