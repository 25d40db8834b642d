// Grid Display Module - renders a GridModel as text or as coloured terminal cells
// Both paths share the same layout so mouse positions map back onto tiles

use crate::display::{
    format_column_headers, format_endpoint, format_grid_header, format_row_prefix, CELL_WIDTH,
    ROW_PREFIX_WIDTH,
};
use crate::grid::{CellDisplay, GridModel, TileState};
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Standard grid display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDisplayConfig {
    pub show_headers: bool,
    pub show_endpoints: bool,
    pub use_color: bool, // true = tile fill colours, false = glyphs only
}

impl Default for GridDisplayConfig {
    fn default() -> Self {
        Self {
            show_headers: true,
            show_endpoints: true,
            use_color: true,
        }
    }
}

impl GridDisplayConfig {
    /// Terminal (column, row) of the top-left tile
    pub fn grid_origin(&self) -> (u16, u16) {
        let header_lines = if self.show_headers { 1 } else { 0 };
        // Column header line sits between the title and the first tile row
        (ROW_PREFIX_WIDTH as u16, header_lines + 1)
    }
}

fn cell_glyph(model: &GridModel, tile: &TileState, cell: (i32, i32)) -> String {
    if cell == model.start_cell() {
        " S ".to_string()
    } else if cell == model.end_cell() {
        " E ".to_string()
    } else {
        tile.display_cell().to_string()
    }
}

/// Render the grid as plain text lines
pub fn render_lines(model: &GridModel, display_config: &GridDisplayConfig) -> Vec<String> {
    let mut lines = Vec::with_capacity(model.rows() + 4);

    if display_config.show_headers {
        lines.push(format_grid_header(
            model.cols(),
            model.rows(),
            model.tile_size(),
            (model.pixel_width(), model.pixel_height()),
            model.visited_count(),
        ));
    }

    lines.push(format_column_headers(model.cols()));

    for (row, tiles) in model.tiles().iter_rows().enumerate() {
        let mut line = format_row_prefix(row);
        for (col, tile) in tiles.iter().enumerate() {
            line.push_str(&cell_glyph(model, tile, (col as i32, row as i32)));
        }
        lines.push(line);
    }

    if display_config.show_endpoints {
        lines.push(format_endpoint(
            "start",
            model.start(),
            model.start_cell(),
            model.start_centre(),
        ));
        lines.push(format_endpoint(
            "end",
            model.end(),
            model.end_cell(),
            model.end_centre(),
        ));
    }

    lines
}

/// Render the grid as a single newline separated string
pub fn render_grid(model: &GridModel, display_config: &GridDisplayConfig) -> String {
    let mut text = render_lines(model, display_config).join("\n");
    text.push('\n');
    text
}

fn tile_color(tile: &TileState) -> Color {
    let (r, g, b) = tile.fill_rgb();
    Color::Rgb { r, g, b }
}

/// Queue the grid onto a crossterm writer starting at the current cursor line
///
/// Lines are separated with cursor moves rather than '\n' so the output is
/// correct in raw mode.
pub fn draw_grid<W: Write>(
    out: &mut W,
    model: &GridModel,
    display_config: &GridDisplayConfig,
) -> io::Result<()> {
    if !display_config.use_color {
        for line in render_lines(model, display_config) {
            queue!(out, Print(line), cursor::MoveToNextLine(1))?;
        }
        return Ok(());
    }

    if display_config.show_headers {
        queue!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(format_grid_header(
                model.cols(),
                model.rows(),
                model.tile_size(),
                (model.pixel_width(), model.pixel_height()),
                model.visited_count(),
            )),
            ResetColor,
            cursor::MoveToNextLine(1)
        )?;
    }

    queue!(
        out,
        Print(format_column_headers(model.cols())),
        cursor::MoveToNextLine(1)
    )?;

    for (row, tiles) in model.tiles().iter_rows().enumerate() {
        queue!(out, Print(format_row_prefix(row)))?;
        for (col, tile) in tiles.iter().enumerate() {
            queue!(
                out,
                SetBackgroundColor(tile_color(tile)),
                SetForegroundColor(Color::Black),
                Print(cell_glyph(model, tile, (col as i32, row as i32)))
            )?;
        }
        queue!(out, ResetColor, cursor::MoveToNextLine(1))?;
    }

    if display_config.show_endpoints {
        queue!(
            out,
            SetForegroundColor(Color::Green),
            Print(format_endpoint(
                "start",
                model.start(),
                model.start_cell(),
                model.start_centre()
            )),
            cursor::MoveToNextLine(1),
            SetForegroundColor(Color::Red),
            Print(format_endpoint(
                "end",
                model.end(),
                model.end_cell(),
                model.end_centre()
            )),
            ResetColor,
            cursor::MoveToNextLine(1)
        )?;
    }

    Ok(())
}

/// Map a terminal position back to the pixel centre of the tile drawn there
pub fn terminal_to_pixel(
    model: &GridModel,
    display_config: &GridDisplayConfig,
    column: u16,
    row: u16,
) -> Option<(i32, i32)> {
    let (origin_col, origin_row) = display_config.grid_origin();
    let col = usize::from(column.checked_sub(origin_col)?) / CELL_WIDTH;
    let row = usize::from(row.checked_sub(origin_row)?);
    if col >= model.cols() || row >= model.rows() {
        return None;
    }

    let tile = model.tile_size();
    let half = tile / 2;
    Some((col as i32 * tile + half, row as i32 * tile + half))
}
