// Display module for grid formatting and visualization
pub mod formatters;

// Re-export main functions
pub use formatters::{
    format_cell_label, format_column_headers, format_endpoint, format_grid_header,
    format_row_prefix, CELL_WIDTH, ROW_PREFIX_WIDTH,
};
