// Common error and display types shared by the grid model and its renderers

use std::fmt;

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur around the grid model
///
/// The model itself never fails: every setter clamps its input. These
/// variants cover queries against the grid and the configuration layer.
#[derive(Debug)]
pub enum GridError {
    InvalidCoordinates {
        col: i32,
        row: i32,
        max_col: usize,
        max_row: usize,
    },
    ConfigurationError(String),
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidCoordinates {
                col,
                row,
                max_col,
                max_row,
            } => {
                write!(
                    f,
                    "Invalid coordinates ({}, {}), max is ({}, {})",
                    col, row, max_col, max_row
                )
            }
            GridError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            GridError::Io(err) => write!(f, "I/O error: {}", err),
            GridError::Parse(err) => write!(f, "Config parse error: {}", err),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Io(err) => Some(err),
            GridError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::Io(err)
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Parse(err)
    }
}

/// Trait for displaying grid cells
pub trait CellDisplay {
    /// Get the display string for this cell
    fn display_cell(&self) -> &str;

    /// Fill colour as (r, g, b)
    fn fill_rgb(&self) -> (u8, u8, u8);

    /// Check if the line passes through this cell
    fn is_visited(&self) -> bool {
        false
    }
}
