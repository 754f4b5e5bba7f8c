use thiserror::Error;

/// Errors raised by the board model for malformed coordinates or shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("unexpected glyph {glyph:?} at row {row}, column {col}")]
    InvalidGlyph { glyph: char, row: usize, col: usize },
}
