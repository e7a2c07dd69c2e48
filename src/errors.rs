//! Error types for grid parsing, puzzle construction and rendering.
//!
//! # Error Codes
//!
//! Every variant carries a stable code for documentation lookup:
//!
//! - G001: `InvalidCell` (Unexpected character in grid text)
//! - G002: `CoordinateOverflow` (Shift moves a cell outside the i32 range)
//! - G003: `TooLarge` (Drawing spans too many rows or columns)
//! - P001: `LineTooShort` (Line shorter than two cells)
//! - P002: `DuplicateLine` (Line id already present)
//! - P003: `ForeignIntersection` (Intersection attached to the wrong line)
//! - P004: `OffsetOutOfRange` (Intersection offset past the end of a line)
//! - P005: `UnknownLine` (Intersection points at a missing line)
//! - P006: `ParallelIntersection` (Intersection between lines of the same direction)
//! - P007: `AsymmetricIntersection` (Crossing recorded on one line only)
//! - R001: `MissingWord` (Solution has no word for a line)
//! - R002: `LengthMismatch` (Word length differs from line length)
//! - R003: `ConflictingLetter` (Two words disagree on a shared cell)
//!
//! Solver outcomes (S001-S003) live next to the solver in [`crate::solver::SolveFailure`].
//!
//! # Examples
//!
//! ```
//! use crossfill::errors::{Diagnostic, GridError};
//! use crossfill::grid::Grid;
//!
//! match "#.#\n#x#".parse::<Grid>() {
//!     Err(e) => {
//!         assert_eq!(e.code(), "G001");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! # let _ = GridError::InvalidCell { row: 0, col: 0, found: 'x' };
//! ```

use crate::puzzle::LineId;

/// Code, summary and help text shared by every error type in the crate.
pub trait Diagnostic: std::error::Error {
    /// Stable error code (e.g. "G001")
    fn code(&self) -> &'static str;

    /// Short description of the error type (for documentation)
    fn description(&self) -> &'static str;

    /// Optional suggestion for fixing the problem
    fn help(&self) -> Option<&'static str> {
        None
    }

    /// Formats the error with code and optional help text
    fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Errors raised while reading a grid drawing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Invalid grid cell '{found}' at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: char },

    #[error("Shifting cell ({x}, {y}) by ({dx}, {dy}) leaves the coordinate range")]
    CoordinateOverflow { x: i32, y: i32, dx: i64, dy: i64 },

    #[error("Drawing spans {width}x{height} cells; at most {max} per side are supported")]
    TooLarge { width: i64, height: i64, max: i64 },
}

impl Diagnostic for GridError {
    fn code(&self) -> &'static str {
        match self {
            GridError::InvalidCell { .. } => "G001",
            GridError::CoordinateOverflow { .. } => "G002",
            GridError::TooLarge { .. } => "G003",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            GridError::InvalidCell { .. } => "Unexpected character in grid text",
            GridError::CoordinateOverflow { .. } => "Shift moves a cell outside the i32 range",
            GridError::TooLarge { .. } => "Drawing spans too many rows or columns",
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            GridError::InvalidCell { .. } => {
                Some("Draw occupied cells with '#' and empty cells with '.' or a space")
            }
            GridError::CoordinateOverflow { .. } => None,
            GridError::TooLarge { .. } => Some("Keep the drawn cells close together, or crop the drawing"),
        }
    }
}

/// Errors raised while assembling a [`crate::puzzle::Puzzle`] by hand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("Line {line_id} has length {length}; lines need at least 2 cells")]
    LineTooShort { line_id: LineId, length: usize },

    #[error("Line {line_id} is already part of the puzzle")]
    DuplicateLine { line_id: LineId },

    #[error("Intersection from line {first_line_id} cannot be stored on line {line_id}")]
    ForeignIntersection { line_id: LineId, first_line_id: LineId },

    #[error("Offset {offset} is out of range for line {line_id} (length {length})")]
    OffsetOutOfRange { line_id: LineId, offset: usize, length: usize },

    #[error("Line {line_id} does not exist")]
    UnknownLine { line_id: LineId },

    #[error("Lines {first_line_id} and {second_line_id} run in the same direction and cannot cross")]
    ParallelIntersection { first_line_id: LineId, second_line_id: LineId },

    #[error("Line {first_line_id} crosses line {second_line_id}, but line {second_line_id} has no matching record")]
    AsymmetricIntersection { first_line_id: LineId, second_line_id: LineId },
}

impl Diagnostic for PuzzleError {
    fn code(&self) -> &'static str {
        match self {
            PuzzleError::LineTooShort { .. } => "P001",
            PuzzleError::DuplicateLine { .. } => "P002",
            PuzzleError::ForeignIntersection { .. } => "P003",
            PuzzleError::OffsetOutOfRange { .. } => "P004",
            PuzzleError::UnknownLine { .. } => "P005",
            PuzzleError::ParallelIntersection { .. } => "P006",
            PuzzleError::AsymmetricIntersection { .. } => "P007",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            PuzzleError::LineTooShort { .. } => "Line shorter than two cells",
            PuzzleError::DuplicateLine { .. } => "Line id already present",
            PuzzleError::ForeignIntersection { .. } => "Intersection attached to the wrong line",
            PuzzleError::OffsetOutOfRange { .. } => "Intersection offset past the end of a line",
            PuzzleError::UnknownLine { .. } => "Intersection points at a missing line",
            PuzzleError::ParallelIntersection { .. } => "Intersection between lines of the same direction",
            PuzzleError::AsymmetricIntersection { .. } => "Crossing recorded on one line only",
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            PuzzleError::LineTooShort { .. } => Some("A single cell is not a word slot; give the line a length of 2 or more"),
            PuzzleError::DuplicateLine { .. } => Some("Pick an unused id for each line"),
            PuzzleError::OffsetOutOfRange { .. } => Some("Offsets are 0-based and must be smaller than the line length"),
            PuzzleError::AsymmetricIntersection { .. } => Some("Use Puzzle::connect to record a crossing on both lines at once"),
            _ => None,
        }
    }
}

/// Errors raised while drawing a solution onto its grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Solution has no word for line {line_id}")]
    MissingWord { line_id: LineId },

    #[error("Word \"{word}\" does not fit line {line_id} (expected {expected} letters)")]
    LengthMismatch { line_id: LineId, word: String, expected: usize },

    #[error("Cell ({x}, {y}) holds '{existing}' but line {line_id} wants '{wanted}'")]
    ConflictingLetter { x: usize, y: usize, existing: char, wanted: char, line_id: LineId },
}

impl Diagnostic for RenderError {
    fn code(&self) -> &'static str {
        match self {
            RenderError::MissingWord { .. } => "R001",
            RenderError::LengthMismatch { .. } => "R002",
            RenderError::ConflictingLetter { .. } => "R003",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            RenderError::MissingWord { .. } => "Solution has no word for a line",
            RenderError::LengthMismatch { .. } => "Word length differs from line length",
            RenderError::ConflictingLetter { .. } => "Two words disagree on a shared cell",
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            RenderError::MissingWord { .. } => Some("Render only solutions produced for this grid's puzzle"),
            RenderError::ConflictingLetter { .. } => Some("The solution does not satisfy the grid's intersections"),
            RenderError::LengthMismatch { .. } => None,
        }
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_codes() -> Vec<&'static str> {
        let grid = [
            GridError::InvalidCell { row: 0, col: 0, found: '?' },
            GridError::CoordinateOverflow { x: i32::MAX, y: 0, dx: 1, dy: 0 },
            GridError::TooLarge { width: 5000, height: 1, max: 4096 },
        ];
        let puzzle = [
            PuzzleError::LineTooShort { line_id: 0, length: 1 },
            PuzzleError::DuplicateLine { line_id: 0 },
            PuzzleError::ForeignIntersection { line_id: 0, first_line_id: 1 },
            PuzzleError::OffsetOutOfRange { line_id: 0, offset: 4, length: 3 },
            PuzzleError::UnknownLine { line_id: 9 },
            PuzzleError::ParallelIntersection { first_line_id: 0, second_line_id: 1 },
            PuzzleError::AsymmetricIntersection { first_line_id: 0, second_line_id: 1 },
        ];
        let render = [
            RenderError::MissingWord { line_id: 0 },
            RenderError::LengthMismatch { line_id: 0, word: "ab".to_string(), expected: 3 },
            RenderError::ConflictingLetter { x: 0, y: 0, existing: 'a', wanted: 'b', line_id: 1 },
        ];

        grid.iter().map(Diagnostic::code)
            .chain(puzzle.iter().map(Diagnostic::code))
            .chain(render.iter().map(Diagnostic::code))
            .collect()
    }

    #[test]
    fn test_error_codes_are_unique() {
        let codes = all_codes();
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "duplicate error code in {codes:?}");
    }

    #[test]
    fn test_error_code_format() {
        for code in all_codes() {
            assert_eq!(code.len(), 4, "Error code '{code}' should be 4 characters");
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{code}' should end with a number");
        }
    }

    #[test]
    fn test_display_detailed_includes_code_and_help() {
        let err = GridError::InvalidCell { row: 1, col: 2, found: 'x' };
        let detailed = err.display_detailed();

        assert!(detailed.contains("G001"));
        assert!(detailed.contains(&err.to_string()));
        assert!(detailed.contains("'#'"));
    }

    #[test]
    fn test_display_detailed_without_help() {
        let err = PuzzleError::UnknownLine { line_id: 7 };
        assert_eq!(err.display_detailed(), "Line 7 does not exist (P005)");
    }

    #[test]
    fn test_messages_include_values() {
        let err = PuzzleError::OffsetOutOfRange { line_id: 2, offset: 5, length: 3 };
        let msg = err.to_string();
        assert!(msg.contains('2') && msg.contains('5') && msg.contains('3'));
    }
}
