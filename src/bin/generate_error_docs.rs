//! Generate error code documentation from the source of truth (error enums).
//!
//! Codes, descriptions and help text come straight from the [`Diagnostic`]
//! implementations of `GridError`, `PuzzleError`, `RenderError` and
//! `SolveFailure`.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use crossfill::errors::{Diagnostic, GridError, PuzzleError, RenderError};
use crossfill::solver::SolveFailure;
use std::fmt::Write;

/// Append one section per error to `out`.
fn write_error_docs<E: Diagnostic>(out: &mut String, errors: &[E]) {
    // writing to a String never fails
    for error in errors {
        // `Error::description` is also in scope through the supertrait
        let _ = writeln!(out, "### {}: {}\n", error.code(), Diagnostic::description(error));

        if let Some(help_text) = error.help() {
            let _ = writeln!(out, "**How to fix:** {help_text}\n");
        }

        let _ = writeln!(out, "**Example error message:**");
        let _ = writeln!(out, "```");
        let _ = writeln!(out, "{error}");
        let _ = writeln!(out, "```\n");

        let _ = writeln!(out, "**Detailed format:**");
        let _ = writeln!(out, "```");
        let _ = writeln!(out, "{}", error.display_detailed());
        let _ = writeln!(out, "```\n");

        let _ = writeln!(out, "---\n");
    }
}

fn all_grid_error_variants() -> Vec<GridError> {
    vec![
        GridError::InvalidCell { row: 2, col: 4, found: 'x' },
        GridError::CoordinateOverflow { x: 2_147_483_647, y: 0, dx: 1, dy: 0 },
        GridError::TooLarge { width: 5000, height: 3, max: 4096 },
    ]
}

fn all_puzzle_error_variants() -> Vec<PuzzleError> {
    vec![
        PuzzleError::LineTooShort { line_id: 0, length: 1 },
        PuzzleError::DuplicateLine { line_id: 3 },
        PuzzleError::ForeignIntersection { line_id: 1, first_line_id: 2 },
        PuzzleError::OffsetOutOfRange { line_id: 0, offset: 5, length: 3 },
        PuzzleError::UnknownLine { line_id: 7 },
        PuzzleError::ParallelIntersection { first_line_id: 0, second_line_id: 1 },
        PuzzleError::AsymmetricIntersection { first_line_id: 0, second_line_id: 1 },
    ]
}

fn all_render_error_variants() -> Vec<RenderError> {
    vec![
        RenderError::MissingWord { line_id: 1 },
        RenderError::LengthMismatch { line_id: 0, word: "CATS".to_string(), expected: 3 },
        RenderError::ConflictingLetter { x: 1, y: 1, existing: 'A', wanted: 'O', line_id: 1 },
    ]
}

fn all_solve_failure_variants() -> Vec<SolveFailure> {
    vec![
        SolveFailure::EmptyPuzzle,
        SolveFailure::NoCandidateWords { line_id: 2, length: 5 },
        SolveFailure::Exhausted,
    ]
}

fn generate_docs() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Error Code Reference\n");
    let _ = writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    let _ = writeln!(out, "## Table of Contents\n");
    let _ = writeln!(out, "- [Grid Errors (G001–G003)](#grid-errors)");
    let _ = writeln!(out, "- [Puzzle Errors (P001–P007)](#puzzle-errors)");
    let _ = writeln!(out, "- [Render Errors (R001–R003)](#render-errors)");
    let _ = writeln!(out, "- [Solve Failures (S001–S003)](#solve-failures)\n");

    let _ = writeln!(out, "## Grid Errors\n");
    let _ = writeln!(out, "Errors from reading a grid drawing.\n");
    write_error_docs(&mut out, &all_grid_error_variants());

    let _ = writeln!(out, "## Puzzle Errors\n");
    let _ = writeln!(out, "Errors from building or validating a puzzle by hand.\n");
    write_error_docs(&mut out, &all_puzzle_error_variants());

    let _ = writeln!(out, "## Render Errors\n");
    let _ = writeln!(out, "Errors from drawing a solution onto its grid.\n");
    write_error_docs(&mut out, &all_render_error_variants());

    let _ = writeln!(out, "## Solve Failures\n");
    let _ = writeln!(out, "Reasons a solve returned no solutions. These are reported, not raised.\n");
    write_error_docs(&mut out, &all_solve_failure_variants());

    let _ = writeln!(out, "## Error Display Formats\n");
    let _ = writeln!(out, "### Simple Format");
    let _ = writeln!(out, "```\nError: <message>\n```\n");
    let _ = writeln!(out, "### Detailed Format (via `display_detailed()`)");
    let _ = writeln!(out, "```\n<message> (<code>)\n<help text if available>\n```");

    out
}

fn main() {
    print!("{}", generate_docs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented_once() {
        let docs = generate_docs();
        let codes = ["G001", "G002", "G003", "P001", "P002", "P003", "P004", "P005", "P006", "P007", "R001", "R002", "R003", "S001", "S002", "S003"];

        for code in codes {
            assert_eq!(docs.matches(&format!("### {code}:")).count(), 1, "{code} missing or repeated");
        }
        assert_eq!(docs.matches("### ").count() - 2, codes.len());
    }

    #[test]
    fn test_help_is_omitted_when_absent() {
        let mut out = String::new();
        write_error_docs(&mut out, &[PuzzleError::UnknownLine { line_id: 7 }]);

        assert!(!out.contains("How to fix"));
        assert!(out.contains("### P005: Intersection points at a missing line"));
        assert!(out.contains("Line 7 does not exist (P005)"));
    }
}
