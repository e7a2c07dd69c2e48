//! Text rendering of grids and filled-in solutions.

use crate::errors::RenderError;
use crate::grid::Grid;
use crate::solver::Solution;

/// Shown for an occupied cell that has no letter yet.
pub const FILLER_GLYPH: char = '#';
/// Shown for a cell outside the puzzle.
pub const BLANK_GLYPH: char = ' ';

fn join_rows(rows: &[Vec<char>]) -> String {
    rows.iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

impl Grid {
    fn template_rows(&self) -> Vec<Vec<char>> {
        (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| if self.is_occupied(x, y) { FILLER_GLYPH } else { BLANK_GLYPH })
                    .collect()
            })
            .collect()
    }

    /// The empty puzzle: occupied cells as [`FILLER_GLYPH`], the rest blank.
    #[must_use]
    pub fn render_template(&self) -> String {
        join_rows(&self.template_rows())
    }

    /// Write every line's word onto the grid.
    ///
    /// Occupied cells that belong to no line keep [`FILLER_GLYPH`].
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if a line has no word, a word has the wrong
    /// length, or two words put different letters on one cell.
    pub fn render_solution(&self, solution: &Solution) -> Result<String, RenderError> {
        let mut rows = self.template_rows();
        let mut written = vec![vec![false; self.width()]; self.height()];

        for (line_id, placement) in self.placements() {
            let word = solution.get(&line_id).ok_or(RenderError::MissingWord { line_id })?;
            if word.chars().count() != placement.length {
                return Err(RenderError::LengthMismatch {
                    line_id,
                    word: word.clone(),
                    expected: placement.length,
                });
            }

            for ((x, y), wanted) in placement.cells().zip(word.chars()) {
                if written[y][x] && rows[y][x] != wanted {
                    return Err(RenderError::ConflictingLetter { x, y, existing: rows[y][x], wanted, line_id });
                }
                rows[y][x] = wanted;
                written[y][x] = true;
            }
        }

        Ok(join_rows(&rows))
    }
}
