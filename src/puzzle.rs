//! The puzzle data model: lines (word slots) and the crossings between them.
//!
//! A [`Puzzle`] only knows line lengths, directions and intersections. Where a
//! line sits on the page is kept separately by [`crate::grid::Grid`].

use crate::errors::PuzzleError;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a line, unique within one puzzle.
pub type LineId = usize;

/// Lines of length 1 are not word slots.
pub const MIN_LINE_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Down,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => write!(f, "down"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Character at `offset` in `word`, counting `char`s rather than bytes.
pub(crate) fn char_at(word: &str, offset: usize) -> Option<char> {
    word.chars().nth(offset)
}

/// Directional record of a crossing: the cell at `first_offset` of line
/// `first_line_id` is the cell at `second_offset` of line `second_line_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionPoint {
    pub first_line_id: LineId,
    pub second_line_id: LineId,
    pub first_offset: usize,
    pub second_offset: usize,
}

impl IntersectionPoint {
    #[must_use]
    pub fn new(first_line_id: LineId, second_line_id: LineId, first_offset: usize, second_offset: usize) -> Self {
        Self { first_line_id, second_line_id, first_offset, second_offset }
    }

    /// The same crossing seen from the other line.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            first_line_id: self.second_line_id,
            second_line_id: self.first_line_id,
            first_offset: self.second_offset,
            second_offset: self.first_offset,
        }
    }

    /// True iff both words put the same character on the shared cell.
    /// An offset past the end of a word never fits.
    #[must_use]
    pub fn words_fit(&self, first_word: &str, second_word: &str) -> bool {
        match (char_at(first_word, self.first_offset), char_at(second_word, self.second_offset)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// One word slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    length: usize,
    direction: Direction,
    intersections: Vec<IntersectionPoint>,
}

impl Line {
    #[must_use]
    pub fn new(length: usize, direction: Direction, intersections: Vec<IntersectionPoint>) -> Self {
        Self { length, direction, intersections }
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Outgoing crossings, one per crossing line.
    #[must_use]
    pub fn intersections(&self) -> &[IntersectionPoint] {
        &self.intersections
    }
}

/// Lines indexed by id. Iteration is in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Puzzle {
    lines: BTreeMap<LineId, Line>,
}

impl Puzzle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line with its outgoing intersections.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if the line is shorter than [`MIN_LINE_LENGTH`],
    /// `line_id` is taken, or an intersection does not start on this line
    /// within its length. Records pointing at other lines are checked later
    /// by [`Puzzle::validate`], since those lines may not exist yet.
    pub fn add_line(
        &mut self,
        length: usize,
        direction: Direction,
        intersections: Vec<IntersectionPoint>,
        line_id: LineId,
    ) -> Result<(), PuzzleError> {
        if length < MIN_LINE_LENGTH {
            return Err(PuzzleError::LineTooShort { line_id, length });
        }
        if self.lines.contains_key(&line_id) {
            return Err(PuzzleError::DuplicateLine { line_id });
        }
        for point in &intersections {
            if point.first_line_id != line_id {
                return Err(PuzzleError::ForeignIntersection { line_id, first_line_id: point.first_line_id });
            }
            if point.first_offset >= length {
                return Err(PuzzleError::OffsetOutOfRange { line_id, offset: point.first_offset, length });
            }
        }

        self.lines.insert(line_id, Line::new(length, direction, intersections));
        Ok(())
    }

    /// Record a crossing on both lines at once.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if either line is missing, the lines run the
    /// same way, or an offset is out of range.
    pub fn connect(&mut self, a: LineId, b: LineId, a_offset: usize, b_offset: usize) -> Result<(), PuzzleError> {
        let line_a = self.lines.get(&a).ok_or(PuzzleError::UnknownLine { line_id: a })?;
        let line_b = self.lines.get(&b).ok_or(PuzzleError::UnknownLine { line_id: b })?;

        if line_a.direction == line_b.direction {
            return Err(PuzzleError::ParallelIntersection { first_line_id: a, second_line_id: b });
        }
        if a_offset >= line_a.length {
            return Err(PuzzleError::OffsetOutOfRange { line_id: a, offset: a_offset, length: line_a.length });
        }
        if b_offset >= line_b.length {
            return Err(PuzzleError::OffsetOutOfRange { line_id: b, offset: b_offset, length: line_b.length });
        }

        let point = IntersectionPoint::new(a, b, a_offset, b_offset);
        if let Some(line) = self.lines.get_mut(&a) {
            line.intersections.push(point);
        }
        if let Some(line) = self.lines.get_mut(&b) {
            line.intersections.push(point.reversed());
        }
        Ok(())
    }

    #[must_use]
    pub fn line(&self, line_id: LineId) -> Option<&Line> {
        self.lines.get(&line_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.lines.iter().map(|(&id, line)| (id, line))
    }

    pub fn line_ids(&self) -> impl Iterator<Item = LineId> + '_ {
        self.lines.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of geometric crossings (each is stored twice, once per line).
    #[must_use]
    pub fn crossing_count(&self) -> usize {
        self.lines.values().map(|line| line.intersections.len()).sum::<usize>() / 2
    }

    /// Pairwise compatibility: false iff some intersection from `first_id` to
    /// `second_id` rejects the two words. An unknown `first_id` constrains nothing.
    #[must_use]
    pub fn words_fit(&self, first_id: LineId, first_word: &str, second_id: LineId, second_word: &str) -> bool {
        let Some(line) = self.lines.get(&first_id) else {
            return true;
        };

        line.intersections
            .iter()
            .filter(|point| point.second_line_id == second_id)
            .all(|point| point.words_fit(first_word, second_word))
    }

    /// Check every intersection against the line it points at.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found, in ascending line id order.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        for (&line_id, line) in &self.lines {
            for point in &line.intersections {
                let other_id = point.second_line_id;
                let Some(other) = self.lines.get(&other_id) else {
                    return Err(PuzzleError::UnknownLine { line_id: other_id });
                };
                if other.direction == line.direction {
                    return Err(PuzzleError::ParallelIntersection { first_line_id: line_id, second_line_id: other_id });
                }
                if point.second_offset >= other.length {
                    return Err(PuzzleError::OffsetOutOfRange {
                        line_id: other_id,
                        offset: point.second_offset,
                        length: other.length,
                    });
                }
                if !other.intersections.contains(&point.reversed()) {
                    return Err(PuzzleError::AsymmetricIntersection { first_line_id: line_id, second_line_id: other_id });
                }
            }
        }
        Ok(())
    }
}
