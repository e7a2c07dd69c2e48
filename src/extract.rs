//! Grid extraction: turn an occupancy map into candidate word slots.
//!
//! Rows are scanned left to right for RIGHT lines, then columns top to bottom
//! for DOWN lines. Each maximal run of occupied cells becomes a line when it
//! is at least [`MIN_LINE_LENGTH`] long; single cells are dropped silently.

use crate::occupancy::OccupancyMap;
use crate::puzzle::{Direction, MIN_LINE_LENGTH};
use log::debug;

/// A line as found on the grid, before it gets an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawLine {
    pub x: usize,
    pub y: usize,
    pub length: usize,
    pub direction: Direction,
}

impl RawLine {
    #[must_use]
    pub fn new(x: usize, y: usize, length: usize, direction: Direction) -> Self {
        Self { x, y, length, direction }
    }

    /// Grid coordinate of the cell at `offset` along the line.
    #[must_use]
    pub fn cell(&self, offset: usize) -> (usize, usize) {
        match self.direction {
            Direction::Right => (self.x + offset, self.y),
            Direction::Down => (self.x, self.y + offset),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(|offset| self.cell(offset))
    }

    /// Offset of `(x, y)` along this line, if the line covers that cell.
    #[must_use]
    pub fn offset_of(&self, x: usize, y: usize) -> Option<usize> {
        let (fixed, fixed_here, moving, start) = match self.direction {
            Direction::Right => (y, self.y, x, self.x),
            Direction::Down => (x, self.x, y, self.y),
        };

        if fixed != fixed_here || moving < start || moving >= start + self.length {
            return None;
        }
        Some(moving - start)
    }
}

/// `(start, length)` of every run of `true` at least [`MIN_LINE_LENGTH`] long.
fn runs(cells: impl IntoIterator<Item = bool>) -> Vec<(usize, usize)> {
    let mut result = vec![];
    let mut start = None;
    let mut end = 0;

    for (index, occupied) in cells.into_iter().enumerate() {
        match (occupied, start) {
            (true, None) => start = Some(index),
            (false, Some(s)) => {
                if index - s >= MIN_LINE_LENGTH {
                    result.push((s, index - s));
                }
                start = None;
            }
            _ => {}
        }
        end = index + 1;
    }

    // a run that reaches the edge of the grid
    if let Some(s) = start {
        if end - s >= MIN_LINE_LENGTH {
            result.push((s, end - s));
        }
    }

    result
}

/// Extract every line inside the `width` x `height` window starting at `(0, 0)`.
/// Cells outside the window are ignored.
#[must_use]
pub fn extract_lines(map: &OccupancyMap, width: usize, height: usize) -> Vec<RawLine> {
    // dense copy of the window; the scan visits every cell twice
    let dense: Vec<Vec<bool>> = (0..height)
        .map(|y| (0..width).map(|x| map.get(x as i32, y as i32)).collect())
        .collect();

    let mut result = vec![];

    for (y, row) in dense.iter().enumerate() {
        for (x, length) in runs(row.iter().copied()) {
            result.push(RawLine::new(x, y, length, Direction::Right));
        }
    }
    let right_count = result.len();

    for x in 0..width {
        for (y, length) in runs(dense.iter().map(|row| row[x])) {
            result.push(RawLine::new(x, y, length, Direction::Down));
        }
    }

    debug!(
        "extracted {right_count} right and {} down lines from a {width}x{height} grid",
        result.len() - right_count
    );

    result
}

/// Extract lines using the map's own extent: one past the largest populated
/// coordinate on each axis. Negative coordinates fall outside the window;
/// shift the map first if it has any.
#[must_use]
pub fn extract_lines_from_map(map: &OccupancyMap) -> Vec<RawLine> {
    let (Some(max_x), Some(max_y)) = (map.max_x(), map.max_y()) else {
        return vec![];
    };
    if max_x < 0 || max_y < 0 {
        return vec![];
    }

    extract_lines(map, max_x as usize + 1, max_y as usize + 1)
}
