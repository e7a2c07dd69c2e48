//! A puzzle together with where its lines sit on the page.
//!
//! [`Grid`] runs the whole construction pipeline: occupancy map, line
//! extraction, intersection calculation, then [`Puzzle`] assembly. Line ids
//! are positions in the extractor's output.

use crate::errors::GridError;
use crate::extract::{extract_lines, RawLine};
use crate::intersections::compute_intersections;
use crate::occupancy::OccupancyMap;
use crate::puzzle::{LineId, Puzzle};
use log::{info, warn};
use std::str::FromStr;

/// Widest or tallest drawing [`Grid::from_occupancy`] accepts.
pub const MAX_GRID_SIDE: i64 = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    puzzle: Puzzle,
    placements: Vec<RawLine>,
    cells: Vec<Vec<bool>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Build a grid from a drawing, sized to its bounding box. The map is
    /// translated so its smallest populated coordinate becomes `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TooLarge`] if the bounding box is wider or taller
    /// than [`MAX_GRID_SIDE`].
    pub fn from_occupancy(map: &OccupancyMap) -> Result<Self, GridError> {
        let (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) =
            (map.min_x(), map.max_x(), map.min_y(), map.max_y())
        else {
            return Ok(Self::with_dimensions(map, 0, 0));
        };

        // spans of i32 coordinates always fit in i64
        let width = i64::from(max_x) - i64::from(min_x) + 1;
        let height = i64::from(max_y) - i64::from(min_y) + 1;
        if width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(GridError::TooLarge { width, height, max: MAX_GRID_SIDE });
        }

        let normalized = map.shifted(-i64::from(min_x), -i64::from(min_y))?;
        Ok(Self::with_dimensions(&normalized, width as usize, height as usize))
    }

    /// Build a grid from the `width` x `height` window of `map` at `(0, 0)`.
    #[must_use]
    pub fn with_dimensions(map: &OccupancyMap, width: usize, height: usize) -> Self {
        let placements = extract_lines(map, width, height);
        let intersections = compute_intersections(&placements);

        let mut puzzle = Puzzle::new();
        for (line_id, (placement, points)) in placements.iter().zip(intersections).enumerate() {
            // extracted lines are never short and their points always start on them
            if let Err(e) = puzzle.add_line(placement.length, placement.direction, points, line_id) {
                warn!("skipping extracted line {line_id}: {e}");
            }
        }
        debug_assert!(puzzle.validate().is_ok(), "extracted puzzle must be consistent");

        let cells = (0..height)
            .map(|y| (0..width).map(|x| map.get(x as i32, y as i32)).collect())
            .collect();

        info!(
            "built {width}x{height} grid with {} lines and {} crossings",
            puzzle.len(),
            puzzle.crossing_count()
        );

        Self { puzzle, placements, cells, width, height }
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub fn into_puzzle(self) -> Puzzle {
        self.puzzle
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Where line `line_id` starts, which way it runs and how long it is.
    #[must_use]
    pub fn placement(&self, line_id: LineId) -> Option<&RawLine> {
        self.placements.get(line_id)
    }

    pub fn placements(&self) -> impl Iterator<Item = (LineId, &RawLine)> {
        self.placements.iter().enumerate()
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells.get(y).and_then(|row| row.get(x)).copied().unwrap_or(false)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_occupancy(&s.parse::<OccupancyMap>()?)
    }
}
