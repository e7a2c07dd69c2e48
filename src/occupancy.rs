//! Sparse record of which cells a user selected while drawing a grid.

use crate::errors::GridError;
use std::collections::HashMap;
use std::str::FromStr;

/// Glyph for an occupied cell in the text form of a grid.
pub const OCCUPIED_GLYPH: char = '#';
/// Glyphs accepted for an empty cell.
pub const EMPTY_GLYPHS: [char; 2] = ['.', ' '];

/// Sparse `(x, y) -> occupied` map.
///
/// A cell is *populated* once it has an entry, occupied or not; bounding-box
/// queries look at populated cells so a drawing surface can record the whole
/// area it showed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyMap {
    cells: HashMap<(i32, i32), bool>,
}

impl OccupancyMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, x: i32, y: i32, occupied: bool) {
        self.cells.insert((x, y), occupied);
    }

    /// Absent cells read as unoccupied.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.cells.get(&(x, y)).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_populated(&self, x: i32, y: i32) -> bool {
        self.cells.contains_key(&(x, y))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn min_x(&self) -> Option<i32> {
        self.cells.keys().map(|&(x, _)| x).min()
    }

    #[must_use]
    pub fn max_x(&self) -> Option<i32> {
        self.cells.keys().map(|&(x, _)| x).max()
    }

    #[must_use]
    pub fn min_y(&self) -> Option<i32> {
        self.cells.keys().map(|&(_, y)| y).min()
    }

    #[must_use]
    pub fn max_y(&self) -> Option<i32> {
        self.cells.keys().map(|&(_, y)| y).max()
    }

    /// Translate every entry by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CoordinateOverflow`] if a translated coordinate
    /// does not fit in `i32`. The map is left unchanged in that case.
    pub fn shift(&mut self, dx: i64, dy: i64) -> Result<(), GridError> {
        let moved = self
            .cells
            .iter()
            .map(|(&(x, y), &v)| {
                let nx = i64::from(x).checked_add(dx).and_then(|n| i32::try_from(n).ok());
                let ny = i64::from(y).checked_add(dy).and_then(|n| i32::try_from(n).ok());
                match (nx, ny) {
                    (Some(nx), Some(ny)) => Ok(((nx, ny), v)),
                    _ => Err(GridError::CoordinateOverflow { x, y, dx, dy }),
                }
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        self.cells = moved;
        Ok(())
    }

    /// A translated copy; see [`OccupancyMap::shift`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CoordinateOverflow`] if a translated coordinate
    /// does not fit in `i32`.
    pub fn shifted(&self, dx: i64, dy: i64) -> Result<Self, GridError> {
        let mut copy = self.clone();
        copy.shift(dx, dy)?;
        Ok(copy)
    }

    /// Coordinates of occupied cells, in no particular order.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().filter(|&(_, &v)| v).map(|(&xy, _)| xy)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }
}

impl FromStr for OccupancyMap {
    type Err = GridError;

    /// Parse rows of `#` (occupied) and `.`/space (empty). Row `r` is `y = r`,
    /// column `c` is `x = c`. Blank lines before the first and after the last
    /// drawn row are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().collect();
        let first = rows.iter().position(|r| !r.trim().is_empty());
        let last = rows.iter().rposition(|r| !r.trim().is_empty());

        let mut map = OccupancyMap::new();
        let (Some(first), Some(last)) = (first, last) else {
            return Ok(map);
        };

        for (row, text) in rows[first..=last].iter().enumerate() {
            for (col, found) in text.chars().enumerate() {
                let occupied = if found == OCCUPIED_GLYPH {
                    true
                } else if EMPTY_GLYPHS.contains(&found) {
                    false
                } else {
                    return Err(GridError::InvalidCell { row: first + row, col, found });
                };
                // grid text is never wide enough to overflow i32 in practice
                map.set(col as i32, row as i32, occupied);
            }
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_defaults_to_unoccupied() {
        let mut map = OccupancyMap::new();
        map.set(2, 3, true);
        map.set(0, 0, false);

        assert!(map.get(2, 3));
        assert!(!map.get(0, 0));
        assert!(!map.get(5, 5));
        assert!(map.is_populated(0, 0));
        assert!(!map.is_populated(5, 5));
    }

    #[test]
    fn test_bounds_cover_populated_cells() {
        let mut map = OccupancyMap::new();
        assert_eq!(map.min_x(), None);
        assert_eq!(map.max_y(), None);

        map.set(-1, 4, false);
        map.set(3, -2, true);

        assert_eq!(map.min_x(), Some(-1));
        assert_eq!(map.max_x(), Some(3));
        assert_eq!(map.min_y(), Some(-2));
        assert_eq!(map.max_y(), Some(4));
    }

    #[test]
    fn test_shift_moves_every_entry() {
        let mut map = OccupancyMap::new();
        map.set(-2, -1, true);
        map.set(0, 0, false);

        let shifted = map.shifted(2, 1).unwrap();
        assert!(shifted.get(0, 0));
        assert!(shifted.is_populated(2, 1));
        assert!(!shifted.get(2, 1));
        // the original is untouched
        assert!(map.get(-2, -1));

        map.shift(2, 1).unwrap();
        assert_eq!(map, shifted);
    }

    #[test]
    fn test_shift_past_i32_is_rejected() {
        let mut map = OccupancyMap::new();
        map.set(i32::MAX, 0, true);
        map.set(0, 0, true);

        let err = map.shift(1, 0).unwrap_err();
        assert_eq!(err, GridError::CoordinateOverflow { x: i32::MAX, y: 0, dx: 1, dy: 0 });
        // nothing moved
        assert!(map.get(i32::MAX, 0));
        assert!(map.get(0, 0));

        assert!(map.shifted(0, i64::MAX).is_err());
        assert!(map.shifted(-i64::from(i32::MAX), 0).unwrap().get(0, 0));
    }

    #[test]
    fn test_parse_grid_text() {
        let map: OccupancyMap = "\n###\n#.\n# #\n\n".parse().unwrap();

        let mut occupied: Vec<_> = map.occupied().collect();
        occupied.sort_unstable();
        assert_eq!(occupied, vec![(0, 0), (0, 1), (0, 2), (1, 0), (2, 0), (2, 2)]);
        assert_eq!(map.occupied_count(), 6);
        assert_eq!(map.max_x(), Some(2));
        assert_eq!(map.max_y(), Some(2));
        // ragged row: (2, 1) was never drawn
        assert!(!map.is_populated(2, 1));
    }

    #[test]
    fn test_parse_rejects_unknown_glyphs() {
        let err = "##\n#x".parse::<OccupancyMap>().unwrap_err();
        assert_eq!(err, GridError::InvalidCell { row: 1, col: 1, found: 'x' });
    }

    #[test]
    fn test_parse_blank_text_is_empty() {
        let map: OccupancyMap = "\n   \n".parse().unwrap();
        assert!(map.is_empty());
    }
}
