//! Intersection calculation between extracted lines.
//!
//! Every ordered pair of perpendicular lines is tested, so one crossing cell
//! yields two [`IntersectionPoint`]s: one stored on each line, with the ids
//! and offsets swapped.

use crate::extract::RawLine;
use crate::puzzle::{Direction, IntersectionPoint, LineId};
use log::debug;

/// The crossing of `a` and `b`, seen from `a`, if they share a cell.
#[must_use]
pub fn crossing(a_id: LineId, a: &RawLine, b_id: LineId, b: &RawLine) -> Option<IntersectionPoint> {
    // the only cell two perpendicular lines can share
    let (x, y) = match (a.direction, b.direction) {
        (Direction::Right, Direction::Down) => (b.x, a.y),
        (Direction::Down, Direction::Right) => (a.x, b.y),
        _ => return None,
    };

    let first_offset = a.offset_of(x, y)?;
    let second_offset = b.offset_of(x, y)?;
    Some(IntersectionPoint::new(a_id, b_id, first_offset, second_offset))
}

/// Outgoing intersections for every line; `result[id]` belongs to `lines[id]`.
#[must_use]
pub fn compute_intersections(lines: &[RawLine]) -> Vec<Vec<IntersectionPoint>> {
    let result: Vec<Vec<IntersectionPoint>> = lines
        .iter()
        .enumerate()
        .map(|(a_id, a)| {
            lines
                .iter()
                .enumerate()
                .filter(|&(b_id, _)| b_id != a_id)
                .filter_map(|(b_id, b)| crossing(a_id, a, b_id, b))
                .collect()
        })
        .collect();

    debug!(
        "found {} crossings between {} lines",
        result.iter().map(Vec::len).sum::<usize>() / 2,
        lines.len()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_lines_from_map;

    #[test]
    fn test_crossing_offsets() {
        // across at row 2 from column 1; down at column 3 from row 0
        let right = RawLine::new(1, 2, 4, Direction::Right);
        let down = RawLine::new(3, 0, 3, Direction::Down);

        assert_eq!(crossing(0, &right, 1, &down), Some(IntersectionPoint::new(0, 1, 2, 2)));
        assert_eq!(crossing(1, &down, 0, &right), Some(IntersectionPoint::new(1, 0, 2, 2)));
    }

    #[test]
    fn test_lines_that_miss() {
        let right = RawLine::new(0, 0, 3, Direction::Right);
        // starts just past the end of the across line
        let past_end = RawLine::new(3, 0, 3, Direction::Down);
        // starts below the across line
        let below = RawLine::new(1, 1, 3, Direction::Down);

        assert_eq!(crossing(0, &right, 1, &past_end), None);
        assert_eq!(crossing(0, &right, 1, &below), None);
    }

    #[test]
    fn test_parallel_lines_never_cross() {
        let a = RawLine::new(0, 0, 3, Direction::Right);
        let b = RawLine::new(0, 0, 3, Direction::Right);
        assert_eq!(crossing(0, &a, 1, &b), None);
    }

    #[test]
    fn test_plus_shape() {
        let lines = extract_lines_from_map(&".#.\n###\n.#.".parse().unwrap());
        let intersections = compute_intersections(&lines);

        assert_eq!(lines.len(), 2);
        assert_eq!(intersections[0], vec![IntersectionPoint::new(0, 1, 1, 1)]);
        assert_eq!(intersections[1], vec![IntersectionPoint::new(1, 0, 1, 1)]);
    }

    #[test]
    fn test_intersections_are_symmetric() {
        let text = "
#####
#.#.#
#####
#.#..
###..
";
        let lines = extract_lines_from_map(&text.parse().unwrap());
        let intersections = compute_intersections(&lines);

        let total: usize = intersections.iter().map(Vec::len).sum();
        assert!(total > 0);
        assert_eq!(total % 2, 0);

        for (id, points) in intersections.iter().enumerate() {
            for point in points {
                assert_eq!(point.first_line_id, id);
                assert_ne!(point.second_line_id, id);
                assert!(point.first_offset < lines[id].length);
                assert!(point.second_offset < lines[point.second_line_id].length);
                assert_ne!(lines[id].direction, lines[point.second_line_id].direction);
                assert!(intersections[point.second_line_id].contains(&point.reversed()));
                assert_eq!(lines[id].cell(point.first_offset), lines[point.second_line_id].cell(point.second_offset));
            }
        }
    }
}
