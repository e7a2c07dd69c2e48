//! Integration tests for the crossfill grid filler.
//!
//! These tests run the complete pipeline from grid text through extraction,
//! solving and rendering, using the grids and word bank under `tests/fixtures/`.

use std::collections::HashSet;
use std::fs;

use crossfill::errors::{Diagnostic, GridError};
use crossfill::grid::Grid;
use crossfill::puzzle::{Direction, Puzzle};
use crossfill::solver::{is_valid_solution, solve, solve_with_config, SolveFailure, SolveResult, SolveStatus, SolverConfig};
use crossfill::word_bank::WordBank;

fn load_grid(name: &str) -> Grid {
    fs::read_to_string(format!("tests/fixtures/{name}"))
        .expect("Failed to read grid fixture")
        .parse()
        .expect("Fixture grid should parse")
}

fn load_word_bank() -> WordBank {
    WordBank::load_from_path("tests/fixtures/words.txt").expect("Failed to read word bank fixture")
}

/// Every solution drawn onto the grid
fn rendered(grid: &Grid, result: &SolveResult) -> HashSet<String> {
    result
        .solutions
        .iter()
        .map(|solution| grid.render_solution(solution).expect("solutions should render"))
        .collect()
}

#[cfg(test)]
mod plus_grid {
    use super::*;

    #[test]
    fn test_no_common_middle_letter() {
        let grid = load_grid("plus.grid");
        let result = solve(grid.puzzle(), &["CAT", "DOG"]);

        assert!(result.solutions.is_empty());
        assert_eq!(result.status, SolveStatus::Exhausted);
        assert_eq!(result.failure(), Some(SolveFailure::Exhausted));
    }

    #[test]
    fn test_common_middle_letter() {
        let grid = load_grid("plus.grid");
        let result = solve(grid.puzzle(), &["CAT", "BAT"]);

        assert_eq!(rendered(&grid, &result), HashSet::from([" B \nCAT\n T ".to_string(), " C \nBAT\n T ".to_string()]));
    }

    #[test]
    fn test_template() {
        assert_eq!(load_grid("plus.grid").render_template(), " # \n###\n # ");
    }

    #[test]
    fn test_hand_built_puzzle_matches_extraction() {
        let mut puzzle = Puzzle::new();
        puzzle.add_line(3, Direction::Right, vec![], 0).unwrap();
        puzzle.add_line(3, Direction::Down, vec![], 1).unwrap();
        puzzle.connect(0, 1, 1, 1).unwrap();

        assert!(puzzle.validate().is_ok());
        assert_eq!(&puzzle, load_grid("plus.grid").puzzle());
        assert!(puzzle.words_fit(0, "CAT", 1, "BAT"));
        assert!(!puzzle.words_fit(0, "CAT", 1, "DOG"));
    }
}

#[cfg(test)]
mod frame_grid {
    use super::*;

    #[test]
    fn test_fill_from_word_bank_file() {
        let grid = load_grid("frame.grid");
        let bank = load_word_bank();
        let result = solve(grid.puzzle(), &bank.as_refs());

        assert_eq!(grid.puzzle().len(), 4);
        assert_eq!(result.status, SolveStatus::Exhausted);
        assert_eq!(
            rendered(&grid, &result),
            HashSet::from(["HOUSE\nA   Y\nTABLE".to_string(), "HOUSE\nO   Y\nTABLE".to_string()])
        );
    }

    #[test]
    fn test_solutions_are_valid_fills() {
        let grid = load_grid("frame.grid");
        let bank = load_word_bank();
        let words = bank.as_refs();
        let result = solve(grid.puzzle(), &words);

        assert!(!result.solutions.is_empty());
        for solution in &result.solutions {
            assert!(is_valid_solution(grid.puzzle(), &words, solution));
            let distinct: HashSet<&String> = solution.values().collect();
            assert_eq!(distinct.len(), solution.len());
        }
    }

    #[test]
    fn test_max_solutions() {
        let grid = load_grid("frame.grid");
        let bank = load_word_bank();
        let config = SolverConfig { max_solutions: Some(1), ..SolverConfig::default() };
        let result = solve_with_config(grid.puzzle(), &bank.as_refs(), &config);

        assert_eq!(result.solutions.len(), 1);
        assert_eq!(result.status, SolveStatus::FoundEnough);
    }

    #[test]
    fn test_case_is_kept_unless_uppercased() {
        let grid = load_grid("frame.grid");
        let bank: WordBank = ["house", "table", "hat", "eye"].into_iter().collect();

        let as_written = solve(grid.puzzle(), &bank.as_refs());
        assert_eq!(rendered(&grid, &as_written), HashSet::from(["house\na   y\ntable".to_string()]));

        let upper = bank.uppercased();
        let result = solve(grid.puzzle(), &upper.as_refs());
        assert_eq!(rendered(&grid, &result), HashSet::from(["HOUSE\nA   Y\nTABLE".to_string()]));
    }
}

#[cfg(test)]
mod failures {
    use super::*;

    #[test]
    fn test_grid_without_lines() {
        let grid: Grid = "#.#\n...\n#.#".parse().unwrap();
        let result = solve(grid.puzzle(), &["AB"]);

        assert_eq!(result.failure(), Some(SolveFailure::EmptyPuzzle));
        assert_eq!(result.failure().map(|f| f.code()), Some("S001"));
    }

    #[test]
    fn test_bank_missing_a_length() {
        let grid = load_grid("frame.grid");
        let result = solve(grid.puzzle(), &["HAT", "EYE"]);

        assert_eq!(result.failure(), Some(SolveFailure::NoCandidateWords { line_id: 0, length: 5 }));
        assert_eq!(result.branches, 0);
    }

    #[test]
    fn test_invalid_grid_text() {
        let err = "###\n#*#".parse::<Grid>().unwrap_err();

        assert_eq!(err, GridError::InvalidCell { row: 1, col: 1, found: '*' });
        assert_eq!(err.code(), "G001");
        assert!(err.display_detailed().contains("(G001)"));
    }
}
