//! Backtracking search that fills every line of a puzzle from a word bank.
//!
//! # Algorithm
//!
//! 1. Bucket the (deduplicated) word bank by length in `char`s.
//! 2. Give each line the bucket matching its length as its candidate set.
//! 3. Pick the unassigned line with the fewest candidates (lowest id on ties),
//!    try each of its candidates that is not already used, and prune every
//!    unassigned crossing line down to the words that agree on the shared
//!    cell. A branch whose pruning empties a neighbour, or whose word clashes
//!    with an already filled crossing line, is abandoned.
//! 4. Record every complete assignment. The search is exhaustive unless
//!    [`SolverConfig`] caps it.
//!
//! Candidate sets are shared between branches and copied per line only when
//! pruned, so a sibling branch never sees another branch's pruning. The
//! tentative assignment is rolled back by a guard on every exit path.
//!
//! # Outcomes
//!
//! [`solve`] never fails. When no solution comes back, [`SolveResult::failure`]
//! says why:
//!
//! - S001: `EmptyPuzzle` (Puzzle has no lines)
//! - S002: `NoCandidateWords` (Some line length has no word in the bank)
//! - S003: `Exhausted` (Search finished without a complete assignment)
//!
//! # Examples
//!
//! ```
//! use crossfill::grid::Grid;
//! use crossfill::solver;
//!
//! let grid: Grid = ".#.\n###\n.#.".parse()?;
//! let result = solver::solve(grid.puzzle(), &["CAT", "BAT", "DOG"]);
//!
//! assert_eq!(result.solutions.len(), 2);
//! for solution in &result.solutions {
//!     println!("{}\n", grid.render_solution(solution)?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::errors::Diagnostic;
use crate::puzzle::{IntersectionPoint, LineId, Puzzle};
use instant::Instant;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::time::Duration;

/// One word per line id.
pub type Solution = BTreeMap<LineId, String>;

/// Caller-side limits on the search. The default is exhaustive and unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Stop once this many solutions have been found.
    pub max_solutions: Option<usize>,
    /// Stop once this much wall-clock time has passed.
    pub time_budget: Option<Duration>,
}

/// Why a solve produced no solutions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveFailure {
    #[error("puzzle has no lines")]
    EmptyPuzzle,

    #[error("no word in the bank has length {length} (needed by line {line_id})")]
    NoCandidateWords { line_id: LineId, length: usize },

    #[error("no assignment of distinct words satisfies every intersection")]
    Exhausted,
}

impl Diagnostic for SolveFailure {
    fn code(&self) -> &'static str {
        match self {
            SolveFailure::EmptyPuzzle => "S001",
            SolveFailure::NoCandidateWords { .. } => "S002",
            SolveFailure::Exhausted => "S003",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            SolveFailure::EmptyPuzzle => "Puzzle has no lines",
            SolveFailure::NoCandidateWords { .. } => "Some line length has no word in the bank",
            SolveFailure::Exhausted => "Search finished without a complete assignment",
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            SolveFailure::EmptyPuzzle => Some("Draw at least two adjacent cells in a row or column"),
            SolveFailure::NoCandidateWords { .. } => Some("Add words of the missing length to the word bank"),
            SolveFailure::Exhausted => Some("Add more words, or draw a grid with fewer crossings"),
        }
    }
}

/// How the solver run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// The whole search space was explored.
    Exhausted,

    /// Stopped at [`SolverConfig::max_solutions`].
    FoundEnough,

    /// Stopped at [`SolverConfig::time_budget`]. Contains the elapsed time.
    TimedOut { elapsed: Duration },

    /// The search never started.
    NotAttempted(SolveFailure),
}

impl SolveStatus {
    /// Stable snake_case name, as reported to JavaScript callers.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SolveStatus::Exhausted => "exhausted",
            SolveStatus::FoundEnough => "found_enough",
            SolveStatus::TimedOut { .. } => "timed_out",
            SolveStatus::NotAttempted(_) => "not_attempted",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Every solution found, in discovery order.
    pub solutions: Vec<Solution>,
    pub status: SolveStatus,
    /// Number of tentative assignments tried.
    pub branches: usize,
}

impl SolveResult {
    fn not_attempted(failure: SolveFailure) -> Self {
        info!("not solving: {failure}");
        Self { solutions: vec![], status: SolveStatus::NotAttempted(failure), branches: 0 }
    }

    /// The reason for an empty result, if the search did not stop early.
    #[must_use]
    pub fn failure(&self) -> Option<SolveFailure> {
        match &self.status {
            SolveStatus::NotAttempted(failure) => Some(failure.clone()),
            SolveStatus::Exhausted if self.solutions.is_empty() => Some(SolveFailure::Exhausted),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

impl IntoIterator for SolveResult {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

/// Wall-clock limit for one solver run; no limit never expires.
struct TimeBudget {
    start: Instant,
    limit: Option<Duration>,
}

impl TimeBudget {
    fn new(limit: Option<Duration>) -> Self {
        Self { start: Instant::now(), limit }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }
}

/// A line as the search sees it: its id and its crossings, with the crossed
/// line given by slot index.
struct Slot<'p> {
    line_id: LineId,
    crossings: Vec<(usize, &'p IntersectionPoint)>,
}

/// Candidate words per slot. Slices are shared until a branch prunes them.
type Candidates<'w> = Vec<Rc<[&'w str]>>;

/// The partial solution, one optional word per slot.
struct Assignment<'w> {
    words: Vec<Option<&'w str>>,
    used: HashSet<&'w str>,
    filled: usize,
}

impl<'w> Assignment<'w> {
    fn new(slot_count: usize) -> Self {
        Self { words: vec![None; slot_count], used: HashSet::with_capacity(slot_count), filled: 0 }
    }

    fn is_assigned(&self, slot: usize) -> bool {
        self.words[slot].is_some()
    }

    fn word(&self, slot: usize) -> Option<&'w str> {
        self.words[slot]
    }

    fn is_used(&self, word: &str) -> bool {
        self.used.contains(word)
    }

    fn is_complete(&self) -> bool {
        self.filled == self.words.len()
    }

    /// Tentatively put `word` in `slot`. Dropping the guard takes it back out.
    fn assign<'a>(&'a mut self, slot: usize, word: &'w str) -> AssignmentGuard<'a, 'w> {
        debug_assert!(!self.is_assigned(slot), "slot {slot} assigned twice");
        self.words[slot] = Some(word);
        self.used.insert(word);
        self.filled += 1;
        AssignmentGuard { assignment: self, slot }
    }

    fn unassign(&mut self, slot: usize) {
        if let Some(word) = self.words[slot].take() {
            self.used.remove(word);
            self.filled -= 1;
        }
    }

    fn to_solution(&self, slots: &[Slot]) -> Solution {
        slots
            .iter()
            .zip(&self.words)
            .filter_map(|(slot, word)| word.map(|w| (slot.line_id, w.to_string())))
            .collect()
    }
}

/// Scoped tentative assignment; rolls back on drop, including early returns.
struct AssignmentGuard<'a, 'w> {
    assignment: &'a mut Assignment<'w>,
    slot: usize,
}

impl<'w> Deref for AssignmentGuard<'_, 'w> {
    type Target = Assignment<'w>;

    fn deref(&self) -> &Self::Target {
        self.assignment
    }
}

impl DerefMut for AssignmentGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.assignment
    }
}

impl Drop for AssignmentGuard<'_, '_> {
    fn drop(&mut self) {
        self.assignment.unassign(self.slot);
    }
}

/// Group distinct words by length in `char`s, keeping bank order inside a bucket.
fn words_by_length<'w>(word_bank: &[&'w str]) -> HashMap<usize, Vec<&'w str>> {
    let mut seen = HashSet::with_capacity(word_bank.len());
    let mut buckets: HashMap<usize, Vec<&'w str>> = HashMap::new();

    for &word in word_bank {
        if seen.insert(word) {
            buckets.entry(word.chars().count()).or_default().push(word);
        }
    }

    buckets
}

/// The unassigned slot with the smallest candidate set; lowest index on ties.
fn most_constrained(assignment: &Assignment, candidates: &Candidates) -> Option<usize> {
    (0..candidates.len())
        .filter(|&slot| !assignment.is_assigned(slot))
        .min_by_key(|&slot| candidates[slot].len())
}

/// Candidate sets after putting `word` in `slot`, or `None` if `word` clashes
/// with an assigned crossing line or leaves an unassigned one with nothing.
///
/// Hand-built puzzles may record a crossing on one line only, so crossings
/// towards lines that are already filled are checked here as well.
fn prune<'w>(
    slot: &Slot,
    word: &str,
    assignment: &Assignment<'w>,
    candidates: &Candidates<'w>,
) -> Option<Candidates<'w>> {
    let mut pruned = candidates.clone();

    for &(neighbor, point) in &slot.crossings {
        if let Some(placed) = assignment.word(neighbor) {
            if !point.words_fit(word, placed) {
                return None;
            }
            continue;
        }

        let current = &pruned[neighbor];
        let kept: Vec<&'w str> = current.iter().copied().filter(|other| point.words_fit(word, other)).collect();
        if kept.is_empty() {
            return None;
        }
        if kept.len() != current.len() {
            pruned[neighbor] = Rc::from(kept);
        }
    }

    Some(pruned)
}

/// State shared by the whole search (everything except the branch-local
/// assignment and candidate sets).
struct Search<'p> {
    slots: &'p [Slot<'p>],
    max_solutions: Option<usize>,
    budget: TimeBudget,
    solutions: Vec<Solution>,
    branches: usize,
    stopped: Option<SolveStatus>,
}

impl Search<'_> {
    fn should_stop(&mut self) -> bool {
        if self.stopped.is_none() && self.budget.expired() {
            self.stopped = Some(SolveStatus::TimedOut { elapsed: self.budget.elapsed() });
        }
        self.stopped.is_some()
    }

    fn record(&mut self, assignment: &Assignment) {
        let solution = assignment.to_solution(self.slots);
        debug!("solution #{}: {solution:?}", self.solutions.len() + 1);
        self.solutions.push(solution);

        if self.max_solutions.is_some_and(|max| self.solutions.len() >= max) {
            self.stopped = Some(SolveStatus::FoundEnough);
        }
    }

    /// Branch on the most constrained unassigned slot.
    fn explore<'w>(&mut self, assignment: &mut Assignment<'w>, candidates: &Candidates<'w>) {
        let Some(target) = most_constrained(assignment, candidates) else {
            return;
        };

        for &word in candidates[target].iter() {
            if self.should_stop() {
                return;
            }
            // words are never repeated within a solution
            if assignment.is_used(word) {
                continue;
            }
            self.guess(assignment, target, word, candidates);
        }
    }

    fn guess<'w>(&mut self, assignment: &mut Assignment<'w>, target: usize, word: &'w str, candidates: &Candidates<'w>) {
        self.branches += 1;
        let mut scope = assignment.assign(target, word);

        let Some(pruned) = prune(&self.slots[target], word, &scope, candidates) else {
            return;
        };

        if scope.is_complete() {
            self.record(&scope);
            return;
        }

        self.explore(&mut scope, &pruned);
    }
}

/// Find every assignment of distinct words to the puzzle's lines that agrees
/// on every intersection. Equivalent to [`solve_with_config`] with the default
/// (exhaustive) configuration.
#[must_use]
pub fn solve(puzzle: &Puzzle, word_bank: &[&str]) -> SolveResult {
    solve_with_config(puzzle, word_bank, &SolverConfig::default())
}

/// [`solve`], stopping early at the limits in `config`.
#[must_use]
pub fn solve_with_config(puzzle: &Puzzle, word_bank: &[&str], config: &SolverConfig) -> SolveResult {
    if puzzle.is_empty() {
        return SolveResult::not_attempted(SolveFailure::EmptyPuzzle);
    }

    let buckets = words_by_length(word_bank);

    let index: HashMap<LineId, usize> = puzzle.line_ids().enumerate().map(|(slot, id)| (id, slot)).collect();

    let mut slots = Vec::with_capacity(puzzle.len());
    let mut candidates: Candidates = Vec::with_capacity(puzzle.len());
    for (line_id, line) in puzzle.iter() {
        let Some(words) = buckets.get(&line.length()) else {
            return SolveResult::not_attempted(SolveFailure::NoCandidateWords { line_id, length: line.length() });
        };
        debug!("line {line_id} ({} {}): {} candidates", line.length(), line.direction(), words.len());
        candidates.push(Rc::from(words.as_slice()));

        let crossings = line
            .intersections()
            .iter()
            .filter_map(|point| match index.get(&point.second_line_id) {
                Some(&neighbor) => Some((neighbor, point)),
                None => {
                    warn!("line {line_id} crosses unknown line {}; ignoring", point.second_line_id);
                    None
                }
            })
            .collect();
        slots.push(Slot { line_id, crossings });
    }

    info!(
        "solving {} lines against {} distinct words",
        slots.len(),
        buckets.values().map(Vec::len).sum::<usize>()
    );

    let mut search = Search {
        slots: &slots,
        max_solutions: config.max_solutions,
        budget: TimeBudget::new(config.time_budget),
        solutions: vec![],
        branches: 0,
        stopped: None,
    };
    if config.max_solutions == Some(0) {
        search.stopped = Some(SolveStatus::FoundEnough);
    }

    let mut assignment = Assignment::new(slots.len());
    search.explore(&mut assignment, &candidates);
    debug_assert_eq!(assignment.filled, 0, "every tentative assignment must be rolled back");

    let status = search.stopped.take().unwrap_or(SolveStatus::Exhausted);
    info!(
        "search finished ({status:?}): {} solutions, {} branches in {:.3}s",
        search.solutions.len(),
        search.branches,
        search.budget.elapsed().as_secs_f64()
    );
    if status == SolveStatus::Exhausted && search.solutions.is_empty() {
        info!("no solution: {}", SolveFailure::Exhausted);
    }

    SolveResult { solutions: search.solutions, status, branches: search.branches }
}

/// True iff `solution` fills every line of `puzzle` with a distinct word from
/// `word_bank` of the right length, and every intersection agrees.
#[must_use]
pub fn is_valid_solution(puzzle: &Puzzle, word_bank: &[&str], solution: &Solution) -> bool {
    if solution.len() != puzzle.len() {
        return false;
    }

    let bank: HashSet<&str> = word_bank.iter().copied().collect();
    let distinct: HashSet<&str> = solution.values().map(String::as_str).collect();
    if distinct.len() != solution.len() {
        return false;
    }

    puzzle.iter().all(|(line_id, line)| {
        let Some(word) = solution.get(&line_id) else {
            return false;
        };
        bank.contains(word.as_str())
            && word.chars().count() == line.length()
            && line.intersections().iter().all(|point| {
                solution.get(&point.second_line_id).is_some_and(|other| point.words_fit(word, other))
            })
    })
}
