use clap::Parser;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use crossfill::errors::Diagnostic;
use crossfill::grid::Grid;
use crossfill::solver::{self, SolveStatus, SolverConfig};
use crossfill::word_bank::WordBank;

/// Crossword grid filler
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// Grid file: one row per line, '#' for a cell, '.' or space for a gap
    grid: String,

    /// Path to the word bank (one word per line)
    #[arg(short, long)]
    words: String,

    /// Stop after this many solutions
    #[arg(short = 'n', long)]
    max_solutions: Option<usize>,

    /// Give up after this many seconds
    #[arg(short, long)]
    time_budget: Option<f64>,

    /// Upper-case every word before solving
    #[arg(short, long)]
    uppercase: bool,
}

/// Entry point of the crossfill CLI.
///
/// Delegates to [`try_main`], printing any error to stderr and exiting with code 1.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("CROSSFILL_DEBUG").is_ok();
    crossfill::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        if let Some(grid_err) = e.downcast_ref::<crossfill::errors::GridError>() {
            eprintln!("Error: {}", grid_err.display_detailed());
        } else if let Some(render_err) = e.downcast_ref::<crossfill::errors::RenderError>() {
            eprintln!("Error: {}", render_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic.
///
/// Steps:
/// 1. Read and parse the grid, then the word bank.
/// 2. Print the empty template on stderr.
/// 3. Solve and print each filled grid on stdout, blank-line separated.
/// 4. Print status and timings on stderr.
///
/// "No solutions" is not an error: it is reported and the exit code stays 0.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let time_budget = cli
        .time_budget
        .map(Duration::try_from_secs_f64)
        .transpose()
        .map_err(|e| format!("invalid --time-budget: {e}"))?;

    let grid_text = std::fs::read_to_string(&cli.grid)
        .map_err(|e| format!("failed to read grid from '{}': {e}", cli.grid))?;
    let grid: Grid = grid_text.parse()?;

    let t_load = Instant::now();
    let mut word_bank = WordBank::load_from_path(&cli.words)?;
    if cli.uppercase {
        word_bank = word_bank.uppercased();
    }
    let load_secs = t_load.elapsed().as_secs_f64();

    eprintln!("{}x{} grid, {} lines:", grid.width(), grid.height(), grid.puzzle().len());
    eprintln!("{}\n", grid.render_template());
    eprintln!("Solving...");

    let config = SolverConfig { max_solutions: cli.max_solutions, time_budget };
    let t_solve = Instant::now();
    let result = solver::solve_with_config(grid.puzzle(), &word_bank.as_refs(), &config);
    let solve_secs = t_solve.elapsed().as_secs_f64();

    for (i, solution) in result.solutions.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", grid.render_solution(solution)?);
    }

    match &result.status {
        SolveStatus::TimedOut { elapsed } => {
            eprintln!("⚠️  Timed out after {:.1}s; some solutions may not have been returned", elapsed.as_secs_f64());
        }
        SolveStatus::FoundEnough => {
            eprintln!("✓ Stopped after finding {} solutions", result.solutions.len());
        }
        SolveStatus::Exhausted | SolveStatus::NotAttempted(_) => {}
    }
    if let Some(failure) = result.failure() {
        eprintln!("No solutions found: {}", failure.display_detailed());
    }

    eprintln!(
        "Loaded {} words in {:.3}s; solved in {:.3}s ({} solutions, {} branches).",
        word_bank.len(),
        load_secs,
        solve_secs,
        result.solutions.len(),
        result.branches
    );

    Ok(())
}
