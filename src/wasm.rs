use crate::errors::Diagnostic;
use crate::grid::Grid;
use crate::log::init_logger;
use crate::solver::{solve_with_config, SolverConfig};
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "G001", "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl WasmError {
    fn from_diagnostic<E: Diagnostic>(e: &E) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: Diagnostic::description(e).to_string(),
            help: e.help().map(str::to_string),
        }
    }

    fn serialization(e: &serde_wasm_bindgen::Error) -> Self {
        WasmError {
            code: "WASM002".to_string(),
            message: format!("serialization failed: {e}"),
            description: "Failed to serialize result".to_string(),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

/// Initialize crossfill logging with the specified debug setting.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);

    log::info!("WASM module initialized");
}

#[derive(serde::Serialize)]
struct WasmSolveResult {
    /// Each solution as rendered grid rows.
    solutions: Vec<Vec<String>>,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
}

fn parse_grid(grid_text: &str) -> Result<Grid, WasmError> {
    grid_text.parse::<Grid>().map_err(|e| WasmError::from_diagnostic(&e))
}

/// JS entry: (grid_text: string, words: string[], max_solutions: number)
/// returns { solutions: string[][], status: string, failure?: string }.
/// `max_solutions` of 0 means no limit.
#[wasm_bindgen]
pub fn solve_grid_wasm(grid_text: &str, words: JsValue, max_solutions: usize) -> Result<JsValue, JsValue> {
    let words: Vec<String> = serde_wasm_bindgen::from_value(words).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("words must be string[]: {e}"),
        description: "Invalid word-bank format".to_string(),
        help: Some("Pass a string array, e.g., ['CAT', 'BAT', 'DOG']".to_string()),
    })?;
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();

    let grid = parse_grid(grid_text)?;
    let config = SolverConfig { max_solutions: (max_solutions > 0).then_some(max_solutions), ..SolverConfig::default() };
    let result = solve_with_config(grid.puzzle(), &refs, &config);

    let solutions = result
        .solutions
        .iter()
        .map(|solution| {
            grid.render_solution(solution)
                .map(|text| text.lines().map(str::to_string).collect())
                .map_err(|e| WasmError::from_diagnostic(&e))
        })
        .collect::<Result<Vec<Vec<String>>, WasmError>>()?;

    let wasm_result = WasmSolveResult {
        solutions,
        status: result.status.name().to_string(),
        failure: result.failure().map(|f| f.display_detailed()),
    };

    serde_wasm_bindgen::to_value(&wasm_result).map_err(|e| WasmError::serialization(&e).into())
}

/// Render the empty grid: '#' for cells, spaces elsewhere.
///
/// # Errors
/// Returns a JS `Error` carrying the diagnostic code if the grid text is invalid.
#[wasm_bindgen]
pub fn render_template_wasm(grid_text: &str) -> Result<String, JsValue> {
    Ok(parse_grid(grid_text)?.render_template())
}
