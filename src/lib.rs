// Reusable library API, visible to both CLI and WASM builds
pub mod errors;
pub mod extract;
pub mod grid;
pub mod intersections;
pub mod log;
pub mod occupancy;
pub mod puzzle;
pub mod render;
pub mod solver;
pub mod word_bank;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
