//! glyphscan-test - Regression test framework for glyphscan
//!
//! This crate provides a regression test framework with three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! It also ships a synthetic 5x7 font (see [`font`]) for building training
//! bitmaps and test pages in memory.
//!
//! # Usage
//!
//! ```ignore
//! use glyphscan_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(3.0, stats.rows as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"
//! - `RUST_LOG`: Log filter used by [`init_tracing`]

mod error;
pub mod font;
mod params;

use std::sync::Once;

use glyphscan_core::PixelBuffer;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

static INIT_TRACING: Once = Once::new();

/// Install a `tracing` subscriber for tests, once per process.
///
/// Output goes through the test writer, filtered by `RUST_LOG`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "digits.pgm")
pub fn load_test_image(name: &str) -> TestResult<PixelBuffer> {
    let path = test_data_path(name);
    glyphscan_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // glyphscan-test is at crates/glyphscan-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
