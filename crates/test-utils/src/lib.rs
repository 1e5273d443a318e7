//! Shared test utilities for the grib-orient workspace.
//!
//! This crate provides common testing infrastructure including:
//! - grib2json-shaped record fixtures
//! - Grid data generators with predictable row layouts
//! - Temporary JSON file helpers
//! - Floating-point assertion macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, create_test_grid};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

use std::path::{Path, PathBuf};

/// Writes `value` as JSON to `dir/name` and returns the path.
///
/// Panics on I/O failure; intended for test setup only.
pub fn write_json_file(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, value.to_string()).expect("failed to write test JSON file");
    path
}

/// Reads and parses a JSON file written by the code under test.
pub fn read_json_file(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("failed to read test JSON file");
    serde_json::from_str(&text).expect("test JSON file is not valid JSON")
}

/// Creates a fresh temporary directory for a test.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Asserts that a value has at most `places` decimal digits.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_decimal_places;
///
/// assert_decimal_places!(12.34, 2); // passes
/// assert_decimal_places!(12.345, 2); // fails
/// ```
#[macro_export]
macro_rules! assert_decimal_places {
    ($value:expr, $places:expr) => {{
        let value: f64 = $value as f64;
        let text = format!("{}", value);
        let decimals = text.split('.').nth(1).map_or(0, |frac| frac.len());
        if decimals > $places {
            panic!(
                "assertion failed: `{}` has {} decimal places, expected at most {}",
                text, decimals, $places
            );
        }
    }};
}
