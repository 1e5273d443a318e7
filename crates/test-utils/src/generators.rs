//! Test data generators for creating synthetic grid payloads.
//!
//! These generators create predictable, verifiable row-major data that makes
//! row reversal easy to check by eye.

use serde_json::Value;

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `row * 1000 + col`
///
/// After a north-south flip, row `k` of the output must hold the values
/// `(ny - 1 - k) * 1000 + col`.
///
/// # Arguments
///
/// * `width` - Number of columns (`nx`)
/// * `height` - Number of rows (`ny`)
///
/// # Returns
///
/// A `Vec<f64>` in row-major order (row 0 first, then row 1, etc.)
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);    // 10 * 5
/// assert_eq!(grid[0], 0.0);      // row=0, col=0
/// assert_eq!(grid[1], 1.0);      // row=0, col=1
/// assert_eq!(grid[10], 1000.0);  // row=1, col=0
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((row * 1000 + col) as f64);
        }
    }
    data
}

/// The expected output of flipping [`create_test_grid`] north to south.
pub fn create_flipped_test_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in (0..height).rev() {
        for col in 0..width {
            data.push((row * 1000 + col) as f64);
        }
    }
    data
}

/// Creates a grid of wind-component-like values with more than two decimals.
///
/// Values vary smoothly between roughly -20 and 20 m/s so rounding has
/// something to do on every cell.
pub fn create_wind_component_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let phase = (row as f64 * 0.37) + (col as f64 * 0.11);
            data.push(20.0 * phase.sin() + 0.001_234);
        }
    }
    data
}

/// Creates a grid with missing cells at specified positions.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `missing` - List of (col, row) positions that should be missing
///
/// # Returns
///
/// A `Vec<Option<f64>>` following [`create_test_grid`] values, with `None`
/// at the specified positions.
pub fn create_grid_with_missing(
    width: usize,
    height: usize,
    missing: &[(usize, usize)],
) -> Vec<Option<f64>> {
    let mut data: Vec<Option<f64>> = create_test_grid(width, height).into_iter().map(Some).collect();
    for &(col, row) in missing {
        if col < width && row < height {
            data[row * width + col] = None;
        }
    }
    data
}

/// A grid cell that can be written into a grib2json `data` array.
pub trait JsonCell {
    fn to_json_cell(&self) -> Value;
}

impl JsonCell for f64 {
    fn to_json_cell(&self) -> Value {
        Value::from(*self)
    }
}

impl JsonCell for Option<f64> {
    fn to_json_cell(&self) -> Value {
        self.map_or(Value::Null, Value::from)
    }
}

/// Converts a grid into a JSON `data` array, `None` becoming `null`.
pub fn to_json_data<T: JsonCell>(values: &[T]) -> Value {
    Value::Array(values.iter().map(JsonCell::to_json_cell).collect())
}
