//! Decimal rounding of grid values.
//!
//! Rounding goes through Rust's exact float formatting, so the result is the
//! decimal closest to the true binary value (ties to even) rather than the
//! drift-prone `(x * 100.0).round() / 100.0`.

use crate::types::GridValue;

/// Decimal places kept in output data unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 2;

/// Round a single value to `precision` decimal digits.
///
/// Non-finite values are returned unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", precision as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Output of [`round_values`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedValues {
    pub values: Vec<GridValue>,
    /// Positions of elements that were neither numbers nor `null`.
    pub malformed: Vec<usize>,
}

/// Round every present value; markers and malformed elements pass through.
pub fn round_values(data: Vec<GridValue>, precision: u32) -> RoundedValues {
    let mut malformed = Vec::new();
    let values = data
        .into_iter()
        .enumerate()
        .map(|(i, value)| match value {
            GridValue::Present(v) => GridValue::Present(round_to(v, precision)),
            GridValue::Missing => GridValue::Missing,
            GridValue::Malformed(raw) => {
                malformed.push(i);
                GridValue::Malformed(raw)
            }
        })
        .collect();

    RoundedValues { values, malformed }
}
