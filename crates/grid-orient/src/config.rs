//! Configuration for batch reorientation.

use serde::{Deserialize, Serialize};

use crate::rounding::DEFAULT_PRECISION;

/// Largest decimal precision that still means something for an `f64`.
pub const MAX_PRECISION: u32 = 15;

/// Configuration for a reorientation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientConfig {
    /// Decimal places kept in output data.
    pub precision: u32,

    /// Indent the output JSON.
    pub pretty: bool,

    /// Validate every record's geometry, not only records that need a flip.
    pub strict: bool,

    /// Process records on the rayon thread pool.
    pub parallel: bool,
}

impl Default for OrientConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            pretty: false,
            strict: false,
            parallel: false,
        }
    }
}

impl OrientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("FLIP_LAT_PRECISION") {
            if let Ok(precision) = val.trim().parse() {
                config.precision = precision;
            }
        }

        if let Some(val) = lookup("FLIP_LAT_PRETTY") {
            config.pretty = parse_flag(&val);
        }

        if let Some(val) = lookup("FLIP_LAT_STRICT") {
            config.strict = parse_flag(&val);
        }

        if let Some(val) = lookup("FLIP_LAT_PARALLEL") {
            config.parallel = parse_flag(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.precision > MAX_PRECISION {
            return Err(format!(
                "precision must be at most {} decimal places, got {}",
                MAX_PRECISION, self.precision
            ));
        }
        Ok(())
    }
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}
