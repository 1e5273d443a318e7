//! North-to-south reorientation of grib2json grids.
//!
//! grib2json emits one record per GRIB message: a `header` describing a
//! regular lat/lon grid and a flat, row-major `data` array. Visualization
//! layers such as Leaflet Velocity expect the first row to be the
//! northernmost one (`la1 >= la2`) with a positive `dy`. This crate:
//!
//! - **Reorients**: swaps `la1`/`la2` and reverses row order for grids that
//!   scan south to north, leaving `dy` as supplied
//! - **Rounds**: trims every present value to a fixed number of decimals
//! - **Batches**: processes a whole record list fail-fast, so no output is
//!   produced if any record is malformed
//!
//! # Architecture
//!
//! ```text
//! read_records(input)
//!      │
//!      ▼
//! process_batch(records, config)
//!      │
//!      ├─► GridRecord::from_value        (structural checks)
//!      │
//!      ├─► la1 < la2 ? reorient_owned    (swap header, reverse rows)
//!      │
//!      └─► round_values                  (markers pass through)
//!               │
//!               ▼
//! write_records(output, pretty)          (atomic rename)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_orient::{process_batch, read_records, write_records, OrientConfig};
//!
//! let config = OrientConfig::from_env();
//! let records = read_records(Path::new("wind.json"))?;
//! let report = process_batch(records, &config)?;
//! write_records(Path::new("wind_flipped.json"), &report.records, config.pretty)?;
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod io;
pub mod reorient;
pub mod rounding;
pub mod types;

// Re-export commonly used types at crate root
pub use batch::{process_batch, BatchReport, BatchStats};
pub use config::OrientConfig;
pub use error::{BatchError, RecordIoError, ReorientError, Result, StructuralError};
pub use io::{encode_records, read_records, write_records};
pub use reorient::{reorient, reorient_owned, reverse_rows, ReorientAction, Reoriented};
pub use rounding::{round_to, round_values, RoundedValues, DEFAULT_PRECISION};
pub use types::{GridGeometry, GridRecord, GridValue, REQUIRED_HEADER_FIELDS};
