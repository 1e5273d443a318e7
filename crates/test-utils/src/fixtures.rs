//! Common test fixtures for grib-orient tests.
//!
//! Records are built as raw JSON in the shape grib2json emits, so tests
//! exercise the same decoding path as real input files.

use serde_json::{json, Map, Value};

/// Common grid geometries for testing.
pub mod grid {
    /// Geometry of a regular lat/lon grid.
    #[derive(Debug, Clone, Copy)]
    pub struct GridSpec {
        pub nx: usize,
        pub ny: usize,
        pub lo1: f64,
        pub la1: f64,
        pub lo2: f64,
        pub la2: f64,
        pub dx: f64,
        pub dy: f64,
    }

    /// GFS 1.0 degree global grid, north to south (grib2json default).
    pub const GFS_1P00: GridSpec = GridSpec {
        nx: 360,
        ny: 181,
        lo1: 0.0,
        la1: 90.0,
        lo2: 359.0,
        la2: -90.0,
        dx: 1.0,
        dy: 1.0,
    };

    /// The same grid scanned south to north.
    pub const GFS_1P00_SOUTH_UP: GridSpec = GridSpec {
        la1: -90.0,
        la2: 90.0,
        ..GFS_1P00
    };

    /// Small regional grid over Europe, south to north.
    pub const EUROPE_SOUTH_UP: GridSpec = GridSpec {
        nx: 7,
        ny: 5,
        lo1: -10.0,
        la1: 35.0,
        lo2: 20.0,
        la2: 55.0,
        dx: 5.0,
        dy: 5.0,
    };

    /// A single latitude row, south to north endpoints.
    pub const SINGLE_ROW: GridSpec = GridSpec {
        nx: 4,
        ny: 1,
        lo1: 0.0,
        la1: 10.0,
        lo2: 3.0,
        la2: 20.0,
        dx: 1.0,
        dy: 10.0,
    };

    impl GridSpec {
        /// Returns the total number of grid cells.
        pub fn size(&self) -> usize {
            self.nx * self.ny
        }

        /// Whether rows already run north to south.
        pub fn is_canonical(&self) -> bool {
            self.la1 >= self.la2
        }
    }
}

/// Builds a grib2json-style header for a U-wind component at 10 m.
///
/// Carries the passthrough fields grib2json writes alongside the geometry.
pub fn grib2json_header(spec: &grid::GridSpec) -> Value {
    let scan_mode = if spec.is_canonical() { 0 } else { 64 };
    json!({
        "discipline": 0,
        "disciplineName": "Meteorological products",
        "gribEdition": 2,
        "center": 7,
        "centerName": "US National Weather Service - NCEP(WMC)",
        "refTime": "2024-01-15T12:00:00.000Z",
        "parameterCategory": 2,
        "parameterNumber": 2,
        "parameterNumberName": "U-component_of_wind",
        "parameterUnit": "m.s-1",
        "forecastTime": 0,
        "surface1Type": 103,
        "surface1Value": 10.0,
        "numberPoints": spec.size(),
        "shape": 6,
        "gridDefinitionTemplate": 0,
        "scanMode": scan_mode,
        "nx": spec.nx,
        "ny": spec.ny,
        "lo1": spec.lo1,
        "la1": spec.la1,
        "lo2": spec.lo2,
        "la2": spec.la2,
        "dx": spec.dx,
        "dy": spec.dy
    })
}

/// Builds a full grib2json record with the given data array.
pub fn grib2json_record(spec: &grid::GridSpec, data: Value) -> Value {
    json!({
        "header": grib2json_header(spec),
        "data": data
    })
}

/// Builds a minimal record holding only the geometry fields.
pub fn minimal_record(la1: f64, la2: f64, nx: usize, ny: usize, dy: f64, data: Value) -> Value {
    json!({
        "header": {"la1": la1, "la2": la2, "nx": nx, "ny": ny, "dy": dy},
        "data": data
    })
}

/// Returns a copy of `record` with `field` removed from its header.
pub fn without_header_field(record: &Value, field: &str) -> Value {
    let mut record = record.clone();
    if let Some(header) = record.get_mut("header").and_then(Value::as_object_mut) {
        let kept: Map<String, Value> = header
            .iter()
            .filter(|(key, _)| key.as_str() != field)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        *header = kept;
    }
    record
}
