//! Core types for grib2json grid records.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::StructuralError;

/// Header fields every reorientable record must carry, in validation order.
pub const REQUIRED_HEADER_FIELDS: [&str; 5] = ["la1", "la2", "nx", "ny", "dy"];

/// A single grid cell.
///
/// grib2json writes `null` for cells without data; anything that is neither a
/// number nor `null` is kept as [`GridValue::Malformed`] so it can be written
/// back out untouched. Numbers are held as `f64`: integers come back out as
/// floats (`5` as `5.0`) and lose precision past 2^53.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridValue {
    Present(f64),
    Missing,
    Malformed(Value),
}

impl GridValue {
    /// The numeric value, if present.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Present(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for GridValue {
    fn from(value: f64) -> Self {
        Self::Present(value)
    }
}

impl From<Option<f64>> for GridValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Present)
    }
}

/// One grib2json message: a header describing the grid and a flat,
/// row-major data payload.
///
/// The header is kept as a raw JSON object so that fields this crate does not
/// interpret (`refTime`, `parameterNumberName`, `lo1`, ...) round-trip
/// verbatim. Top-level keys other than `header` and `data` are kept in
/// `extra`. A decoded record is written back with its top-level keys in the
/// order they were read; keys added afterwards follow, `header` and `data`
/// first.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct GridRecord {
    pub header: Option<Map<String, Value>>,
    pub data: Option<Vec<GridValue>>,
    pub extra: Map<String, Value>,
    key_order: Vec<String>,
}

impl GridRecord {
    /// Create a record from a header object and data payload.
    pub fn new(header: Map<String, Value>, data: Vec<GridValue>) -> Self {
        Self {
            header: Some(header),
            data: Some(data),
            extra: Map::new(),
            key_order: Vec::new(),
        }
    }

    /// Decode a record from a raw JSON value.
    pub fn from_value(value: Value) -> Result<Self, StructuralError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(StructuralError::Malformed {
                    what: "record",
                    expected: "an object",
                    found: json_kind(&other),
                })
            }
        };

        let mut record = Self::default();
        for (key, value) in fields {
            record.key_order.push(key.clone());
            match key.as_str() {
                "header" => match value {
                    Value::Object(header) => record.header = Some(header),
                    other => {
                        return Err(StructuralError::Malformed {
                            what: "header",
                            expected: "an object",
                            found: json_kind(&other),
                        })
                    }
                },
                "data" => match value {
                    Value::Array(items) => {
                        record.data = Some(items.into_iter().map(GridValue::from_json).collect())
                    }
                    other => {
                        return Err(StructuralError::Malformed {
                            what: "data",
                            expected: "an array",
                            found: json_kind(&other),
                        })
                    }
                },
                _ => {
                    record.extra.insert(key, value);
                }
            }
        }
        Ok(record)
    }

    /// Validate the header and payload length, returning the typed geometry.
    pub fn geometry(&self) -> Result<GridGeometry, StructuralError> {
        let header = self
            .header
            .as_ref()
            .ok_or(StructuralError::MissingSection("header"))?;
        let data = self
            .data
            .as_ref()
            .ok_or(StructuralError::MissingSection("data"))?;

        let geometry = GridGeometry::from_header(header)?;
        geometry.check_len(data.len())?;
        Ok(geometry)
    }

    /// Number of cells in the payload (0 when there is no payload).
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for GridRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let (mut wrote_header, mut wrote_data) = (false, false);

        for key in &self.key_order {
            match key.as_str() {
                "header" => {
                    if let Some(header) = &self.header {
                        map.serialize_entry(key, header)?;
                        wrote_header = true;
                    }
                }
                "data" => {
                    if let Some(data) = &self.data {
                        map.serialize_entry(key, data)?;
                        wrote_data = true;
                    }
                }
                _ => {
                    if let Some(value) = self.extra.get(key) {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
        }

        if let (false, Some(header)) = (wrote_header, &self.header) {
            map.serialize_entry("header", header)?;
        }
        if let (false, Some(data)) = (wrote_data, &self.data) {
            map.serialize_entry("data", data)?;
        }
        for (key, value) in &self.extra {
            if !self.key_order.contains(key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl TryFrom<Value> for GridRecord {
    type Error = StructuralError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl GridValue {
    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(n) => match n.as_f64() {
                Some(v) => Self::Present(v),
                None => Self::Malformed(Value::Number(n)),
            },
            other => Self::Malformed(other),
        }
    }
}

/// The validated, typed view of a record's grid header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Latitude of the first row (degrees).
    pub la1: f64,
    /// Latitude of the last row (degrees).
    pub la2: f64,
    /// Number of points along a row (longitude).
    pub nx: usize,
    /// Number of rows (latitude).
    pub ny: usize,
    /// Latitude spacing, as supplied.
    pub dy: f64,
}

impl GridGeometry {
    /// Extract and validate `la1, la2, nx, ny, dy` from a header object.
    pub fn from_header(header: &Map<String, Value>) -> Result<Self, StructuralError> {
        if let Some(missing) = REQUIRED_HEADER_FIELDS
            .into_iter()
            .find(|field| !header.contains_key(*field))
        {
            return Err(StructuralError::MissingField(missing));
        }

        let la1 = header_number(header, "la1")?;
        let la2 = header_number(header, "la2")?;
        let nx = header_number(header, "nx")?;
        let ny = header_number(header, "ny")?;
        let dy = header_number(header, "dy")?;

        if nx <= 0.0 || ny <= 0.0 {
            return Err(StructuralError::NonPositiveDimension { nx, ny });
        }

        let nx_count = dimension_count("nx", nx)?;
        let ny_count = dimension_count("ny", ny)?;
        if nx_count.checked_mul(ny_count).is_none() {
            return Err(StructuralError::DimensionOverflow { nx, ny });
        }

        Ok(Self {
            la1,
            la2,
            nx: nx_count,
            ny: ny_count,
            dy,
        })
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows already run north to south.
    pub fn is_canonical(&self) -> bool {
        self.la1 >= self.la2
    }

    /// Check a payload length against `nx * ny`.
    pub fn check_len(&self, actual: usize) -> Result<(), StructuralError> {
        let expected = self.len();
        if actual != expected {
            return Err(StructuralError::LengthMismatch {
                actual,
                nx: self.nx,
                ny: self.ny,
                expected,
            });
        }
        Ok(())
    }
}

/// Read a required numeric header field.
pub(crate) fn header_number(
    header: &Map<String, Value>,
    field: &'static str,
) -> Result<f64, StructuralError> {
    let value = header
        .get(field)
        .ok_or(StructuralError::MissingField(field))?;
    value.as_f64().ok_or_else(|| StructuralError::NonNumeric {
        field,
        value: value.to_string(),
    })
}

// Values past usize::MAX saturate and are caught by the checked `nx * ny`.
fn dimension_count(field: &'static str, value: f64) -> Result<usize, StructuralError> {
    if value.fract() != 0.0 {
        return Err(StructuralError::NonIntegralDimension { field, value });
    }
    Ok(value as usize)
}

/// Short name of a JSON value's kind, for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
