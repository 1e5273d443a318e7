//! North-to-south reorientation of grid records.
//!
//! Leaflet Velocity and similar consumers infer a north-to-south scan from
//! `la1 >= la2` and expect `dy` to be the positive grid spacing. Records that
//! scan south to north (`la1 < la2`) get their latitude endpoints swapped and
//! their rows reversed. `dy` is never touched.
//!
//! ```text
//!   la1 = 10 ┌─────────┐ row 0           la1 = 30 ┌─────────┐ row 0 (was 2)
//!            │  1   2  │                          │  5   6  │
//!            │  3   4  │        ──►               │  3   4  │
//!            │  5   6  │                          │  1   2  │
//!   la2 = 30 └─────────┘ row 2           la2 = 10 └─────────┘ row 2 (was 0)
//! ```

use serde_json::{Map, Value};

use crate::error::{ReorientError, Result};
use crate::types::GridRecord;

/// What [`reorient_owned`] did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorientAction {
    /// `la1 >= la2` already; the record is returned as-is.
    AlreadyCanonical,
    /// Latitudes swapped and `rows` rows reversed.
    Flipped { rows: usize },
    /// Latitudes swapped, but the grid has a single row so the data is
    /// unchanged. Callers should surface this as a warning.
    SingleRow,
}

/// A reoriented record together with the action taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Reoriented {
    pub record: GridRecord,
    pub action: ReorientAction,
}

/// Reorient a borrowed record, leaving the input untouched.
pub fn reorient(record: &GridRecord) -> Result<Reoriented> {
    reorient_owned(record.clone())
}

/// Reorient a record, taking ownership of it.
///
/// The record is fully validated before anything is changed. Canonical
/// records come back without any copying.
pub fn reorient_owned(mut record: GridRecord) -> Result<Reoriented> {
    let geometry = record.geometry()?;

    if geometry.is_canonical() {
        return Ok(Reoriented {
            record,
            action: ReorientAction::AlreadyCanonical,
        });
    }

    if let Some(header) = record.header.as_mut() {
        swap_latitudes(header);
    }

    let action = if geometry.ny == 1 {
        ReorientAction::SingleRow
    } else {
        let data = record
            .data
            .as_mut()
            .ok_or_else(|| ReorientError::processing("data payload disappeared after validation"))?;
        reverse_rows(data, geometry.nx, geometry.ny)?;
        ReorientAction::Flipped { rows: geometry.ny }
    };

    Ok(Reoriented { record, action })
}

/// Swap the raw `la1`/`la2` header values, keeping their JSON form.
fn swap_latitudes(header: &mut Map<String, Value>) {
    if let (Some(la1), Some(la2)) = (header.get("la1").cloned(), header.get("la2").cloned()) {
        header.insert("la1".to_string(), la2);
        header.insert("la2".to_string(), la1);
    }
}

/// Reverse the order of `ny` rows of `nx` elements in a row-major slice.
///
/// Column order within each row is preserved.
pub fn reverse_rows<T>(data: &mut [T], nx: usize, ny: usize) -> Result<()> {
    let expected = nx.checked_mul(ny);
    if nx == 0 || expected != Some(data.len()) {
        return Err(ReorientError::processing(format!(
            "cannot split {} values into {} rows of {}",
            data.len(),
            ny,
            nx
        )));
    }

    for top in 0..ny / 2 {
        let bottom = ny - 1 - top;
        let (head, tail) = data.split_at_mut(bottom * nx);
        head[top * nx..(top + 1) * nx].swap_with_slice(&mut tail[..nx]);
    }
    Ok(())
}
