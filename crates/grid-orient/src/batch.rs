//! Batch processing of grib2json record lists.
//!
//! Every record is reoriented (when it scans south to north) and rounded.
//! The first structural or processing error aborts the whole batch, so a
//! caller never receives a partially processed list.

use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::OrientConfig;
use crate::error::{BatchError, StructuralError};
use crate::reorient::{reorient_owned, ReorientAction};
use crate::rounding::round_values;
use crate::types::{header_number, GridRecord};

/// Counters describing what a batch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Records whose rows were reversed.
    pub flipped: usize,
    /// Single-row records whose header was swapped but data left alone.
    pub single_row: usize,
    /// Records already running north to south.
    pub canonical: usize,
    /// Records without `header.la1`/`header.la2`, copied through.
    pub skipped: usize,
    /// Data elements that were neither numbers nor `null`.
    pub malformed_values: usize,
}

impl BatchStats {
    fn record(&mut self, outcome: &RecordOutcome) {
        match outcome.action {
            Some(ReorientAction::Flipped { .. }) => self.flipped += 1,
            Some(ReorientAction::SingleRow) => self.single_row += 1,
            Some(ReorientAction::AlreadyCanonical) => self.canonical += 1,
            None => self.skipped += 1,
        }
        self.malformed_values += outcome.malformed;
    }
}

/// Processed records, in input order, plus a summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub records: Vec<GridRecord>,
    pub stats: BatchStats,
}

#[derive(Debug, Clone, Copy)]
struct RecordOutcome {
    /// `None` when the orientation check was skipped.
    action: Option<ReorientAction>,
    malformed: usize,
}

/// Reorient and round a list of raw grid records.
pub fn process_batch(records: Vec<Value>, config: &OrientConfig) -> Result<BatchReport, BatchError> {
    info!(
        records = records.len(),
        precision = config.precision,
        parallel = config.parallel,
        "Processing GRIB message(s)"
    );

    let processed: Vec<(GridRecord, RecordOutcome)> = if config.parallel {
        records
            .into_par_iter()
            .enumerate()
            .map(|(index, raw)| process_record(index, raw, config))
            .collect::<Result<_, _>>()?
    } else {
        records
            .into_iter()
            .enumerate()
            .map(|(index, raw)| process_record(index, raw, config))
            .collect::<Result<_, _>>()?
    };

    let mut stats = BatchStats::default();
    let records = processed
        .into_iter()
        .map(|(record, outcome)| {
            stats.record(&outcome);
            record
        })
        .collect();

    debug!(?stats, "Batch complete");
    Ok(BatchReport { records, stats })
}

fn process_record(
    index: usize,
    raw: Value,
    config: &OrientConfig,
) -> Result<(GridRecord, RecordOutcome), BatchError> {
    let record = GridRecord::from_value(raw).map_err(|e| BatchError::new(index, e))?;

    let (mut record, action) = match latitudes(&record).map_err(|e| BatchError::new(index, e))? {
        Some((la1, la2)) if la1 < la2 => {
            info!(index, la1, la2, "Adjusting message (la1 < la2)");
            let reoriented = reorient_owned(record).map_err(|e| BatchError::new(index, e))?;
            if reoriented.action == ReorientAction::SingleRow {
                warn!(
                    index,
                    "Only one latitude point (ny=1); data order remains unchanged"
                );
            }
            (reoriented.record, Some(reoriented.action))
        }
        Some(_) => {
            if config.strict {
                record.geometry().map_err(|e| BatchError::new(index, e))?;
            }
            (record, Some(ReorientAction::AlreadyCanonical))
        }
        None => {
            warn!(
                index,
                "Skipping latitude adjustment check due to missing header/latitude info"
            );
            if config.strict {
                record.geometry().map_err(|e| BatchError::new(index, e))?;
            }
            (record, None)
        }
    };

    let mut malformed = 0;
    if let Some(data) = record.data.take() {
        let rounded = round_values(data, config.precision);
        malformed = rounded.malformed.len();
        if malformed > 0 {
            warn!(
                index,
                malformed,
                first = rounded.malformed[0],
                "Could not round non-numeric data values; passing them through"
            );
        }
        record.data = Some(rounded.values);
    }

    Ok((record, RecordOutcome { action, malformed }))
}

/// The record's `(la1, la2)`.
///
/// `None` when the header or either latitude is absent; latitudes that are
/// present but not numbers are a structural error.
fn latitudes(record: &GridRecord) -> Result<Option<(f64, f64)>, StructuralError> {
    let Some(header) = record.header.as_ref() else {
        return Ok(None);
    };
    if !header.contains_key("la1") || !header.contains_key("la2") {
        return Ok(None);
    }

    let la1 = header_number(header, "la1")?;
    let la2 = header_number(header, "la2")?;
    Ok(Some((la1, la2)))
}
