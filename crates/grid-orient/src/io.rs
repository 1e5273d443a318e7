//! Reading and writing grib2json record lists.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::RecordIoError;
use crate::types::{json_kind, GridRecord};

/// Read a JSON file holding a list of grid records.
///
/// Records are returned as raw JSON values; per-record structure is checked
/// later so that errors can name the offending record.
pub fn read_records(path: &Path) -> Result<Vec<Value>, RecordIoError> {
    info!(path = %path.display(), "Reading input JSON");

    let bytes = fs::read(path).map_err(|source| RecordIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|source| RecordIoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(RecordIoError::NotAList {
            path: path.to_path_buf(),
            found: json_kind(&other),
        }),
    }
}

/// Encode records as JSON, compact (`,`/`:` separators, no whitespace) or
/// indented by two spaces.
pub fn encode_records<W: Write>(
    writer: W,
    records: &[GridRecord],
    pretty: bool,
) -> Result<(), serde_json::Error> {
    if pretty {
        serde_json::to_writer_pretty(writer, records)
    } else {
        serde_json::to_writer(writer, records)
    }
}

/// Write records to `path`.
///
/// Output goes to a temporary file next to `path` that is renamed into place
/// once fully written, so a failure never leaves a truncated output file.
/// An existing file keeps its permissions; a new one is created world-readable
/// (`0o644` on Unix) like a plain `File::create` under the usual umask.
pub fn write_records(path: &Path, records: &[GridRecord], pretty: bool) -> Result<(), RecordIoError> {
    info!(path = %path.display(), records = records.len(), pretty, "Writing output JSON");

    let write_err = |source: std::io::Error| RecordIoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;

    {
        let mut writer = BufWriter::new(file.as_file_mut());
        encode_records(&mut writer, records, pretty).map_err(RecordIoError::Encode)?;
        writer.flush().map_err(write_err)?;
    }

    if let Some(permissions) = output_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }

    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Permissions the output file should end up with.
///
/// Temporary files are created owner-only, which would otherwise leak into the
/// renamed output.
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    fs::metadata(path)
        .map(|meta| meta.permissions())
        .ok()
        .or_else(new_file_permissions)
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
