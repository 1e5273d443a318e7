//! Integration tests: orientation invariants over grib2json-shaped records.
//!
//! Each test builds raw JSON the way grib2json writes it, runs it through the
//! public API and checks one of the guarantees downstream map layers rely on.

use grid_orient::{
    process_batch, reorient, GridRecord, GridValue, OrientConfig, ReorientAction, ReorientError,
    StructuralError,
};
use serde_json::{json, Value};
use test_utils::grid::{EUROPE_SOUTH_UP, GFS_1P00, GFS_1P00_SOUTH_UP, SINGLE_ROW};
use test_utils::{
    assert_approx_eq, assert_decimal_places, create_flipped_test_grid, create_grid_with_missing,
    create_test_grid, create_wind_component_grid, grib2json_record, minimal_record, to_json_data,
    without_header_field,
};

fn decode(raw: Value) -> GridRecord {
    GridRecord::from_value(raw).unwrap()
}

fn present(record: &GridRecord) -> Vec<Option<f64>> {
    record
        .data
        .as_ref()
        .unwrap()
        .iter()
        .map(GridValue::as_f64)
        .collect()
}

fn latitudes(record: &GridRecord) -> (f64, f64) {
    let header = record.header.as_ref().unwrap();
    (
        header["la1"].as_f64().unwrap(),
        header["la2"].as_f64().unwrap(),
    )
}

// ============================================================================
// Reorienter
// ============================================================================

#[test]
fn test_row_reversal_reference_case() {
    let input = decode(minimal_record(10.0, 30.0, 2, 3, 10.0, json!([1, 2, 3, 4, 5, 6])));
    let out = reorient(&input).unwrap().record;

    assert_eq!(latitudes(&out), (30.0, 10.0));
    assert_eq!(out.header.as_ref().unwrap()["dy"], 10.0);
    assert_eq!(
        present(&out),
        vec![Some(5.0), Some(6.0), Some(3.0), Some(4.0), Some(1.0), Some(2.0)]
    );
}

#[test]
fn test_flip_regional_grid() {
    let spec = EUROPE_SOUTH_UP;
    let input = decode(grib2json_record(
        &spec,
        to_json_data(&create_test_grid(spec.nx, spec.ny)),
    ));
    let out = reorient(&input).unwrap();

    assert_eq!(out.action, ReorientAction::Flipped { rows: spec.ny });
    let (la1, la2) = latitudes(&out.record);
    assert!(la1 >= la2);
    assert_eq!((la1, la2), (spec.la2, spec.la1));
    assert_eq!(out.record.header.as_ref().unwrap()["dy"], spec.dy);
    assert_eq!(out.record.len(), spec.size());

    let expected: Vec<Option<f64>> = create_flipped_test_grid(spec.nx, spec.ny)
        .into_iter()
        .map(Some)
        .collect();
    assert_eq!(present(&out.record), expected);
}

#[test]
fn test_passthrough_header_fields_survive_flip() {
    let spec = EUROPE_SOUTH_UP;
    let raw = grib2json_record(&spec, to_json_data(&create_test_grid(spec.nx, spec.ny)));
    let out = reorient(&decode(raw.clone())).unwrap().record;

    let before = raw["header"].as_object().unwrap();
    let after = out.header.as_ref().unwrap();
    let keys_before: Vec<&String> = before.keys().collect();
    let keys_after: Vec<&String> = after.keys().collect();
    assert_eq!(keys_before, keys_after);

    for key in ["refTime", "parameterNumberName", "scanMode", "lo1", "lo2", "dx", "nx", "ny"] {
        assert_eq!(before[key], after[key], "header field {key} changed");
    }
}

#[test]
fn test_canonical_grid_unchanged() {
    let spec = GFS_1P00;
    let input = decode(grib2json_record(
        &spec,
        to_json_data(&create_wind_component_grid(spec.nx, spec.ny)),
    ));
    let out = reorient(&input).unwrap();

    assert_eq!(out.action, ReorientAction::AlreadyCanonical);
    assert_eq!(out.record, input);
}

#[test]
fn test_single_row_header_only() {
    let spec = SINGLE_ROW;
    let data = create_test_grid(spec.nx, spec.ny);
    let input = decode(grib2json_record(&spec, to_json_data(&data)));
    let out = reorient(&input).unwrap();

    assert_eq!(out.action, ReorientAction::SingleRow);
    assert_eq!(latitudes(&out.record), (20.0, 10.0));
    assert_eq!(
        present(&out.record),
        data.into_iter().map(Some).collect::<Vec<_>>()
    );
}

#[test]
fn test_output_independent_of_input() {
    let input = decode(minimal_record(0.0, 1.0, 1, 2, 1.0, json!([1.0, 2.0])));
    let mut out = reorient(&input).unwrap().record;

    out.data.as_mut().unwrap()[0] = GridValue::Missing;
    out.header
        .as_mut()
        .unwrap()
        .insert("la1".to_string(), json!(-45.0));

    assert_eq!(present(&input), vec![Some(1.0), Some(2.0)]);
    assert_eq!(latitudes(&input), (0.0, 1.0));
}

#[test]
fn test_missing_markers_relocated_with_rows() {
    let (nx, ny) = (3, 4);
    let grid = create_grid_with_missing(nx, ny, &[(0, 0), (2, 1), (1, 3)]);
    let input = decode(minimal_record(-30.0, 30.0, nx, ny, 20.0, to_json_data(&grid)));
    let out = reorient(&input).unwrap().record;

    let values = present(&out);
    assert_eq!(values.iter().filter(|v| v.is_none()).count(), 3);
    for row in 0..ny {
        let source_row = ny - 1 - row;
        assert_eq!(
            values[row * nx..(row + 1) * nx],
            grid[source_row * nx..(source_row + 1) * nx]
        );
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_length_mismatch_names_both_lengths() {
    let input = decode(minimal_record(10.0, 30.0, 2, 3, 10.0, json!([1, 2, 3, 4, 5])));
    let err = reorient(&input).unwrap_err();

    assert_eq!(
        err,
        ReorientError::Structural(StructuralError::LengthMismatch {
            actual: 5,
            nx: 2,
            ny: 3,
            expected: 6
        })
    );
    let message = err.to_string();
    assert!(message.contains("(5)"));
    assert!(message.contains("= 6"));
}

#[test]
fn test_each_missing_header_field_is_named() {
    let raw = minimal_record(10.0, 30.0, 1, 1, 10.0, json!([1]));
    for field in ["la1", "la2", "nx", "ny", "dy"] {
        let input = decode(without_header_field(&raw, field));
        assert_eq!(
            reorient(&input).unwrap_err(),
            ReorientError::Structural(StructuralError::MissingField(field)),
        );
    }
}

#[test]
fn test_missing_sections_rejected() {
    let no_data = decode(json!({"header": {"la1": 0, "la2": 1, "nx": 1, "ny": 1, "dy": 1}}));
    assert_eq!(
        reorient(&no_data).unwrap_err(),
        ReorientError::Structural(StructuralError::MissingSection("data"))
    );

    let no_header = decode(json!({"data": [1]}));
    assert_eq!(
        reorient(&no_header).unwrap_err(),
        ReorientError::Structural(StructuralError::MissingSection("header"))
    );
}

#[test]
fn test_non_positive_dimensions_rejected() {
    let input = decode(minimal_record(0.0, 1.0, 0, 3, 1.0, json!([])));
    let err = reorient(&input).unwrap_err();
    assert!(err.to_string().contains("nx (0) and ny (3) must be positive"));
}

// ============================================================================
// Batch driver
// ============================================================================

#[test]
fn test_batch_rounds_everything_to_two_places() {
    let spec = EUROPE_SOUTH_UP;
    let raw = grib2json_record(
        &spec,
        to_json_data(&create_wind_component_grid(spec.nx, spec.ny)),
    );
    let report = process_batch(vec![raw], &OrientConfig::default()).unwrap();

    let out = &report.records[0];
    assert_eq!(out.len(), spec.size());
    for value in present(out).into_iter().flatten() {
        assert_decimal_places!(value, 2);
    }
}

#[test]
fn test_batch_flips_global_grid_within_rounding() {
    let spec = GFS_1P00_SOUTH_UP;
    let raw_values = create_wind_component_grid(spec.nx, spec.ny);
    let raw = grib2json_record(&spec, to_json_data(&raw_values));
    let report = process_batch(vec![raw], &OrientConfig::default()).unwrap();

    assert_eq!(report.stats.flipped, 1);
    let out = &report.records[0];
    assert_eq!(latitudes(out), (90.0, -90.0));

    let values = present(out);
    for row in 0..spec.ny {
        let source_row = spec.ny - 1 - row;
        for col in [0, spec.nx / 2, spec.nx - 1] {
            let value = values[row * spec.nx + col].unwrap();
            assert_approx_eq!(value, raw_values[source_row * spec.nx + col], 0.005 + 1e-9);
        }
    }
}

#[test]
fn test_batch_rounding_matches_reordered_values() {
    let (nx, ny) = (4, 3);
    let raw_values = create_wind_component_grid(nx, ny);
    let raw = minimal_record(0.0, 10.0, nx, ny, 5.0, to_json_data(&raw_values));
    let report = process_batch(vec![raw], &OrientConfig::default()).unwrap();

    let values = present(&report.records[0]);
    for row in 0..ny {
        let source_row = ny - 1 - row;
        for col in 0..nx {
            let expected = grid_orient::round_to(raw_values[source_row * nx + col], 2);
            assert_eq!(values[row * nx + col], Some(expected));
        }
    }
}

#[test]
fn test_batch_fail_fast_discards_valid_records() {
    let good = minimal_record(10.0, 30.0, 2, 3, 10.0, json!([1, 2, 3, 4, 5, 6]));
    let bad = minimal_record(10.0, 30.0, 2, 3, 10.0, json!([1, 2, 3]));
    let batch = vec![good.clone(), bad, good];

    let err = process_batch(batch, &OrientConfig::default()).unwrap_err();
    assert_eq!(err.index, 1);
    assert!(err.source.is_structural());
}

#[test]
fn test_parallel_batch_preserves_order() {
    let batch: Vec<Value> = (0..32)
        .map(|i| {
            let base = i as f64;
            minimal_record(0.0, 1.0, 1, 2, 1.0, json!([base, base + 0.5]))
        })
        .collect();
    let config = OrientConfig {
        parallel: true,
        ..Default::default()
    };
    let report = process_batch(batch, &config).unwrap();

    assert_eq!(report.stats.flipped, 32);
    for (i, record) in report.records.iter().enumerate() {
        let base = i as f64;
        assert_eq!(present(record), vec![Some(base + 0.5), Some(base)]);
    }
}

#[test]
fn test_parallel_batch_still_fails_fast() {
    let mut batch: Vec<Value> = (0..16)
        .map(|_| minimal_record(0.0, 1.0, 1, 2, 1.0, json!([1, 2])))
        .collect();
    batch[9] = minimal_record(0.0, 1.0, 1, 2, 1.0, json!([1]));

    let config = OrientConfig {
        parallel: true,
        ..Default::default()
    };
    let err = process_batch(batch, &config).unwrap_err();
    assert_eq!(err.index, 9);
}
