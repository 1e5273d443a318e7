//! grib2json latitude flipper.
//!
//! Reads a grib2json record list, makes every grid run north to south
//! (`la1 >= la2`, rows reversed, `dy` untouched), rounds data values and
//! writes the result. Any malformed record aborts the run before the output
//! file is touched.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use grid_orient::{process_batch, read_records, write_records, OrientConfig};

#[derive(Parser, Debug)]
#[command(name = "flip-lat")]
#[command(about = "Adjusts grib2json output for libraries like Leaflet Velocity")]
#[command(
    long_about = "Ensures la1 > la2 for north-to-south grids by swapping la1/la2 and \
                  reversing data rows where needed, keeping dy as supplied. Rounds all \
                  data values (2 decimal places by default) and writes compact JSON \
                  unless --pretty is given."
)]
struct Args {
    /// Path to the input JSON file (from grib2json)
    input_json: PathBuf,

    /// Path to save the modified JSON file
    output_json: PathBuf,

    /// Output JSON with indentation for readability (increases file size)
    #[arg(short, long)]
    pretty: bool,

    /// Decimal places kept in data values [env: FLIP_LAT_PRECISION, default: 2]
    #[arg(long)]
    precision: Option<u32>,

    /// Validate every record, including ones that need no flip
    #[arg(long)]
    strict: bool,

    /// Process records in parallel
    #[arg(long)]
    parallel: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Environment config with command-line overrides applied.
    fn config(&self) -> OrientConfig {
        let mut config = OrientConfig::from_env();
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        config.pretty |= self.pretty;
        config.strict |= self.strict;
        config.parallel |= self.parallel;
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.json_logs)?;

    let config = args.config();
    config.validate().map_err(|e| anyhow!(e))?;

    let records = read_records(&args.input_json)?;
    let report = process_batch(records, &config)?;

    info!(
        flipped = report.stats.flipped,
        single_row = report.stats.single_row,
        canonical = report.stats.canonical,
        skipped = report.stats.skipped,
        malformed_values = report.stats.malformed_values,
        "Processed GRIB message(s)"
    );

    write_records(&args.output_json, &report.records, config.pretty)
        .with_context(|| format!("could not save {} records", report.records.len()))?;

    info!("Processing complete");
    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
