// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoLint command line
//!
//! Reads a JSON snapshot of drawn features, admits each one through the
//! optional range extent and prints the validation report.
//!
//! Usage:
//!   geolint <features.json> [--range min_lon,min_lat,max_lon,max_lat] [--json] [--parallel]

mod config;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use config::Config;
use geolint_topology::{read_drafts, GeometryModel, RangeConstraint, TopologyValidator};
use tracing::{info, warn};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let Some(config) = Config::from_env().with_args(std::env::args().skip(1))? else {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    };

    let mut range = RangeConstraint::new();
    if let Some([min_lon, min_lat, max_lon, max_lat]) = config.range {
        range
            .set(min_lon, min_lat, max_lon, max_lat)
            .context("invalid --range")?;
    }

    let text =
        fs::read_to_string(&config.input).with_context(|| format!("reading {}", config.input))?;
    let drafts = read_drafts(&text).with_context(|| format!("parsing {}", config.input))?;

    let mut model = GeometryModel::new();
    let mut rejected = 0;
    for (i, result) in model.admit_all(&range, drafts).into_iter().enumerate() {
        if let Err(err) = result {
            warn!(draft = i + 1, "not admitted: {err}");
            rejected += 1;
        }
    }
    info!(admitted = model.len(), rejected, "features loaded");

    let report = TopologyValidator::new(config.validator).validate_model(&model, &range);
    if config.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_usage() {
    println!("Usage: geolint <features.json> [options]");
    println!();
    println!("Options:");
    println!("  --range MIN_LON,MIN_LAT,MAX_LON,MAX_LAT   only admit features inside this extent");
    println!("  --json                                    print the report as JSON");
    println!("  --parallel                                spread pair checks over all cores");
    println!();
    println!("Environment:");
    println!("  GEOLINT_DUPLICATE_EPSILON_DEG, GEOLINT_MIN_LENGTH_M, GEOLINT_MIN_AREA_M2,");
    println!("  GEOLINT_DANGLE_THRESHOLD_M, GEOLINT_PARALLEL, RUST_LOG");
    println!();
    println!("Exits with 1 when the report contains errors, 2 on failure.");
}
