// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration: environment variables, then command-line flags.

use anyhow::{bail, Context, Result};
use geolint_topology::{Tolerances, ValidatorConfig};

/// Run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Feature snapshot to read.
    pub input: String,
    /// Admission extent as `[min_lon, min_lat, max_lon, max_lat]`.
    pub range: Option<[f64; 4]>,
    /// Print the report as JSON instead of text.
    pub json: bool,
    pub validator: ValidatorConfig,
}

impl Config {
    /// Load thresholds from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Tolerances::default();
        Self {
            input: String::new(),
            range: None,
            json: false,
            validator: ValidatorConfig {
                tolerances: Tolerances {
                    duplicate_epsilon_deg: env_or(
                        "GEOLINT_DUPLICATE_EPSILON_DEG",
                        defaults.duplicate_epsilon_deg,
                    ),
                    min_length_m: env_or("GEOLINT_MIN_LENGTH_M", defaults.min_length_m),
                    min_area_m2: env_or("GEOLINT_MIN_AREA_M2", defaults.min_area_m2),
                    dangle_threshold_m: env_or(
                        "GEOLINT_DANGLE_THRESHOLD_M",
                        defaults.dangle_threshold_m,
                    ),
                },
                parallel: env_or("GEOLINT_PARALLEL", false),
            },
        }
    }

    /// Apply command-line arguments (without the program name) on top.
    /// Returns `None` when help was requested.
    pub fn with_args<I>(mut self, args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut input = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--json" => self.json = true,
                "--parallel" => self.validator.parallel = true,
                "--range" => {
                    let value = args.next().context("--range needs a value")?;
                    self.range = Some(parse_range(&value)?);
                }
                other if other.starts_with('-') => bail!("unknown option: {other}"),
                other => {
                    if input.replace(other.to_string()).is_some() {
                        bail!("only one input file may be given");
                    }
                }
            }
        }

        self.input = input.context("missing input file")?;
        Ok(Some(self))
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_range(value: &str) -> Result<[f64; 4]> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>().with_context(|| format!("invalid range bound {p:?}")))
        .collect::<Result<Vec<_>>>()?;
    match parts.as_slice() {
        &[a, b, c, d] => Ok([a, b, c, d]),
        _ => bail!("--range takes min_lon,min_lat,max_lon,max_lat"),
    }
}
