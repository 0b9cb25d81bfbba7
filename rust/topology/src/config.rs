// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation thresholds and run options.

use geolint_geometry::{
    DANGLE_THRESHOLD_M, DUPLICATE_EPSILON_DEG, METERS_PER_DEGREE, MIN_AREA_M2, MIN_LENGTH_M,
};
use serde::{Deserialize, Serialize};

/// Thresholds applied by the validator. Missing fields deserialize to the
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Coordinates closer than this many degrees are the same point.
    pub duplicate_epsilon_deg: f64,
    /// Minimum line length in meters.
    pub min_length_m: f64,
    /// Minimum polygon, overlap and gap area in square meters.
    pub min_area_m2: f64,
    /// Endpoint distance in meters under which a near-miss is a dangle.
    pub dangle_threshold_m: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            duplicate_epsilon_deg: DUPLICATE_EPSILON_DEG,
            min_length_m: MIN_LENGTH_M,
            min_area_m2: MIN_AREA_M2,
            dangle_threshold_m: DANGLE_THRESHOLD_M,
        }
    }
}

impl Tolerances {
    /// Duplicate epsilon as a ground distance.
    #[inline]
    pub fn duplicate_epsilon_m(&self) -> f64 {
        self.duplicate_epsilon_deg * METERS_PER_DEGREE
    }
}

/// Options for a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub tolerances: Tolerances,
    /// Shard the pairwise scan across the rayon thread pool. Ignored on wasm32.
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let t: Tolerances = serde_json::from_str(r#"{"min_area_m2": 5.0}"#).unwrap();
        assert_eq!(t.min_area_m2, 5.0);
        assert_eq!(t.min_length_m, MIN_LENGTH_M);
        assert!((t.duplicate_epsilon_m() - geolint_geometry::DUPLICATE_EPSILON_M).abs() < 1e-12);
    }
}
