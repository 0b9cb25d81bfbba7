// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical constants and default validation thresholds.

use std::f64::consts::PI;

/// Mean Earth radius (IUGG), meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle length of one degree of arc on the mean sphere.
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * PI / 180.0;

/// Two coordinates closer than this (in degrees) are the same point.
pub const DUPLICATE_EPSILON_DEG: f64 = 1e-6;

/// [`DUPLICATE_EPSILON_DEG`] expressed as a ground distance (~0.11 m).
pub const DUPLICATE_EPSILON_M: f64 = DUPLICATE_EPSILON_DEG * METERS_PER_DEGREE;

/// Lines shorter than this are degenerate.
pub const MIN_LENGTH_M: f64 = 0.1;

/// Polygons (and overlap/gap regions) smaller than this are ignored.
pub const MIN_AREA_M2: f64 = 1.0;

/// Line endpoints closer than this, but not coincident, are likely dangles.
pub const DANGLE_THRESHOLD_M: f64 = 1.0;

/// Smallest allowed span of a range extent on either axis.
pub const MIN_EXTENT_SPAN_DEG: f64 = 0.001;

/// Relative area residue under which one polygon is considered to contain another.
pub const CONTAINMENT_TOLERANCE: f64 = 1e-6;

/// Tolerance for segment parameters in planar intersection tests.
pub(crate) const PARAM_EPSILON: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_epsilon_is_about_a_decimeter() {
        assert!(DUPLICATE_EPSILON_M > 0.1 && DUPLICATE_EPSILON_M < 0.12);
    }
}
