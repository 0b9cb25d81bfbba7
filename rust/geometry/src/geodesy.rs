// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spherical metrics: great-circle distance, line length and ring area.
//!
//! All results are in meters / square meters on the mean Earth sphere, so they
//! stay meaningful regardless of latitude or display projection.

use crate::constants::{EARTH_RADIUS_M, METERS_PER_DEGREE};
use crate::error::{Error, Result};
use crate::ring::open_ring;
use crate::types::{Coordinate, Geometry, GeometryKind};

/// Haversine distance between two finite coordinates, in meters.
#[inline]
pub fn great_circle(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Converts a ground distance to degrees of arc on the mean sphere.
#[inline]
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Great-circle distance in meters.
pub fn distance(a: &Coordinate, b: &Coordinate) -> Result<f64> {
    if !a.is_finite() {
        return Err(Error::NonFiniteCoordinate { index: 0 });
    }
    if !b.is_finite() {
        return Err(Error::NonFiniteCoordinate { index: 1 });
    }
    Ok(great_circle(a, b))
}

/// Length of a polyline in meters.
pub fn length(line: &[Coordinate]) -> Result<f64> {
    check_finite(line)?;
    if line.len() < 2 {
        return Err(Error::TooFewVertices {
            kind: GeometryKind::LineString,
            found: line.len(),
            required: 2,
        });
    }
    Ok(line.windows(2).map(|w| great_circle(&w[0], &w[1])).sum())
}

/// Area enclosed by a polygon ring in square meters.
///
/// The ring may or may not repeat its first vertex. Uses the spherical
/// excess approximation of Chamberlain & Duquette (JPL, 2007), which is exact
/// for rings whose edges follow parallels and meridians and accurate to well
/// under a percent for user-drawn polygons.
pub fn area(ring: &[Coordinate]) -> Result<f64> {
    check_finite(ring)?;
    let open = open_ring(ring);
    if open.len() < 3 {
        return Err(Error::TooFewVertices {
            kind: GeometryKind::Polygon,
            found: open.len(),
            required: 3,
        });
    }
    Ok(ring_area(&open))
}

/// Spherical area of an open ring (no closing vertex). Rings with fewer than
/// three vertices have zero area.
pub(crate) fn ring_area(open: &[Coordinate]) -> f64 {
    let n = open.len();
    if n < 3 {
        return 0.0;
    }

    let mut total = 0.0;
    for i in 0..n {
        let lower = &open[i];
        let middle = &open[(i + 1) % n];
        let upper = &open[(i + 2) % n];
        total += (upper.lon.to_radians() - lower.lon.to_radians()) * middle.lat.to_radians().sin();
    }

    (total * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// Measures a geometry: length for lines, area for polygons, zero for points.
pub fn measure(geometry: &Geometry) -> Result<f64> {
    match geometry {
        Geometry::Point(c) => {
            check_finite(std::slice::from_ref(c))?;
            Ok(0.0)
        }
        Geometry::LineString(coords) => length(coords),
        Geometry::Polygon(ring) => area(ring),
    }
}

pub(crate) fn check_finite(coords: &[Coordinate]) -> Result<()> {
    match coords.iter().position(|c| !c.is_finite()) {
        Some(index) => Err(Error::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    #[test]
    fn one_degree_of_meridian() {
        let d = distance(&c(0.0, 0.0), &c(0.0, 1.0)).unwrap();
        assert_relative_eq!(d, METERS_PER_DEGREE, max_relative = 1e-9);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let equator = great_circle(&c(0.0, 0.0), &c(1.0, 0.0));
        let sixty = great_circle(&c(0.0, 60.0), &c(1.0, 60.0));
        assert_relative_eq!(sixty / equator, 0.5, max_relative = 1e-3);
    }

    #[test]
    fn distance_rejects_nan() {
        assert!(distance(&c(f64::NAN, 0.0), &c(0.0, 0.0)).is_err());
    }

    #[test]
    fn length_sums_segments() {
        let line = [c(0.0, 0.0), c(0.0, 1.0), c(0.0, 2.0)];
        assert_relative_eq!(length(&line).unwrap(), 2.0 * METERS_PER_DEGREE, max_relative = 1e-9);
        assert!(matches!(
            length(&line[..1]),
            Err(Error::TooFewVertices { found: 1, .. })
        ));
    }

    #[test]
    fn triangle_area_at_equator() {
        let ring = [c(0.0, 0.0), c(0.0, 1.0), c(1.0, 0.0), c(0.0, 0.0)];
        let a = area(&ring).unwrap();
        // Small near-equatorial triangle is close to its planar counterpart
        let planar = METERS_PER_DEGREE * METERS_PER_DEGREE / 2.0;
        assert_relative_eq!(a, planar, max_relative = 5e-3);
    }

    #[test]
    fn area_independent_of_winding_and_closure() {
        let ccw = [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0)];
        let cw = [c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0), c(1.0, 0.0), c(0.0, 0.0)];
        assert_relative_eq!(area(&ccw).unwrap(), area(&cw).unwrap(), max_relative = 1e-12);
    }

    #[test]
    fn area_of_degenerate_ring_is_error() {
        assert!(area(&[]).is_err());
        assert!(area(&[c(0.0, 0.0), c(1.0, 1.0), c(0.0, 0.0)]).is_err());
    }
}
