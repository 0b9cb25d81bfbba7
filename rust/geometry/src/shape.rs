// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized planar views of lines and rings used by the predicates.
//!
//! Each view carries the coincidence tolerance it was built with, so every
//! later incidence test agrees with the normalization.

use nalgebra::Point2;

use crate::error::{Error, Result};
use crate::geodesy::{check_finite, great_circle, meters_to_degrees};
use crate::planar::{bounds, locate_within, signed_area, Location};
use crate::ring::{dedup_consecutive, distinct_vertex_count, open_ring_within};
use crate::types::{Coordinate, GeometryKind};

pub(crate) type Bounds = (Point2<f64>, Point2<f64>);

/// A polygon ring without closing vertex or repeated consecutive vertices.
#[derive(Debug, Clone)]
pub(crate) struct PlanarRing {
    pub coords: Vec<Coordinate>,
    pub points: Vec<Point2<f64>>,
    pub bounds: Bounds,
    /// Coincidence tolerance in degrees.
    pub epsilon_deg: f64,
}

impl PlanarRing {
    /// Normalizes `ring`, merging vertices closer than `epsilon_m`.
    pub fn new(ring: &[Coordinate], epsilon_m: f64) -> Result<Self> {
        if ring.is_empty() {
            return Err(Error::EmptyGeometry {
                kind: GeometryKind::Polygon,
            });
        }
        check_finite(ring)?;

        let coords = dedup_consecutive(&open_ring_within(ring, epsilon_m), epsilon_m);
        let distinct = distinct_vertex_count(&coords, epsilon_m);
        if distinct < 3 {
            return Err(Error::TooFewVertices {
                kind: GeometryKind::Polygon,
                found: distinct,
                required: 3,
            });
        }

        let epsilon_deg = meters_to_degrees(epsilon_m);
        let points: Vec<Point2<f64>> = coords.iter().map(|c| c.to_planar()).collect();
        if signed_area(&points).abs() < epsilon_deg * epsilon_deg {
            return Err(Error::Degenerate("polygon ring encloses no area".to_string()));
        }

        let bounds =
            bounds(&points).ok_or_else(|| Error::Degenerate("ring has no bounds".to_string()))?;
        Ok(Self {
            coords,
            points,
            bounds,
            epsilon_deg,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (&self.points[i], &self.points[(i + 1) % n]))
    }

    #[inline]
    pub fn locate(&self, p: &Point2<f64>) -> Location {
        locate_within(p, &self.points, self.epsilon_deg)
    }

    /// Path in i_overlay format.
    pub fn path(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }
}

/// A polyline without repeated consecutive vertices.
#[derive(Debug, Clone)]
pub(crate) struct PlanarLine {
    pub points: Vec<Point2<f64>>,
    pub bounds: Bounds,
    /// A closed line has no boundary points.
    pub closed: bool,
    /// Coincidence tolerance in degrees.
    pub epsilon_deg: f64,
}

impl PlanarLine {
    /// Normalizes `line`, merging consecutive vertices closer than `epsilon_m`.
    pub fn new(line: &[Coordinate], epsilon_m: f64) -> Result<Self> {
        if line.is_empty() {
            return Err(Error::EmptyGeometry {
                kind: GeometryKind::LineString,
            });
        }
        check_finite(line)?;
        if line.len() < 2 {
            return Err(Error::TooFewVertices {
                kind: GeometryKind::LineString,
                found: line.len(),
                required: 2,
            });
        }

        let coords = dedup_consecutive(line, epsilon_m);
        if coords.len() < 2 {
            return Err(Error::Degenerate(
                "line string collapses to a single point".to_string(),
            ));
        }

        let closed =
            coords.len() > 2 && great_circle(&coords[0], &coords[coords.len() - 1]) < epsilon_m;
        let points: Vec<Point2<f64>> = coords.iter().map(|c| c.to_planar()).collect();
        let bounds =
            bounds(&points).ok_or_else(|| Error::Degenerate("line has no bounds".to_string()))?;

        Ok(Self {
            points,
            bounds,
            closed,
            epsilon_deg: meters_to_degrees(epsilon_m),
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> + '_ {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// True when `p` is one of the line's boundary points (its endpoints,
    /// unless the line is closed).
    pub fn is_boundary_point(&self, p: &Point2<f64>) -> bool {
        if self.closed {
            return false;
        }
        let first = &self.points[0];
        let last = &self.points[self.points.len() - 1];
        (p - first).norm() <= self.epsilon_deg || (p - last).norm() <= self.epsilon_deg
    }
}
