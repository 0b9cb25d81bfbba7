// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex-sequence diagnostics: ring closure, distinct vertices, duplicate
//! vertices and self-intersection.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::constants::{DUPLICATE_EPSILON_DEG, DUPLICATE_EPSILON_M};
use crate::geodesy::{great_circle, meters_to_degrees};
use crate::planar::{intersect_segments_within, SegmentIntersection};
use crate::types::Coordinate;

/// A reason a polygon ring is not valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RingDefect {
    NonFiniteCoordinate { index: usize },
    TooFewVertices { found: usize },
    /// First and last vertex differ; `gap_m` is their distance.
    Unclosed { gap_m: f64 },
    SelfIntersection { at: Coordinate },
}

/// Drops a closing vertex that repeats the first one.
pub fn open_ring(ring: &[Coordinate]) -> Vec<Coordinate> {
    open_ring_within(ring, DUPLICATE_EPSILON_M)
}

/// [`open_ring`] with an explicit coincidence tolerance in meters.
pub fn open_ring_within(ring: &[Coordinate], epsilon_m: f64) -> Vec<Coordinate> {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && great_circle(first, last) < epsilon_m => {
            ring[..ring.len() - 1].to_vec()
        }
        _ => ring.to_vec(),
    }
}

/// Removes consecutive vertices that coincide with their predecessor.
pub fn dedup_consecutive(coords: &[Coordinate], epsilon_m: f64) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for c in coords {
        match out.last() {
            Some(prev) if great_circle(prev, c) < epsilon_m => {}
            _ => out.push(*c),
        }
    }
    out
}

/// Number of vertices that are pairwise farther apart than `epsilon_m`.
pub fn distinct_vertex_count(coords: &[Coordinate], epsilon_m: f64) -> usize {
    let mut reps: Vec<&Coordinate> = Vec::new();
    for c in coords {
        if !reps.iter().any(|r| great_circle(r, c) < epsilon_m) {
            reps.push(c);
        }
    }
    reps.len()
}

/// Every vertex pair `(i, j, distance_m)` with `i < j` closer than `epsilon_m`.
pub fn duplicate_vertex_pairs(coords: &[Coordinate], epsilon_m: f64) -> Vec<(usize, usize, f64)> {
    let mut pairs = Vec::new();
    for i in 0..coords.len() {
        for j in (i + 1)..coords.len() {
            let d = great_circle(&coords[i], &coords[j]);
            if d < epsilon_m {
                pairs.push((i, j, d));
            }
        }
    }
    pairs
}

/// First point where the implicitly closed ring touches or crosses itself.
///
/// Adjacent edges may share their common vertex; anything more (including a
/// spike that doubles back along the previous edge) is a self-intersection.
pub fn first_self_intersection(open: &[Coordinate]) -> Option<Coordinate> {
    first_self_intersection_within(open, DUPLICATE_EPSILON_DEG)
}

/// [`first_self_intersection`] with an explicit coincidence tolerance in
/// degrees.
pub fn first_self_intersection_within(open: &[Coordinate], epsilon_deg: f64) -> Option<Coordinate> {
    let pts: Vec<Point2<f64>> = open.iter().map(|c| c.to_planar()).collect();
    let n = pts.len();
    if n < 3 {
        return None;
    }

    for i in 0..n {
        let (a1, a2) = (&pts[i], &pts[(i + 1) % n]);
        for j in (i + 1)..n {
            let (b1, b2) = (&pts[j], &pts[(j + 1) % n]);
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);

            match intersect_segments_within(a1, a2, b1, b2, epsilon_deg) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { at, .. } => {
                    if !adjacent {
                        return Some(Coordinate::from_planar(&at));
                    }
                }
                SegmentIntersection::Collinear { t0, t1 } => {
                    let at = *a1 + (a2 - a1) * ((t0 + t1) / 2.0);
                    return Some(Coordinate::from_planar(&at));
                }
            }
        }
    }

    None
}

/// Lists every defect of a polygon ring.
///
/// A ring with a non-finite coordinate or fewer than three distinct vertices
/// reports only that defect. Otherwise closure and self-intersection are
/// checked independently, with an unclosed ring treated as implicitly closed.
pub fn ring_defects(ring: &[Coordinate], epsilon_m: f64) -> Vec<RingDefect> {
    if let Some(index) = ring.iter().position(|c| !c.is_finite()) {
        return vec![RingDefect::NonFiniteCoordinate { index }];
    }

    let distinct = distinct_vertex_count(ring, epsilon_m);
    if distinct < 3 {
        return vec![RingDefect::TooFewVertices { found: distinct }];
    }

    let mut defects = Vec::new();

    // distinct >= 3 guarantees first/last exist
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        let gap_m = great_circle(first, last);
        if gap_m >= epsilon_m {
            defects.push(RingDefect::Unclosed { gap_m });
        }
    }

    let open = dedup_consecutive(&open_ring_within(ring, epsilon_m), epsilon_m);
    if let Some(at) = first_self_intersection_within(&open, meters_to_degrees(epsilon_m)) {
        defects.push(RingDefect::SelfIntersection { at });
    }

    defects
}

/// True for a closed ring with at least three distinct vertices that does
/// not intersect itself.
pub fn is_valid_ring(ring: &[Coordinate]) -> bool {
    ring_defects(ring, DUPLICATE_EPSILON_M).is_empty()
}
