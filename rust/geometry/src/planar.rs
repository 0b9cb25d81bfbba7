// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar primitives in the lon/lat plane.
//!
//! Incidence (does a segment cross another, is a point inside a ring) is
//! invariant under the smooth lon/lat chart for the small features this crate
//! targets, so topology is decided here while all measurements go through
//! [`crate::geodesy`].

use nalgebra::{Point2, Vector2};

use crate::constants::{DUPLICATE_EPSILON_DEG, PARAM_EPSILON};

/// Relative tolerance for treating two directions as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

#[inline]
pub(crate) fn cross(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Outcome of intersecting two closed segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    None,
    /// Single shared point; `t` and `u` are its parameters on the first and
    /// second segment.
    Point { at: Point2<f64>, t: f64, u: f64 },
    /// Collinear overlap of positive length, as a parameter interval on the
    /// first segment.
    Collinear { t0: f64, t1: f64 },
}

/// Intersects segment `p1-p2` with segment `q1-q2` at the default
/// coincidence tolerance.
pub fn intersect_segments(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
) -> SegmentIntersection {
    intersect_segments_within(p1, p2, q1, q2, DUPLICATE_EPSILON_DEG)
}

/// [`intersect_segments`] treating points closer than `epsilon_deg` as one.
pub fn intersect_segments_within(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
    epsilon_deg: f64,
) -> SegmentIntersection {
    let r = p2 - p1;
    let s = q2 - q1;
    let qp = q1 - p1;
    let rr = r.dot(&r);
    let ss = s.dot(&s);

    // Zero-length segments degrade to point-on-segment tests
    if rr == 0.0 {
        return point_on_segment_param(p1, q1, q2, epsilon_deg)
            .map(|u| SegmentIntersection::Point { at: *p1, t: 0.0, u })
            .unwrap_or(SegmentIntersection::None);
    }
    if ss == 0.0 {
        return point_on_segment_param(q1, p1, p2, epsilon_deg)
            .map(|t| SegmentIntersection::Point { at: *q1, t, u: 0.0 })
            .unwrap_or(SegmentIntersection::None);
    }

    let denom = cross(&r, &s);
    if denom.abs() <= PARALLEL_EPSILON * (rr * ss).sqrt() {
        // Parallel: only collinear segments can meet
        if cross(&qp, &r).abs() / rr.sqrt() > epsilon_deg {
            return SegmentIntersection::None;
        }

        let t_a = qp.dot(&r) / rr;
        let t_b = t_a + s.dot(&r) / rr;
        let lo = t_a.min(t_b).max(0.0);
        let hi = t_a.max(t_b).min(1.0);
        if lo > hi + PARAM_EPSILON {
            return SegmentIntersection::None;
        }
        if (hi - lo) * rr.sqrt() <= epsilon_deg {
            let at = *p1 + r * lo;
            let u = ((at - *q1).dot(&s) / ss).clamp(0.0, 1.0);
            return SegmentIntersection::Point { at, t: lo, u };
        }
        return SegmentIntersection::Collinear { t0: lo, t1: hi };
    }

    let t = cross(&qp, &s) / denom;
    let u = cross(&qp, &r) / denom;
    let range = -PARAM_EPSILON..=1.0 + PARAM_EPSILON;
    if range.contains(&t) && range.contains(&u) {
        let t = t.clamp(0.0, 1.0);
        SegmentIntersection::Point {
            at: *p1 + r * t,
            t,
            u: u.clamp(0.0, 1.0),
        }
    } else {
        SegmentIntersection::None
    }
}

/// Parameter of `p` on segment `a-b` when `p` lies on it (within tolerance).
fn point_on_segment_param(
    p: &Point2<f64>,
    a: &Point2<f64>,
    b: &Point2<f64>,
    epsilon_deg: f64,
) -> Option<f64> {
    let ab = b - a;
    let len2 = ab.dot(&ab);
    let t = if len2 == 0.0 {
        0.0
    } else {
        ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
    };
    let closest = *a + ab * t;
    ((*p - closest).norm() <= epsilon_deg).then_some(t)
}

/// Distance from `p` to segment `a-b` in plane units.
pub fn point_segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(&ab);
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (*p - (*a + ab * t)).norm()
}

/// Position of a point relative to a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Inside,
    Outside,
    Boundary,
}

/// Locates a point against an open ring (implicitly closed).
pub fn locate(point: &Point2<f64>, ring: &[Point2<f64>]) -> Location {
    locate_within(point, ring, DUPLICATE_EPSILON_DEG)
}

/// [`locate`] with points closer than `epsilon_deg` to an edge on the boundary.
pub fn locate_within(point: &Point2<f64>, ring: &[Point2<f64>], epsilon_deg: f64) -> Location {
    let n = ring.len();
    if n < 3 {
        return Location::Outside;
    }

    for i in 0..n {
        if point_segment_distance(point, &ring[i], &ring[(i + 1) % n]) <= epsilon_deg {
            return Location::Boundary;
        }
    }

    // Ray casting
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &ring[i];
        let pj = &ring[j];

        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    if inside {
        Location::Inside
    } else {
        Location::Outside
    }
}

/// Signed shoelace area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Point2<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let n = ring.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += ring[i].x * ring[j].y;
        area -= ring[j].x * ring[i].y;
    }

    area * 0.5
}

/// Axis-aligned bounds of a point set.
pub fn bounds(points: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;

    for p in points.iter().skip(1) {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Some((min, max))
}

/// Check if two bounding boxes overlap, allowing `slack` of separation.
pub fn bounds_overlap(
    a: &(Point2<f64>, Point2<f64>),
    b: &(Point2<f64>, Point2<f64>),
    slack: f64,
) -> bool {
    a.0.x <= b.1.x + slack
        && a.1.x + slack >= b.0.x
        && a.0.y <= b.1.y + slack
        && a.1.y + slack >= b.0.y
}
