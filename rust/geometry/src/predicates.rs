// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OGC-style spatial predicates between two geometries.
//!
//! Semantics follow the DE-9IM definitions:
//!
//! - `intersects`: the geometries share at least one point.
//! - `crosses`: line/line interiors meet in isolated points only;
//!   line/polygon means the line runs both inside and outside the polygon.
//! - `overlaps`: same-dimension geometries share part of their interior, but
//!   neither contains the other.
//! - `contains(a, b)`: no point of `b` lies outside `a`, and the interiors
//!   meet.
//!
//! Each predicate has a `_within` form taking the coincidence tolerance in
//! meters; the plain form uses [`DUPLICATE_EPSILON_M`]. Every predicate
//! validates its input and returns an error for degenerate geometry instead
//! of guessing.

use nalgebra::Point2;

use crate::bool2d::{ring_difference_area, ring_intersection_area};
use crate::constants::{CONTAINMENT_TOLERANCE, DUPLICATE_EPSILON_M};
use crate::error::{Error, Result};
use crate::geodesy::{check_finite, great_circle, ring_area};
use crate::planar::{
    bounds_overlap, intersect_segments_within, point_segment_distance, Location,
    SegmentIntersection,
};
use crate::shape::{PlanarLine, PlanarRing};
use crate::types::{Coordinate, Geometry, RangeExtent};

/// Validated planar form of a geometry.
enum Shape {
    Point(Point2<f64>, Coordinate),
    Line(PlanarLine),
    Ring(PlanarRing),
}

impl Shape {
    fn new(geometry: &Geometry, epsilon_m: f64) -> Result<Self> {
        match geometry {
            Geometry::Point(c) => {
                check_finite(std::slice::from_ref(c))?;
                Ok(Shape::Point(c.to_planar(), *c))
            }
            Geometry::LineString(coords) => PlanarLine::new(coords, epsilon_m).map(Shape::Line),
            Geometry::Polygon(ring) => PlanarRing::new(ring, epsilon_m).map(Shape::Ring),
        }
    }

    fn pair(a: &Geometry, b: &Geometry, epsilon_m: f64) -> Result<(Self, Self)> {
        Ok((Shape::new(a, epsilon_m)?, Shape::new(b, epsilon_m)?))
    }
}

/// True when the geometries share at least one point.
pub fn intersects(a: &Geometry, b: &Geometry) -> Result<bool> {
    intersects_within(a, b, DUPLICATE_EPSILON_M)
}

pub fn intersects_within(a: &Geometry, b: &Geometry, epsilon_m: f64) -> Result<bool> {
    let (a, b) = Shape::pair(a, b, epsilon_m)?;
    Ok(match (&a, &b) {
        (Shape::Point(_, ca), Shape::Point(_, cb)) => great_circle(ca, cb) < epsilon_m,
        (Shape::Point(p, _), Shape::Line(l)) | (Shape::Line(l), Shape::Point(p, _)) => {
            point_on_line(p, l)
        }
        (Shape::Point(p, _), Shape::Ring(r)) | (Shape::Ring(r), Shape::Point(p, _)) => {
            r.locate(p) != Location::Outside
        }
        (Shape::Line(la), Shape::Line(lb)) => lines_touch(la, lb),
        (Shape::Line(l), Shape::Ring(r)) | (Shape::Ring(r), Shape::Line(l)) => {
            let c = classify_line(l, r);
            c.inside || c.boundary
        }
        (Shape::Ring(ra), Shape::Ring(rb)) => rings_touch(ra, rb),
    })
}

/// True when the geometries cross each other (see module docs).
///
/// Only line/line and line/polygon pairs can cross; every other pair is
/// `false`.
pub fn crosses(a: &Geometry, b: &Geometry) -> Result<bool> {
    crosses_within(a, b, DUPLICATE_EPSILON_M)
}

pub fn crosses_within(a: &Geometry, b: &Geometry, epsilon_m: f64) -> Result<bool> {
    let (a, b) = Shape::pair(a, b, epsilon_m)?;
    Ok(match (&a, &b) {
        (Shape::Line(la), Shape::Line(lb)) => {
            let m = line_meeting(la, lb);
            m.interior_point && !m.shared_run
        }
        (Shape::Line(l), Shape::Ring(r)) | (Shape::Ring(r), Shape::Line(l)) => {
            let c = classify_line(l, r);
            c.inside && c.outside
        }
        _ => false,
    })
}

/// True when same-dimension geometries partially share their interiors.
pub fn overlaps(a: &Geometry, b: &Geometry) -> Result<bool> {
    overlaps_within(a, b, DUPLICATE_EPSILON_M)
}

pub fn overlaps_within(a: &Geometry, b: &Geometry, epsilon_m: f64) -> Result<bool> {
    let (a, b) = Shape::pair(a, b, epsilon_m)?;
    Ok(match (&a, &b) {
        (Shape::Line(la), Shape::Line(lb)) => {
            line_meeting(la, lb).shared_run && !line_covers(la, lb) && !line_covers(lb, la)
        }
        (Shape::Ring(ra), Shape::Ring(rb)) => {
            let shared = ring_intersection_area(ra, rb)?;
            let smaller = ring_area(&ra.coords).min(ring_area(&rb.coords));
            shared > CONTAINMENT_TOLERANCE * smaller
                && !ring_contains(ra, rb)?
                && !ring_contains(rb, ra)?
        }
        _ => false,
    })
}

/// True when `a` contains `b`.
pub fn contains(a: &Geometry, b: &Geometry) -> Result<bool> {
    contains_within(a, b, DUPLICATE_EPSILON_M)
}

pub fn contains_within(a: &Geometry, b: &Geometry, epsilon_m: f64) -> Result<bool> {
    let (a, b) = Shape::pair(a, b, epsilon_m)?;
    Ok(match (&a, &b) {
        (Shape::Point(_, ca), Shape::Point(_, cb)) => great_circle(ca, cb) < epsilon_m,
        (Shape::Line(l), Shape::Point(p, _)) => point_on_line(p, l) && !l.is_boundary_point(p),
        (Shape::Line(la), Shape::Line(lb)) => line_covers(la, lb),
        (Shape::Ring(r), Shape::Point(p, _)) => r.locate(p) == Location::Inside,
        (Shape::Ring(r), Shape::Line(l)) => {
            let c = classify_line(l, r);
            c.inside && !c.outside
        }
        (Shape::Ring(ra), Shape::Ring(rb)) => ring_contains(ra, rb)?,
        _ => false,
    })
}

/// True when every coordinate of the geometry lies inside the inclusive
/// extent. Non-finite coordinates are never inside.
pub fn within(geometry: &Geometry, extent: &RangeExtent) -> bool {
    geometry
        .coordinates()
        .iter()
        .all(|c| extent.contains_coordinate(c))
}

/// `outer` contains `inner` when the part of `inner` outside `outer` is
/// negligible relative to `inner`'s area.
fn ring_contains(outer: &PlanarRing, inner: &PlanarRing) -> Result<bool> {
    let inner_area = ring_area(&inner.coords);
    if inner_area <= 0.0 {
        return Err(Error::Degenerate("contained ring has zero area".to_string()));
    }
    if !bounds_overlap(&outer.bounds, &inner.bounds, outer.epsilon_deg) {
        return Ok(false);
    }
    Ok(ring_difference_area(inner, outer)? <= CONTAINMENT_TOLERANCE * inner_area)
}

fn rings_touch(a: &PlanarRing, b: &PlanarRing) -> bool {
    let eps = a.epsilon_deg;
    if !bounds_overlap(&a.bounds, &b.bounds, eps) {
        return false;
    }
    let edges_meet = a.edges().any(|(a1, a2)| {
        b.edges().any(|(b1, b2)| {
            intersect_segments_within(a1, a2, b1, b2, eps) != SegmentIntersection::None
        })
    });
    edges_meet
        || b.locate(&a.points[0]) != Location::Outside
        || a.locate(&b.points[0]) != Location::Outside
}

fn lines_touch(a: &PlanarLine, b: &PlanarLine) -> bool {
    let eps = a.epsilon_deg;
    if !bounds_overlap(&a.bounds, &b.bounds, eps) {
        return false;
    }
    a.segments().any(|(a1, a2)| {
        b.segments().any(|(b1, b2)| {
            intersect_segments_within(a1, a2, b1, b2, eps) != SegmentIntersection::None
        })
    })
}

fn point_on_line(p: &Point2<f64>, line: &PlanarLine) -> bool {
    line.segments()
        .any(|(a, b)| point_segment_distance(p, a, b) <= line.epsilon_deg)
}

/// How two lines meet.
#[derive(Debug, Default)]
struct LineMeeting {
    /// Some isolated meeting point is interior to both lines.
    interior_point: bool,
    /// The lines share a run of positive length.
    shared_run: bool,
}

fn line_meeting(a: &PlanarLine, b: &PlanarLine) -> LineMeeting {
    let mut meeting = LineMeeting::default();
    let eps = a.epsilon_deg;
    if !bounds_overlap(&a.bounds, &b.bounds, eps) {
        return meeting;
    }

    for (a1, a2) in a.segments() {
        for (b1, b2) in b.segments() {
            match intersect_segments_within(a1, a2, b1, b2, eps) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { at, .. } => {
                    if !a.is_boundary_point(&at) && !b.is_boundary_point(&at) {
                        meeting.interior_point = true;
                    }
                }
                SegmentIntersection::Collinear { .. } => meeting.shared_run = true,
            }
        }
    }

    meeting
}

/// True when every part of `inner` lies on `outer`.
fn line_covers(outer: &PlanarLine, inner: &PlanarLine) -> bool {
    inner.points.iter().all(|p| point_on_line(p, outer))
        && inner
            .segments()
            .all(|(p, q)| point_on_line(&nalgebra::center(p, q), outer))
}

/// Where the pieces of a line fall relative to a ring.
#[derive(Debug, Default)]
struct LineClassification {
    inside: bool,
    outside: bool,
    boundary: bool,
}

/// Splits every line segment at its meetings with the ring and locates the
/// midpoint of each piece.
fn classify_line(line: &PlanarLine, ring: &PlanarRing) -> LineClassification {
    let mut class = LineClassification::default();

    for (p, q) in line.segments() {
        let mut cuts = vec![0.0, 1.0];
        for (r1, r2) in ring.edges() {
            match intersect_segments_within(p, q, r1, r2, ring.epsilon_deg) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { t, .. } => cuts.push(t),
                SegmentIntersection::Collinear { t0, t1 } => {
                    cuts.push(t0);
                    cuts.push(t1);
                }
            }
        }
        cuts.sort_by(|x, y| x.total_cmp(y));
        cuts.dedup_by(|x, y| (*x - *y).abs() < 1e-12);

        for w in cuts.windows(2) {
            let mid = *p + (q - p) * ((w[0] + w[1]) / 2.0);
            match ring.locate(&mid) {
                Location::Inside => class.inside = true,
                Location::Outside => class.outside = true,
                Location::Boundary => class.boundary = true,
            }
        }
    }

    class
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Geometry {
        Geometry::polygon([
            (x0, y0),
            (x0, y0 + size),
            (x0 + size, y0 + size),
            (x0 + size, y0),
            (x0, y0),
        ])
    }

    #[test]
    fn overlapping_polygons() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert!(intersects(&a, &b).unwrap());
        assert!(overlaps(&a, &b).unwrap());
        assert!(!contains(&a, &b).unwrap());
        assert!(!contains(&b, &a).unwrap());
    }

    #[test]
    fn containment_is_not_overlap() {
        let outer = square(0.0, 0.0, 1.0);
        let inner = square(0.25, 0.25, 0.5);
        assert!(contains(&outer, &inner).unwrap());
        assert!(!contains(&inner, &outer).unwrap());
        assert!(!overlaps(&outer, &inner).unwrap());
        assert!(!overlaps(&outer, &outer).unwrap());
    }

    #[test]
    fn touching_polygons_intersect_without_overlap() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);
        assert!(intersects(&a, &b).unwrap());
        assert!(!overlaps(&a, &b).unwrap());
        assert!(!intersects(&a, &square(3.0, 3.0, 1.0)).unwrap());
    }

    #[test]
    fn crossing_lines() {
        let a = Geometry::line([(0.0, 0.0), (2.0, 2.0)]);
        let b = Geometry::line([(0.0, 2.0), (2.0, 0.0)]);
        assert!(crosses(&a, &b).unwrap());
        assert!(intersects(&a, &b).unwrap());
    }

    #[test]
    fn endpoint_touch_is_not_a_crossing() {
        let a = Geometry::line([(0.0, 0.0), (1.0, 0.0)]);
        let t = Geometry::line([(0.5, 0.0), (0.5, 1.0)]);
        assert!(!crosses(&a, &t).unwrap());
        assert!(intersects(&a, &t).unwrap());

        let chained = Geometry::line([(1.0, 0.0), (2.0, 1.0)]);
        assert!(!crosses(&a, &chained).unwrap());
    }

    #[test]
    fn collinear_lines_overlap_not_cross() {
        let a = Geometry::line([(0.0, 0.0), (2.0, 0.0)]);
        let b = Geometry::line([(1.0, 0.0), (3.0, 0.0)]);
        assert!(!crosses(&a, &b).unwrap());
        assert!(overlaps(&a, &b).unwrap());

        let part = Geometry::line([(0.5, 0.0), (1.5, 0.0)]);
        assert!(contains(&a, &part).unwrap());
        assert!(!overlaps(&a, &part).unwrap());
    }

    #[test]
    fn line_against_polygon() {
        let poly = square(0.0, 0.0, 1.0);
        let through = Geometry::line([(-0.5, 0.5), (1.5, 0.5)]);
        let inside = Geometry::line([(0.2, 0.2), (0.8, 0.8)]);
        let outside = Geometry::line([(2.0, 2.0), (3.0, 3.0)]);
        let along_edge = Geometry::line([(0.0, 0.2), (0.0, 0.8)]);

        assert!(crosses(&through, &poly).unwrap());
        assert!(crosses(&poly, &through).unwrap());
        assert!(!crosses(&inside, &poly).unwrap());
        assert!(contains(&poly, &inside).unwrap());
        assert!(!contains(&poly, &through).unwrap());
        assert!(!intersects(&outside, &poly).unwrap());
        assert!(intersects(&along_edge, &poly).unwrap());
        assert!(!contains(&poly, &along_edge).unwrap());
    }

    #[test]
    fn point_predicates() {
        let poly = square(0.0, 0.0, 1.0);
        assert!(contains(&poly, &Geometry::point(0.5, 0.5)).unwrap());
        assert!(!contains(&poly, &Geometry::point(1.0, 0.5)).unwrap());
        assert!(intersects(&poly, &Geometry::point(1.0, 0.5)).unwrap());
        assert!(!crosses(&Geometry::point(0.5, 0.5), &poly).unwrap());
    }

    #[test]
    fn within_extent() {
        let extent = RangeExtent::new(0.0, 0.0, 10.0, 10.0);
        assert!(within(&Geometry::point(5.0, 5.0), &extent));
        assert!(!within(&Geometry::point(15.0, 5.0), &extent));
        assert!(!within(&Geometry::line([(5.0, 5.0), (11.0, 5.0)]), &extent));
        assert!(within(&square(0.0, 0.0, 10.0), &extent));
    }

    #[test]
    fn degenerate_input_is_an_error() {
        let empty = Geometry::LineString(Vec::new());
        let poly = square(0.0, 0.0, 1.0);
        assert!(matches!(intersects(&empty, &poly), Err(Error::EmptyGeometry { .. })));

        let nan = Geometry::point(f64::NAN, 0.0);
        assert!(matches!(contains(&poly, &nan), Err(Error::NonFiniteCoordinate { index: 0 })));
    }

    #[test]
    fn tolerance_widens_and_narrows_coincidence() {
        let poly = square(0.0, 0.0, 1.0);
        let just_off = Geometry::point(1.0 + 5e-7, 0.5);
        assert!(intersects(&poly, &just_off).unwrap());
        assert!(!intersects_within(&poly, &just_off, 0.01).unwrap());

        let a = Geometry::point(0.0, 0.0);
        let b = Geometry::point(0.0, 5e-6);
        assert!(!intersects(&a, &b).unwrap());
        assert!(intersects_within(&a, &b, 1.0).unwrap());
        assert!(contains_within(&a, &b, 1.0).unwrap());
    }
}
