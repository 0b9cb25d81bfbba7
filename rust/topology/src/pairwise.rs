// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pairwise consistency rules, dispatched on the geometry-kind pair.
//!
//! Each rule is a pure function of two features that returns zero or more
//! findings. A predicate failure turns the whole pair into a single
//! "check inconclusive" finding; it never stops the scan.

use geolint_geometry::ring::open_ring_within;
use geolint_geometry::{self as geometry, great_circle, predicates, Coordinate, Geometry};
use tracing::{trace, warn};

use crate::config::Tolerances;
use crate::feature::Feature;
use crate::violation::{Measure, Violation, ViolationKind};

/// Runs every rule that applies to the pair.
pub(crate) fn check_pair(a: &Feature, b: &Feature, tol: &Tolerances) -> Vec<Violation> {
    match evaluate_pair(a, b, tol) {
        Ok(found) => found,
        Err(err) => {
            warn!(a = %a.id(), b = %b.id(), error = %err, "pair check inconclusive");
            vec![Violation::pair(
                ViolationKind::CheckInconclusive,
                a.id(),
                b.id(),
                format!("{} / {} check could not be computed: {err}", a.kind(), b.kind()),
            )]
        }
    }
}

fn evaluate_pair(a: &Feature, b: &Feature, tol: &Tolerances) -> geometry::Result<Vec<Violation>> {
    match (a.geometry(), b.geometry()) {
        (Geometry::Point(pa), Geometry::Point(pb)) => points(a, b, pa, pb, tol),
        (Geometry::LineString(la), Geometry::LineString(lb)) => lines(a, b, la, lb, tol),
        (Geometry::Polygon(ra), Geometry::Polygon(rb)) => polygons(a, b, ra, rb, tol),
        (Geometry::LineString(_), Geometry::Polygon(_)) => line_polygon(a, b, tol),
        (Geometry::Polygon(_), Geometry::LineString(_)) => line_polygon(b, a, tol),
        (Geometry::Point(_), _) | (_, Geometry::Point(_)) => {
            trace!(a = %a.id(), b = %b.id(), "no rule for {} / {}", a.kind(), b.kind());
            Ok(Vec::new())
        }
    }
}

fn points(
    a: &Feature,
    b: &Feature,
    pa: &Coordinate,
    pb: &Coordinate,
    tol: &Tolerances,
) -> geometry::Result<Vec<Violation>> {
    let d = geometry::distance(pa, pb)?;
    if d < tol.duplicate_epsilon_m() {
        return Ok(vec![Violation::pair(
            ViolationKind::PointsCoincide,
            a.id(),
            b.id(),
            format!("points {} and {} are at the same position", a.id(), b.id()),
        )
        .with_measure(Measure::Distance(d))]);
    }
    Ok(Vec::new())
}

fn lines(
    a: &Feature,
    b: &Feature,
    la: &[Coordinate],
    lb: &[Coordinate],
    tol: &Tolerances,
) -> geometry::Result<Vec<Violation>> {
    let eps = tol.duplicate_epsilon_m();
    if predicates::crosses_within(a.geometry(), b.geometry(), eps)? {
        return Ok(vec![Violation::pair(
            ViolationKind::LineCrossing,
            a.id(),
            b.id(),
            format!("lines {} and {} cross", a.id(), b.id()),
        )]);
    }

    let (Some(a0), Some(a1), Some(b0), Some(b1)) = (la.first(), la.last(), lb.first(), lb.last())
    else {
        return Ok(Vec::new());
    };

    let distances = [
        great_circle(a0, b0),
        great_circle(a0, b1),
        great_circle(a1, b0),
        great_circle(a1, b1),
    ];
    let coincident = distances.iter().filter(|&&d| d < eps).count();
    let nearest = distances.iter().copied().fold(f64::INFINITY, f64::min);

    if coincident == 0 && nearest < tol.dangle_threshold_m {
        return Ok(vec![Violation::pair(
            ViolationKind::DanglingEndpoint,
            a.id(),
            b.id(),
            format!(
                "endpoints of {} and {} nearly meet but are not snapped",
                a.id(),
                b.id()
            ),
        )
        .with_measure(Measure::Distance(nearest))]);
    }

    if coincident == 1 {
        return Ok(vec![Violation::pair(
            ViolationKind::SingleEndpointConnection,
            a.id(),
            b.id(),
            format!("{} and {} connect through a single endpoint", a.id(), b.id()),
        )]);
    }

    Ok(Vec::new())
}

fn polygons(
    a: &Feature,
    b: &Feature,
    ra: &[Coordinate],
    rb: &[Coordinate],
    tol: &Tolerances,
) -> geometry::Result<Vec<Violation>> {
    let (ga, gb) = (a.geometry(), b.geometry());
    let eps = tol.duplicate_epsilon_m();
    let mut found = Vec::new();

    let shared_area = geometry::intersection_area_within(ra, rb, eps)?;
    let a_contains_b = predicates::contains_within(ga, gb, eps)?;
    let b_contains_a = predicates::contains_within(gb, ga, eps)?;

    if a_contains_b || b_contains_a {
        let (outer, inner, outer_ring, inner_ring) = if a_contains_b {
            (a, b, ra, rb)
        } else {
            (b, a, rb, ra)
        };
        let outer_area = geometry::area(outer_ring)?;
        if outer_area <= 0.0 {
            return Err(geometry::Error::Degenerate(format!(
                "containing polygon {} has zero area",
                outer.id()
            )));
        }
        let percent = (geometry::area(inner_ring)? / outer_area * 100.0).min(100.0);
        found.push(
            Violation::pair(
                ViolationKind::PolygonContainment,
                a.id(),
                b.id(),
                format!("{} lies within {}", inner.id(), outer.id()),
            )
            .with_measure(Measure::Percentage(percent)),
        );
    } else if shared_area >= tol.min_area_m2 && predicates::overlaps_within(ga, gb, eps)? {
        found.push(
            Violation::pair(
                ViolationKind::PolygonOverlap,
                a.id(),
                b.id(),
                format!("{} and {} overlap", a.id(), b.id()),
            )
            .with_measure(Measure::Area(shared_area)),
        );
    }

    let gap = geometry::gap_area_within(ra, rb, eps)?;
    if gap >= tol.min_area_m2 {
        found.push(
            Violation::pair(
                ViolationKind::PolygonGap,
                a.id(),
                b.id(),
                format!("uncovered sliver enclosed between {} and {}", a.id(), b.id()),
            )
            .with_measure(Measure::Area(gap)),
        );
    }

    if shared_area < tol.min_area_m2 && !a_contains_b && !b_contains_a {
        let shared = shared_vertex_count(ra, rb, eps);
        if shared >= 2 {
            found.push(Violation::pair(
                ViolationKind::SharedBoundary,
                a.id(),
                b.id(),
                format!("{} and {} share {shared} boundary vertices", a.id(), b.id()),
            ));
        }
    }

    Ok(found)
}

fn line_polygon(
    line: &Feature,
    polygon: &Feature,
    tol: &Tolerances,
) -> geometry::Result<Vec<Violation>> {
    let (gl, gp) = (line.geometry(), polygon.geometry());
    let eps = tol.duplicate_epsilon_m();

    if predicates::crosses_within(gl, gp, eps)? {
        return Ok(vec![Violation::pair(
            ViolationKind::BoundaryCrossing,
            line.id(),
            polygon.id(),
            format!("line {} crosses the boundary of {}", line.id(), polygon.id()),
        )]);
    }

    if predicates::contains_within(gp, gl, eps)? {
        return Ok(vec![Violation::pair(
            ViolationKind::LineWithinPolygon,
            line.id(),
            polygon.id(),
            format!("line {} lies inside {}", line.id(), polygon.id()),
        )]);
    }

    Ok(Vec::new())
}

/// Number of vertices of `a` that coincide with some vertex of `b`.
fn shared_vertex_count(a: &[Coordinate], b: &[Coordinate], epsilon_m: f64) -> usize {
    let (a, b) = (open_ring_within(a, epsilon_m), open_ring_within(b, epsilon_m));
    a.iter()
        .filter(|va| b.iter().any(|vb| great_circle(va, vb) < epsilon_m))
        .count()
}
