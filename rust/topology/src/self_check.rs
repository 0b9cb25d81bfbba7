// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-feature validity checks.

use geolint_geometry::ring::{duplicate_vertex_pairs, ring_defects, RingDefect};
use geolint_geometry::{self as geometry, Coordinate, Geometry};
use tracing::debug;

use crate::config::Tolerances;
use crate::feature::Feature;
use crate::violation::{Measure, Violation, ViolationKind};

/// Findings for one feature.
#[derive(Debug, Default)]
pub(crate) struct SelfCheck {
    pub violations: Vec<Violation>,
    /// False when the geometry is malformed (non-finite coordinate, too few
    /// vertices) and must stay out of the pairwise scan.
    pub pair_eligible: bool,
}

pub(crate) fn check_feature(feature: &Feature, tol: &Tolerances) -> SelfCheck {
    let id = feature.id();

    if let Some(index) = feature.geometry().first_non_finite() {
        return SelfCheck {
            violations: vec![Violation::single(
                ViolationKind::InvalidCoordinate,
                id,
                format!("coordinate {index} is not a finite number"),
            )],
            pair_eligible: false,
        };
    }

    match feature.geometry() {
        Geometry::Point(_) => SelfCheck {
            violations: Vec::new(),
            pair_eligible: true,
        },
        Geometry::LineString(coords) => check_line(feature, coords, tol),
        Geometry::Polygon(ring) => check_polygon(feature, ring, tol),
    }
}

fn check_polygon(feature: &Feature, ring: &[Coordinate], tol: &Tolerances) -> SelfCheck {
    let id = feature.id();
    let mut violations = Vec::new();

    for defect in ring_defects(ring, tol.duplicate_epsilon_m()) {
        match defect {
            RingDefect::NonFiniteCoordinate { index } => {
                violations.push(Violation::single(
                    ViolationKind::InvalidCoordinate,
                    id,
                    format!("coordinate {index} is not a finite number"),
                ));
                return SelfCheck {
                    violations,
                    pair_eligible: false,
                };
            }
            RingDefect::TooFewVertices { found } => {
                violations.push(Violation::single(
                    ViolationKind::TooFewVertices,
                    id,
                    format!("polygon ring has {found} distinct vertices, at least 3 are required"),
                ));
                return SelfCheck {
                    violations,
                    pair_eligible: false,
                };
            }
            RingDefect::Unclosed { gap_m } => violations.push(
                Violation::single(
                    ViolationKind::UnclosedRing,
                    id,
                    "first and last vertex of the ring differ",
                )
                .with_measure(Measure::Distance(gap_m)),
            ),
            RingDefect::SelfIntersection { at } => violations.push(Violation::single(
                ViolationKind::SelfIntersection,
                id,
                format!("ring intersects itself at {at}"),
            )),
        }
    }

    match geometry::area(ring) {
        Ok(area) if area < tol.min_area_m2 => violations.push(
            Violation::single(
                ViolationKind::DegenerateArea,
                id,
                format!("polygon area is below {} m²", tol.min_area_m2),
            )
            .with_measure(Measure::Area(area)),
        ),
        Ok(_) => {}
        Err(err) => debug!(feature = %id, error = %err, "polygon area unavailable"),
    }

    SelfCheck {
        violations,
        pair_eligible: true,
    }
}

fn check_line(feature: &Feature, coords: &[Coordinate], tol: &Tolerances) -> SelfCheck {
    let id = feature.id();

    if coords.len() < 2 {
        return SelfCheck {
            violations: vec![Violation::single(
                ViolationKind::TooFewVertices,
                id,
                format!("line has {} vertices, at least 2 are required", coords.len()),
            )],
            pair_eligible: false,
        };
    }

    let mut violations = Vec::new();

    match geometry::length(coords) {
        Ok(length) if length < tol.min_length_m => violations.push(
            Violation::single(
                ViolationKind::DegenerateLength,
                id,
                format!("line is shorter than {} m", tol.min_length_m),
            )
            .with_measure(Measure::Length(length)),
        ),
        Ok(_) => {}
        Err(err) => debug!(feature = %id, error = %err, "line length unavailable"),
    }

    for (i, j, d) in duplicate_vertex_pairs(coords, tol.duplicate_epsilon_m()) {
        violations.push(
            Violation::single(
                ViolationKind::DuplicateVertex,
                id,
                format!("vertices {i} and {j} coincide"),
            )
            .with_measure(Measure::Distance(d)),
        );
    }

    SelfCheck {
        violations,
        pair_eligible: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::FeatureId;

    fn feature(geometry: Geometry) -> Feature {
        Feature::new(FeatureId(1), geometry, None)
    }

    fn kinds(check: &SelfCheck) -> Vec<ViolationKind> {
        check.violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn valid_triangle_is_clean() {
        let f = feature(Geometry::polygon([(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, 0.0)]));
        let check = check_feature(&f, &Tolerances::default());
        assert!(check.violations.is_empty());
        assert!(check.pair_eligible);
    }

    #[test]
    fn unclosed_ring_only() {
        let f = feature(Geometry::polygon([(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]));
        let check = check_feature(&f, &Tolerances::default());
        assert_eq!(kinds(&check), vec![ViolationKind::UnclosedRing]);
        assert!(check.pair_eligible);
    }

    #[test]
    fn figure_eight_ring_self_intersects() {
        // Lobes of unequal size so the net area stays well above the minimum
        let f = feature(Geometry::polygon([
            (0.0, 0.0),
            (0.01, 0.01),
            (0.01, 0.0),
            (0.0, 0.03),
            (0.0, 0.0),
        ]));
        let check = check_feature(&f, &Tolerances::default());
        assert_eq!(kinds(&check), vec![ViolationKind::SelfIntersection]);
        assert_eq!(check.violations[0].features.as_slice(), &[FeatureId(1)]);
        assert!(check.pair_eligible);
    }

    #[test]
    fn two_vertex_ring_is_excluded_from_pairs() {
        let f = feature(Geometry::polygon([(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]));
        let check = check_feature(&f, &Tolerances::default());
        assert_eq!(kinds(&check), vec![ViolationKind::TooFewVertices]);
        assert!(!check.pair_eligible);
    }

    #[test]
    fn tiny_polygon_area() {
        // About 0.5 m on a side
        let s = 0.5 / geolint_geometry::METERS_PER_DEGREE;
        let f = feature(Geometry::polygon([(0.0, 0.0), (0.0, s), (s, s), (s, 0.0), (0.0, 0.0)]));
        let check = check_feature(&f, &Tolerances::default());
        assert_eq!(kinds(&check), vec![ViolationKind::DegenerateArea]);
    }

    #[test]
    fn line_checks() {
        let single = feature(Geometry::line([(0.0, 0.0)]));
        let check = check_feature(&single, &Tolerances::default());
        assert_eq!(kinds(&check), vec![ViolationKind::TooFewVertices]);
        assert!(!check.pair_eligible);

        let short = feature(Geometry::line([(0.0, 0.0), (0.0, 0.0000005)]));
        let check = check_feature(&short, &Tolerances::default());
        assert_eq!(
            kinds(&check),
            vec![ViolationKind::DegenerateLength, ViolationKind::DuplicateVertex]
        );

        let doubled_back =
            feature(Geometry::line([(0.0, 0.0), (0.001, 0.0), (0.0, 0.0), (0.0, 0.001)]));
        let check = check_feature(&doubled_back, &Tolerances::default());
        assert_eq!(kinds(&check), vec![ViolationKind::DuplicateVertex]);
    }

    #[test]
    fn non_finite_point() {
        let f = feature(Geometry::point(f64::INFINITY, 0.0));
        let check = check_feature(&f, &Tolerances::default());
        assert_eq!(kinds(&check), vec![ViolationKind::InvalidCoordinate]);
        assert!(!check.pair_eligible);
    }
}
