// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end validation scenarios over a populated model.

use std::sync::atomic::AtomicBool;

use approx::assert_relative_eq;
use geolint_geometry::{self as geometry, Coordinate, Geometry, EARTH_RADIUS_M, METERS_PER_DEGREE};
use geolint_topology::{
    ConstraintConfigError, Error, FeatureDraft, GeometryModel, Measure, RangeConstraint, Severity,
    Tolerances, TopologyValidator, ValidatorConfig, ViolationKind,
};

fn validate(model: &GeometryModel) -> geolint_topology::ValidationReport {
    TopologyValidator::default().validate(model.list())
}

/// Chamberlain–Duquette ring area, written out independently.
fn spherical_area(ring: &[(f64, f64)]) -> f64 {
    let n = ring.len() - 1;
    let mut sum = 0.0;
    for i in 0..n {
        let (l1, p1) = ring[i];
        let (l2, p2) = ring[i + 1];
        sum += (l2 - l1).to_radians() * (2.0 + p1.to_radians().sin() + p2.to_radians().sin());
    }
    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

#[test]
fn validation_is_idempotent() {
    let mut model = GeometryModel::new();
    model.add(Geometry::polygon([(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]), None);
    model.add(Geometry::polygon([(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]), None);
    model.add(Geometry::line([(5.0, 5.0), (6.0, 6.0)]), None);
    model.add(Geometry::line([(5.0, 6.0), (6.0, 5.0)]), None);
    model.add(Geometry::point(10.0, 20.0), None);
    model.add(Geometry::point(10.0000001, 20.0000001), None);

    let first = validate(&model);
    let second = validate(&model);
    assert!(!first.violations.is_empty());
    assert_eq!(first, second);
}

#[test]
fn valid_triangle() {
    let ring = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, 0.0)];
    let mut model = GeometryModel::new();
    let id = model.add(Geometry::polygon(ring), None);

    let report = validate(&model);
    assert!(report.violations.is_empty(), "{report}");
    assert!(report.is_valid());

    let area = model.get(id).and_then(|f| f.area()).unwrap().unwrap();
    assert_relative_eq!(area, spherical_area(&ring), max_relative = 1e-9);
    assert_relative_eq!(area, 6.18e9, max_relative = 0.01);
}

#[test]
fn unclosed_ring() {
    let mut model = GeometryModel::new();
    let id = model.add(Geometry::polygon([(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]), None);

    let report = validate(&model);
    assert_eq!(report.violations.len(), 1, "{report}");
    let v = &report.violations[0];
    assert_eq!(v.kind, ViolationKind::UnclosedRing);
    assert_eq!(v.features.as_slice(), &[id]);
    assert!(report.highlighted.contains(&id));
}

#[test]
fn duplicate_points() {
    let mut model = GeometryModel::new();
    let a = model.add(Geometry::point(10.0, 20.0), None);
    let b = model.add(Geometry::point(10.0000001, 20.0000001), None);

    let report = validate(&model);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].kind, ViolationKind::PointsCoincide);
    assert_eq!(report.violations[0].features.as_slice(), &[a, b]);

    // Edit = remove + add; move the second point 10 m north.
    model.remove(b).unwrap();
    model.add(Geometry::point(10.0, 20.0 + 10.0 / METERS_PER_DEGREE), None);
    assert!(validate(&model).violations.is_empty());
}

#[test]
fn overlapping_squares() {
    let mut model = GeometryModel::new();
    let a = model.add(Geometry::polygon([(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]), None);
    let b = model.add(Geometry::polygon([(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]), None);

    let report = validate(&model);
    let overlaps: Vec<_> = report.of_kind(ViolationKind::PolygonOverlap).collect();
    assert_eq!(overlaps.len(), 1, "{report}");
    assert_eq!(overlaps[0].features.as_slice(), &[a, b]);

    let unit = geometry::area(&[
        Coordinate::new(1.0, 1.0),
        Coordinate::new(1.0, 2.0),
        Coordinate::new(2.0, 2.0),
        Coordinate::new(2.0, 1.0),
        Coordinate::new(1.0, 1.0),
    ])
    .unwrap();
    match overlaps[0].measure {
        Some(Measure::Area(shared)) => assert_relative_eq!(shared, unit, max_relative = 1e-6),
        other => panic!("unexpected measure {other:?}"),
    }

    // Both rings are drawn open.
    assert_eq!(report.of_kind(ViolationKind::UnclosedRing).count(), 2);
}

#[test]
fn range_admission() {
    let mut range = RangeConstraint::new();
    range.set(0.0, 0.0, 10.0, 10.0).unwrap();
    assert!(range.contains(&Geometry::point(5.0, 5.0)));
    assert!(!range.contains(&Geometry::point(15.0, 5.0)));

    let before = range.clone();
    let err = range.set(10.0, 0.0, 0.0, 10.0).unwrap_err();
    assert!(matches!(err, ConstraintConfigError::Inverted { .. }));
    assert_eq!(range, before);

    let mut model = GeometryModel::new();
    let results = model.admit_all(
        &range,
        vec![
            FeatureDraft::new(Geometry::point(5.0, 5.0)),
            FeatureDraft::new(Geometry::line([(5.0, 5.0), (11.0, 5.0)])),
        ],
    );
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::OutOfRange { .. })));
    assert_eq!(model.len(), 1);

    let report = TopologyValidator::default().validate_model(&model, &range);
    assert_eq!(report.range, range.extent().copied());
    assert!(report.to_string().contains("range:"));
}

#[test]
fn dangling_line() {
    let gap = 0.5 / METERS_PER_DEGREE;
    let mut model = GeometryModel::new();
    model.add(Geometry::line([(0.0, 0.0), (0.01, 0.0)]), None);
    model.add(Geometry::line([(0.01 + gap, 0.0), (0.02, 0.01)]), None);

    let report = validate(&model);
    assert_eq!(report.violations.len(), 1, "{report}");
    let v = &report.violations[0];
    assert_eq!(v.kind, ViolationKind::DanglingEndpoint);
    assert_eq!(v.severity, Severity::Warning);
    match v.measure {
        Some(Measure::Distance(d)) => assert_relative_eq!(d, 0.5, max_relative = 1e-3),
        other => panic!("unexpected measure {other:?}"),
    }
}

#[test]
fn degenerate_pair_is_inconclusive_and_scan_continues() {
    let mut model = GeometryModel::new();
    let flat = model.add(
        Geometry::polygon([(0.0, 0.0), (0.01, 0.0), (0.02, 0.0), (0.0, 0.0)]),
        None,
    );
    let square = model.add(
        Geometry::polygon([(0.0, 0.0), (0.0, 0.01), (0.01, 0.01), (0.01, 0.0), (0.0, 0.0)]),
        None,
    );
    model.add(Geometry::point(1.0, 1.0), None);
    model.add(Geometry::point(1.0, 1.0), None);

    let report = validate(&model);
    assert_eq!(report.of_kind(ViolationKind::DegenerateArea).count(), 1);
    let inconclusive: Vec<_> = report.of_kind(ViolationKind::CheckInconclusive).collect();
    assert_eq!(inconclusive.len(), 1);
    assert_eq!(inconclusive[0].features.as_slice(), &[flat, square]);
    assert_eq!(report.of_kind(ViolationKind::PointsCoincide).count(), 1);
}

#[test]
fn containment_is_reported_once() {
    let ring = [(0.0, 0.0), (0.0, 0.01), (0.01, 0.01), (0.01, 0.0), (0.0, 0.0)];
    let mut model = GeometryModel::new();
    model.add(Geometry::polygon(ring), None);
    model.add(Geometry::polygon(ring), None);

    let report = validate(&model);
    let contained: Vec<_> = report.of_kind(ViolationKind::PolygonContainment).collect();
    assert_eq!(contained.len(), 1);
    match contained[0].measure {
        Some(Measure::Percentage(p)) => assert_relative_eq!(p, 100.0, max_relative = 1e-6),
        other => panic!("unexpected measure {other:?}"),
    }
    assert_eq!(report.of_kind(ViolationKind::PolygonOverlap).count(), 0);
}

#[test]
fn enclosed_gap_between_polygons() {
    let mut model = GeometryModel::new();
    // A U-shape closed off by a bar leaves a 0.002° square hole.
    model.add(
        Geometry::polygon([
            (0.0, 0.0),
            (0.0, 0.006),
            (0.002, 0.006),
            (0.002, 0.002),
            (0.004, 0.002),
            (0.004, 0.006),
            (0.006, 0.006),
            (0.006, 0.0),
            (0.0, 0.0),
        ]),
        None,
    );
    model.add(
        Geometry::polygon([
            (0.0, 0.004),
            (0.0, 0.006),
            (0.006, 0.006),
            (0.006, 0.004),
            (0.0, 0.004),
        ]),
        None,
    );

    let report = validate(&model);
    let gaps: Vec<_> = report.of_kind(ViolationKind::PolygonGap).collect();
    assert_eq!(gaps.len(), 1, "{report}");
    match gaps[0].measure {
        Some(Measure::Area(a)) => assert!(a > 1.0, "gap area {a}"),
        other => panic!("unexpected measure {other:?}"),
    }
}

#[test]
fn parallel_matches_serial() {
    let mut model = GeometryModel::new();
    for i in 0..12 {
        let x = i as f64 * 0.004;
        model.add(
            Geometry::polygon([
                (x, 0.0),
                (x, 0.005),
                (x + 0.005, 0.005),
                (x + 0.005, 0.0),
                (x, 0.0),
            ]),
            None,
        );
        model.add(Geometry::line([(x, -0.001), (x + 0.002, 0.006)]), None);
    }

    let serial = TopologyValidator::default().validate(model.list());
    let parallel = TopologyValidator::new(ValidatorConfig {
        parallel: true,
        ..Default::default()
    })
    .validate(model.list());
    assert!(!serial.violations.is_empty());
    assert_eq!(serial, parallel);
}

#[test]
fn cancelled_run_returns_error() {
    let mut model = GeometryModel::new();
    for i in 0..5 {
        model.add(Geometry::point(i as f64, 0.0), None);
    }
    let cancel = AtomicBool::new(true);
    let err = TopologyValidator::default()
        .validate_cancellable(model.list(), &cancel)
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled { at_pair: 0, total: 10 }));

    let idle = AtomicBool::new(false);
    let report = TopologyValidator::default()
        .validate_cancellable(model.list(), &idle)
        .unwrap();
    assert!(report.violations.is_empty());
}

#[test]
fn report_json() {
    let mut model = GeometryModel::new();
    model.add(Geometry::polygon([(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]), None);
    let json = validate(&model).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["violations"][0]["kind"], "UnclosedRing");
    assert_eq!(value["violations"][0]["severity"], "Error");
    assert_eq!(value["highlighted"][0], 1);
}

#[test]
fn finer_duplicate_epsilon_reaches_pair_checks() {
    let mut model = GeometryModel::new();
    // About 5 cm long
    let stub = model.add(Geometry::line([(0.0, 0.0), (0.0, 0.00000045)]), None);
    model.add(Geometry::line([(1.0, 1.0), (1.0, 1.01)]), None);

    let coarse = validate(&model);
    assert_eq!(coarse.of_kind(ViolationKind::CheckInconclusive).count(), 1, "{coarse}");

    let fine = TopologyValidator::new(ValidatorConfig {
        tolerances: Tolerances {
            duplicate_epsilon_deg: 1e-8,
            ..Tolerances::default()
        },
        ..ValidatorConfig::default()
    })
    .validate(model.list());
    let short: Vec<_> = fine.of_kind(ViolationKind::DegenerateLength).collect();
    assert_eq!(short.len(), 1, "{fine}");
    assert_eq!(short[0].features.as_slice(), &[stub]);
    assert_eq!(fine.of_kind(ViolationKind::CheckInconclusive).count(), 0, "{fine}");
}
