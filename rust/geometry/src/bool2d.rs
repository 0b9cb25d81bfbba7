// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon overlay areas
//!
//! Intersection, union and difference regions are computed in the lon/lat
//! plane with the i_overlay crate and then measured on the sphere. Only the
//! resulting scalar areas leave this module.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::constants::DUPLICATE_EPSILON_M;
use crate::error::{Error, Result};
use crate::geodesy::ring_area;
use crate::planar::bounds_overlap;
use crate::shape::PlanarRing;
use crate::types::Coordinate;

/// i_overlay output: shapes, each an outer contour followed by its holes.
type Shapes = Vec<Vec<Vec<[f64; 2]>>>;

/// Area of `A ∩ B` in square meters; zero when the rings are disjoint.
pub fn intersection_area(a: &[Coordinate], b: &[Coordinate]) -> Result<f64> {
    intersection_area_within(a, b, DUPLICATE_EPSILON_M)
}

/// [`intersection_area`] with vertices closer than `epsilon_m` merged.
pub fn intersection_area_within(a: &[Coordinate], b: &[Coordinate], epsilon_m: f64) -> Result<f64> {
    let a = PlanarRing::new(a, epsilon_m)?;
    let b = PlanarRing::new(b, epsilon_m)?;
    ring_intersection_area(&a, &b)
}

/// Area of `A ∪ B` in square meters, holes excluded.
pub fn union_area(a: &[Coordinate], b: &[Coordinate]) -> Result<f64> {
    let a = PlanarRing::new(a, DUPLICATE_EPSILON_M)?;
    let b = PlanarRing::new(b, DUPLICATE_EPSILON_M)?;
    Ok(shapes_area(&overlay(&a, &b, OverlayRule::Union)?))
}

/// Area of `A \ B` in square meters.
pub fn difference_area(a: &[Coordinate], b: &[Coordinate]) -> Result<f64> {
    let a = PlanarRing::new(a, DUPLICATE_EPSILON_M)?;
    let b = PlanarRing::new(b, DUPLICATE_EPSILON_M)?;
    ring_difference_area(&a, &b)
}

/// Uncovered area enclosed between two polygons, in square meters.
///
/// This is `area(filled union) - area(A) - area(B) + area(A ∩ B)`: the total
/// area of the holes in `A ∪ B`. Polygons that tile their shared border
/// cleanly give zero; a sliver left between them gives its area.
pub fn gap_area(a: &[Coordinate], b: &[Coordinate]) -> Result<f64> {
    gap_area_within(a, b, DUPLICATE_EPSILON_M)
}

/// [`gap_area`] with vertices closer than `epsilon_m` merged.
pub fn gap_area_within(a: &[Coordinate], b: &[Coordinate], epsilon_m: f64) -> Result<f64> {
    let a = PlanarRing::new(a, epsilon_m)?;
    let b = PlanarRing::new(b, epsilon_m)?;
    ring_gap_area(&a, &b)
}

pub(crate) fn ring_intersection_area(a: &PlanarRing, b: &PlanarRing) -> Result<f64> {
    if !bounds_overlap(&a.bounds, &b.bounds, 0.0) {
        return Ok(0.0);
    }
    Ok(shapes_area(&overlay(a, b, OverlayRule::Intersect)?))
}

pub(crate) fn ring_difference_area(a: &PlanarRing, b: &PlanarRing) -> Result<f64> {
    if !bounds_overlap(&a.bounds, &b.bounds, 0.0) {
        return Ok(ring_area(&a.coords));
    }
    Ok(shapes_area(&overlay(a, b, OverlayRule::Difference)?))
}

pub(crate) fn ring_gap_area(a: &PlanarRing, b: &PlanarRing) -> Result<f64> {
    if !bounds_overlap(&a.bounds, &b.bounds, 0.0) {
        return Ok(0.0);
    }
    Ok(overlay(a, b, OverlayRule::Union)?
        .iter()
        .flat_map(|shape| shape.iter().skip(1))
        .map(|hole| contour_area(hole))
        .sum())
}

fn overlay(a: &PlanarRing, b: &PlanarRing, rule: OverlayRule) -> Result<Shapes> {
    let subject: Vec<Vec<[f64; 2]>> = vec![a.path()];
    let clip: Vec<Vec<[f64; 2]>> = vec![b.path()];
    let shapes = subject.overlay(&clip, rule, FillRule::EvenOdd);

    let finite = shapes
        .iter()
        .flatten()
        .flatten()
        .all(|p| p[0].is_finite() && p[1].is_finite());
    if !finite {
        return Err(Error::Overlay("overlay produced a non-finite vertex".to_string()));
    }
    Ok(shapes)
}

/// Summed area of shapes, each outer contour minus its holes.
fn shapes_area(shapes: &Shapes) -> f64 {
    shapes
        .iter()
        .map(|shape| {
            let mut contours = shape.iter();
            let outer = contours.next().map(|c| contour_area(c)).unwrap_or(0.0);
            let holes: f64 = contours.map(|c| contour_area(c)).sum();
            (outer - holes).max(0.0)
        })
        .sum()
}

fn contour_area(contour: &[[f64; 2]]) -> f64 {
    let coords: Vec<Coordinate> = contour.iter().map(|&p| Coordinate::from(p)).collect();
    ring_area(&coords)
}
