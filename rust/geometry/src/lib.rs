// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GeoLint Geometry
//!
//! Stateless numeric routines over WGS84 coordinate sequences: great-circle
//! distance, line length, spherical polygon area, ring diagnostics, OGC-style
//! predicates and overlay-derived areas.
//!
//! Measurements are spherical so they hold at any zoom level. Incidence
//! questions are answered in the lon/lat plane, and overlay regions come from
//! i_overlay before being measured on the sphere.
//!
//! Degenerate input (empty or collapsed rings, non-finite coordinates) yields
//! an [`Error`] rather than a panic or a silently wrong answer.

pub mod bool2d;
pub mod constants;
pub mod error;
pub mod geodesy;
pub mod planar;
pub mod predicates;
pub mod ring;
mod shape;
pub mod types;

pub use bool2d::{
    difference_area, gap_area, gap_area_within, intersection_area, intersection_area_within,
    union_area,
};
pub use constants::*;
pub use error::{Error, Result};
pub use geodesy::{area, distance, great_circle, length, measure, meters_to_degrees};
pub use predicates::{
    contains, contains_within, crosses, crosses_within, intersects, intersects_within, overlaps,
    overlaps_within, within,
};
pub use ring::{is_valid_ring, ring_defects, RingDefect};
pub use types::{Coordinate, Geometry, GeometryKind, RangeExtent};
