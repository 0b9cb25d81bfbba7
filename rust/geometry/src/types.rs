// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geographic coordinate, geometry and extent types.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
///
/// Serialized as a `[lon, lat]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Planar view of the coordinate in the lon/lat plane.
    #[inline]
    pub fn to_planar(self) -> Point2<f64> {
        Point2::new(self.lon, self.lat)
    }

    #[inline]
    pub fn from_planar(p: &Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lon, self.lat)
    }
}

/// Discriminant for geometry variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometryKind {
    Point = 0,
    LineString = 1,
    Polygon = 2,
}

impl GeometryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-drawn geometry.
///
/// A polygon is a single outer ring; a valid ring repeats its first vertex
/// at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    Polygon(Vec<Coordinate>),
}

impl Geometry {
    /// Builds a line string from `(lon, lat)` pairs.
    pub fn line<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Geometry::LineString(coords.into_iter().map(Coordinate::from).collect())
    }

    /// Builds a polygon ring from `(lon, lat)` pairs, taken as given.
    pub fn polygon<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Geometry::Polygon(coords.into_iter().map(Coordinate::from).collect())
    }

    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point(Coordinate::new(lon, lat))
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// All coordinates of the geometry in drawing order.
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Geometry::Point(c) => std::slice::from_ref(c),
            Geometry::LineString(coords) | Geometry::Polygon(coords) => coords,
        }
    }

    /// Index of the first non-finite coordinate, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.coordinates().iter().position(|c| !c.is_finite())
    }
}

/// An axis-aligned geographic bounding extent, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeExtent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl RangeExtent {
    /// Creates an extent without checking its bounds.
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    #[inline]
    pub fn contains_coordinate(&self, c: &Coordinate) -> bool {
        c.lon >= self.min_lon
            && c.lon <= self.max_lon
            && c.lat >= self.min_lat
            && c.lat <= self.max_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

impl fmt::Display for RangeExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lon [{}, {}], lat [{}, {}]",
            self.min_lon, self.max_lon, self.min_lat, self.max_lat
        )
    }
}
