// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Range constraint: the bounding-extent admission gate.
//!
//! A drawn geometry is checked against the active extent before it is ever
//! created as a feature. Out-of-range geometries are rejected at this
//! boundary and never reach the validator.

use std::fmt;

use geolint_geometry::{predicates, Geometry, RangeExtent, MIN_EXTENT_SPAN_DEG};
use serde::{Deserialize, Serialize};

/// One of the four scalar bounds of an extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundField {
    MinLon,
    MinLat,
    MaxLon,
    MaxLat,
}

impl BoundField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundField::MinLon => "min_lon",
            BoundField::MinLat => "min_lat",
            BoundField::MaxLon => "max_lon",
            BoundField::MaxLat => "max_lat",
        }
    }

    fn domain(&self) -> (f64, f64) {
        match self {
            BoundField::MinLon | BoundField::MaxLon => (-180.0, 180.0),
            BoundField::MinLat | BoundField::MaxLat => (-90.0, 90.0),
        }
    }
}

impl fmt::Display for BoundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinate axis of an extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Longitude => "longitude",
            Axis::Latitude => "latitude",
        })
    }
}

/// Why a range configuration was rejected. Rules are checked in the order
/// domain, ordering, span; the first failure is reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintConfigError {
    #[error("{field} is not a finite number")]
    NonFinite { field: BoundField },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfDomain {
        field: BoundField,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{axis} bounds are inverted: minimum {min} is not below maximum {max}")]
    Inverted { axis: Axis, min: f64, max: f64 },

    #[error("{axis} span {span} is below the minimum of {min_span} degrees")]
    SpanTooSmall { axis: Axis, span: f64, min_span: f64 },
}

impl ConstraintConfigError {
    /// The bound(s) the failed rule concerns.
    pub fn fields(&self) -> &'static [BoundField] {
        match self {
            ConstraintConfigError::NonFinite { field }
            | ConstraintConfigError::OutOfDomain { field, .. } => match field {
                BoundField::MinLon => &[BoundField::MinLon],
                BoundField::MinLat => &[BoundField::MinLat],
                BoundField::MaxLon => &[BoundField::MaxLon],
                BoundField::MaxLat => &[BoundField::MaxLat],
            },
            ConstraintConfigError::Inverted { axis, .. }
            | ConstraintConfigError::SpanTooSmall { axis, .. } => match axis {
                Axis::Longitude => &[BoundField::MinLon, BoundField::MaxLon],
                Axis::Latitude => &[BoundField::MinLat, BoundField::MaxLat],
            },
        }
    }
}

/// Optional bounding extent that drawn geometries must lie within.
///
/// # Example
///
/// ```
/// use geolint_geometry::Geometry;
/// use geolint_topology::RangeConstraint;
///
/// let mut range = RangeConstraint::new();
/// range.set(0.0, 0.0, 10.0, 10.0).unwrap();
/// assert!(range.contains(&Geometry::point(5.0, 5.0)));
/// assert!(!range.contains(&Geometry::point(15.0, 5.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeConstraint {
    extent: Option<RangeExtent>,
}

impl RangeConstraint {
    /// An unrestricted constraint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new extent. On error the previous extent (or absence of
    /// one) is left untouched.
    pub fn set(
        &mut self,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<(), ConstraintConfigError> {
        let extent = RangeExtent::new(min_lon, min_lat, max_lon, max_lat);
        validate_extent(&extent)?;
        self.extent = Some(extent);
        Ok(())
    }

    /// Returns to unrestricted.
    pub fn clear(&mut self) {
        self.extent = None;
    }

    pub fn extent(&self) -> Option<&RangeExtent> {
        self.extent.as_ref()
    }

    pub fn is_restricted(&self) -> bool {
        self.extent.is_some()
    }

    /// True when the geometry may be admitted: always when unrestricted,
    /// otherwise every vertex must lie inside the inclusive extent.
    pub fn contains(&self, geometry: &Geometry) -> bool {
        match &self.extent {
            None => true,
            Some(extent) => predicates::within(geometry, extent),
        }
    }
}

/// Checks domain, ordering and minimum span of an extent.
pub fn validate_extent(extent: &RangeExtent) -> Result<(), ConstraintConfigError> {
    let bounds = [
        (BoundField::MinLon, extent.min_lon),
        (BoundField::MinLat, extent.min_lat),
        (BoundField::MaxLon, extent.max_lon),
        (BoundField::MaxLat, extent.max_lat),
    ];

    for (field, value) in bounds {
        if !value.is_finite() {
            return Err(ConstraintConfigError::NonFinite { field });
        }
        let (min, max) = field.domain();
        if value < min || value > max {
            return Err(ConstraintConfigError::OutOfDomain {
                field,
                value,
                min,
                max,
            });
        }
    }

    let axes = [
        (Axis::Longitude, extent.min_lon, extent.max_lon, extent.lon_span()),
        (Axis::Latitude, extent.min_lat, extent.max_lat, extent.lat_span()),
    ];

    for (axis, min, max, _) in axes {
        if min >= max {
            return Err(ConstraintConfigError::Inverted { axis, min, max });
        }
    }

    for (axis, _, _, span) in axes {
        if span < MIN_EXTENT_SPAN_DEG {
            return Err(ConstraintConfigError::SpanTooSmall {
                axis,
                span,
                min_span: MIN_EXTENT_SPAN_DEG,
            });
        }
    }

    Ok(())
}
