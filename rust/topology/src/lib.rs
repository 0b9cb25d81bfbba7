// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GeoLint Topology
//!
//! Feature model, range admission and topology validation for user-drawn
//! geographic features.
//!
//! A [`GeometryModel`] holds points, line strings and single-ring polygons in
//! WGS84 lon/lat. Drafts enter through [`GeometryModel::admit`], which
//! enforces an optional [`RangeConstraint`]. A [`TopologyValidator`] then
//! checks each feature on its own and every pair of features against each
//! other, producing a [`ValidationReport`] of typed [`Violation`]s and the
//! set of features to highlight.
//!
//! ```
//! use geolint_geometry::Geometry;
//! use geolint_topology::{GeometryModel, RangeConstraint, TopologyValidator, ViolationKind};
//!
//! let mut model = GeometryModel::new();
//! let range = RangeConstraint::new();
//! let square = |x: f64, y: f64| {
//!     Geometry::polygon([(x, y), (x, y + 0.002), (x + 0.002, y + 0.002), (x + 0.002, y), (x, y)])
//! };
//! model.admit(&range, square(0.0, 0.0), None)?;
//! model.admit(&range, square(0.001, 0.001), None)?;
//!
//! let report = TopologyValidator::default().validate_model(&model, &range);
//! assert_eq!(report.of_kind(ViolationKind::PolygonOverlap).count(), 1);
//! # Ok::<(), geolint_topology::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod feature;
pub mod keys;
pub mod model;
mod pairwise;
pub mod range;
pub mod report;
mod self_check;
pub mod serialization;
pub mod validator;
pub mod violation;

pub use config::{Tolerances, ValidatorConfig};
pub use error::{Error, Result};
pub use feature::{Feature, FeatureDraft};
pub use keys::FeatureId;
pub use model::GeometryModel;
pub use range::{validate_extent, Axis, BoundField, ConstraintConfigError, RangeConstraint};
pub use report::ValidationReport;
pub use serialization::read_drafts;
pub use validator::TopologyValidator;
pub use violation::{Measure, Severity, Violation, ViolationKind};
