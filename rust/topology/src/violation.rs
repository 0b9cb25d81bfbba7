// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Violation categories, severities and findings.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::keys::FeatureId;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Informational; not an error and not highlighted.
    Info,
    /// Suspicious; may be intentional.
    Warning,
    /// Must be fixed.
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enumeration of all finding categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    // --- Self checks ---
    /// A coordinate is NaN or infinite.
    InvalidCoordinate,
    /// Too few (distinct) vertices for the geometry kind.
    TooFewVertices,
    /// Polygon ring does not end where it starts.
    UnclosedRing,
    /// Polygon ring touches or crosses itself.
    SelfIntersection,
    /// Polygon area below the minimum.
    DegenerateArea,
    /// Line length below the minimum.
    DegenerateLength,
    /// Two vertices of one line coincide.
    DuplicateVertex,

    // --- Pairwise checks ---
    /// Two points coincide.
    PointsCoincide,
    /// Two lines cross.
    LineCrossing,
    /// Two line endpoints nearly, but not exactly, meet.
    DanglingEndpoint,
    /// Lines connect through exactly one endpoint pair.
    SingleEndpointConnection,
    /// Two polygons overlap.
    PolygonOverlap,
    /// One polygon contains the other.
    PolygonContainment,
    /// An uncovered sliver is enclosed between two polygons.
    PolygonGap,
    /// Two polygons share boundary vertices without overlapping.
    SharedBoundary,
    /// A line crosses a polygon boundary.
    BoundaryCrossing,
    /// A line lies inside a polygon.
    LineWithinPolygon,
    /// A pair check could not be computed.
    CheckInconclusive,
}

impl ViolationKind {
    pub fn severity(&self) -> Severity {
        use ViolationKind::*;
        match self {
            InvalidCoordinate | TooFewVertices | UnclosedRing | SelfIntersection
            | DegenerateArea | DegenerateLength | PointsCoincide | LineCrossing
            | PolygonOverlap | BoundaryCrossing => Severity::Error,
            DuplicateVertex | DanglingEndpoint | SingleEndpointConnection | PolygonContainment
            | PolygonGap | CheckInconclusive => Severity::Warning,
            SharedBoundary | LineWithinPolygon => Severity::Info,
        }
    }

    /// True for findings about a single feature.
    pub fn is_self_check(&self) -> bool {
        use ViolationKind::*;
        matches!(
            self,
            InvalidCoordinate
                | TooFewVertices
                | UnclosedRing
                | SelfIntersection
                | DegenerateArea
                | DegenerateLength
                | DuplicateVertex
        )
    }

    /// Human-readable category title.
    pub fn title(&self) -> &'static str {
        use ViolationKind::*;
        match self {
            InvalidCoordinate => "Invalid coordinate",
            TooFewVertices => "Too few vertices",
            UnclosedRing => "Unclosed ring",
            SelfIntersection => "Self-intersection",
            DegenerateArea => "Area too small",
            DegenerateLength => "Length too short",
            DuplicateVertex => "Duplicate vertex",
            PointsCoincide => "Points coincide",
            LineCrossing => "Line crossing",
            DanglingEndpoint => "Potential dangling endpoint",
            SingleEndpointConnection => "Single-endpoint connection, possible dangle",
            PolygonOverlap => "Polygon overlap",
            PolygonContainment => "Polygon containment",
            PolygonGap => "Gap/sliver between polygons",
            SharedBoundary => "Shared boundary",
            BoundaryCrossing => "Boundary crossing",
            LineWithinPolygon => "Line within polygon",
            CheckInconclusive => "Check inconclusive",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Numeric payload attached to a finding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value")]
pub enum Measure {
    /// Square meters.
    Area(f64),
    /// Meters between two positions.
    Distance(f64),
    /// Meters along a line.
    Length(f64),
    /// Percent, 0..=100.
    Percentage(f64),
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Area(v) => write!(f, "area {v:.2} m²"),
            Measure::Distance(v) => write!(f, "distance {v:.3} m"),
            Measure::Length(v) => write!(f, "length {v:.3} m"),
            Measure::Percentage(v) => write!(f, "{v:.1}% covered"),
        }
    }
}

/// A single validation finding tied to one or two features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Involved features, in ascending id order.
    pub features: SmallVec<[FeatureId; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<Measure>,
    pub severity: Severity,
    /// Human-readable detail.
    pub message: String,
}

impl Violation {
    pub(crate) fn single(kind: ViolationKind, id: FeatureId, message: impl Into<String>) -> Self {
        let mut features = SmallVec::new();
        features.push(id);
        Self {
            kind,
            features,
            measure: None,
            severity: kind.severity(),
            message: message.into(),
        }
    }

    pub(crate) fn pair(
        kind: ViolationKind,
        a: FeatureId,
        b: FeatureId,
        message: impl Into<String>,
    ) -> Self {
        let mut features = SmallVec::new();
        features.push(a.min(b));
        features.push(a.max(b));
        Self {
            kind,
            features,
            measure: None,
            severity: kind.severity(),
            message: message.into(),
        }
    }

    pub(crate) fn with_measure(mut self, measure: Measure) -> Self {
        self.measure = Some(measure);
        self
    }

    pub fn involves(&self, id: FeatureId) -> bool {
        self.features.contains(&id)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}:", self.severity, self.kind)?;
        for (i, id) in self.features.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{id}")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(m) = &self.measure {
            write!(f, " ({m})")?;
        }
        Ok(())
    }
}
