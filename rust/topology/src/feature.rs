// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-authored features.

use geolint_geometry::{self as geometry, Geometry, GeometryKind};
use serde::{Deserialize, Serialize};

use crate::keys::FeatureId;

/// A geometry with a stable identity and an optional label.
///
/// Features are immutable once created; an edit is a remove followed by an
/// add, which assigns a new id. Features serialize for export only; ids are
/// issued by a model, so input arrives as [`FeatureDraft`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    id: FeatureId,
    geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Feature {
    pub(crate) fn new(id: FeatureId, geometry: Geometry, label: Option<String>) -> Self {
        Self { id, geometry, label }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }

    /// Length in meters, for line strings.
    pub fn length(&self) -> Option<geometry::Result<f64>> {
        match &self.geometry {
            Geometry::LineString(coords) => Some(geometry::length(coords)),
            _ => None,
        }
    }

    /// Area in square meters, for polygons.
    pub fn area(&self) -> Option<geometry::Result<f64>> {
        match &self.geometry {
            Geometry::Polygon(ring) => Some(geometry::area(ring)),
            _ => None,
        }
    }
}

/// A finalized geometry from the drawing surface, not yet admitted into a
/// model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDraft {
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FeatureDraft {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
