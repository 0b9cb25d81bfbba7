// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The live feature collection.
//!
//! [`GeometryModel`] owns the session's features in insertion order, which is
//! also the user-facing ordinal numbering ("feature #3"). Derived metrics are
//! computed on demand by [`Feature`]; sessions hold tens to a few hundred
//! features, so nothing is cached.

use geolint_geometry::Geometry;
use tracing::warn;

use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureDraft};
use crate::keys::FeatureId;
use crate::range::RangeConstraint;

/// Insertion-ordered, identity-stable feature collection.
///
/// # Example
///
/// ```
/// use geolint_geometry::Geometry;
/// use geolint_topology::GeometryModel;
///
/// let mut model = GeometryModel::new();
/// let a = model.add(Geometry::point(1.0, 1.0), None);
/// let b = model.add(Geometry::point(2.0, 2.0), None);
/// model.remove(a).unwrap();
/// let c = model.add(Geometry::point(1.0, 1.0), None);
///
/// assert_ne!(a, c);
/// assert_eq!(model.list().iter().map(|f| f.id()).collect::<Vec<_>>(), vec![b, c]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeometryModel {
    features: Vec<Feature>,
    next_id: u64,
}

impl GeometryModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature and returns its new id. Range admission is the caller's
    /// responsibility; see [`GeometryModel::admit`].
    pub fn add(&mut self, geometry: Geometry, label: Option<String>) -> FeatureId {
        self.next_id += 1;
        let id = FeatureId(self.next_id);
        self.features.push(Feature::new(id, geometry, label));
        id
    }

    /// Runs the admission check and adds the feature only if it passes.
    /// Nothing is created on rejection.
    pub fn admit(
        &mut self,
        range: &RangeConstraint,
        geometry: Geometry,
        label: Option<String>,
    ) -> Result<FeatureId> {
        if let Some(extent) = range.extent() {
            if !range.contains(&geometry) {
                warn!(kind = %geometry.kind(), %extent, "rejected geometry outside range");
                return Err(Error::OutOfRange { extent: *extent });
            }
        }
        Ok(self.add(geometry, label))
    }

    /// Admits a batch of drafts, returning one result per draft in order.
    pub fn admit_all<I>(&mut self, range: &RangeConstraint, drafts: I) -> Vec<Result<FeatureId>>
    where
        I: IntoIterator<Item = FeatureDraft>,
    {
        drafts
            .into_iter()
            .map(|d| self.admit(range, d.geometry, d.label))
            .collect()
    }

    /// Removes a feature, returning it.
    pub fn remove(&mut self, id: FeatureId) -> Result<Feature> {
        let index = self
            .features
            .iter()
            .position(|f| f.id() == id)
            .ok_or(Error::FeatureNotFound(id))?;
        Ok(self.features.remove(index))
    }

    /// Features in insertion order.
    pub fn list(&self) -> &[Feature] {
        &self.features
    }

    /// By-value copy of the current features, for validation.
    pub fn snapshot(&self) -> Vec<Feature> {
        self.features.clone()
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id() == id)
    }

    /// 1-based position of a feature in insertion order.
    pub fn ordinal(&self, id: FeatureId) -> Option<usize> {
        self.features.iter().position(|f| f.id() == id).map(|i| i + 1)
    }

    /// Removes every feature. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.features.clear();
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_and_ordinals() {
        let mut model = GeometryModel::new();
        let a = model.add(Geometry::point(0.0, 0.0), Some("a".into()));
        let b = model.add(Geometry::line([(0.0, 0.0), (1.0, 1.0)]), None);
        let c = model.add(Geometry::point(2.0, 2.0), None);

        assert_eq!(model.len(), 3);
        assert_eq!(model.ordinal(b), Some(2));
        model.remove(b).unwrap();
        assert_eq!(model.ordinal(c), Some(2));
        assert_eq!(model.get(a).and_then(|f| f.label()), Some("a"));
        assert!(model.get(b).is_none());
    }

    #[test]
    fn removing_unknown_id_fails() {
        let mut model = GeometryModel::new();
        let a = model.add(Geometry::point(0.0, 0.0), None);
        model.remove(a).unwrap();
        assert!(matches!(model.remove(a), Err(Error::FeatureNotFound(id)) if id == a));
    }

    #[test]
    fn ids_survive_clear() {
        let mut model = GeometryModel::new();
        let a = model.add(Geometry::point(0.0, 0.0), None);
        model.clear();
        assert!(model.is_empty());
        let b = model.add(Geometry::point(0.0, 0.0), None);
        assert!(b > a);
    }

    #[test]
    fn admit_rejects_out_of_range() {
        let mut range = RangeConstraint::new();
        range.set(0.0, 0.0, 10.0, 10.0).unwrap();

        let mut model = GeometryModel::new();
        assert!(model.admit(&range, Geometry::point(5.0, 5.0), None).is_ok());
        let rejected = model.admit(&range, Geometry::point(15.0, 5.0), None);
        assert!(matches!(rejected, Err(Error::OutOfRange { .. })));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn admit_all_reports_each_draft() {
        let mut range = RangeConstraint::new();
        range.set(0.0, 0.0, 1.0, 1.0).unwrap();

        let mut model = GeometryModel::new();
        let results = model.admit_all(
            &range,
            vec![
                FeatureDraft::new(Geometry::point(0.5, 0.5)),
                FeatureDraft::new(Geometry::point(2.0, 0.5)).with_label("far"),
                FeatureDraft::new(Geometry::point(0.1, 0.1)),
            ],
        );
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
        assert_eq!(model.len(), 2);
    }
}
