// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The validation pass.
//!
//! A run is a pure function of the feature snapshot and the tolerances:
//! every feature is self-checked in ascending id order, then every unordered
//! pair of well-formed features is checked in lexicographic order. The pair
//! scan is O(n²), which is fine for the tens to hundreds of features a
//! drawing session produces.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::config::ValidatorConfig;
use crate::error::{Error, Result};
use crate::feature::Feature;
use crate::model::GeometryModel;
use crate::pairwise::check_pair;
use crate::range::RangeConstraint;
use crate::report::ValidationReport;
use crate::self_check::check_feature;
use crate::violation::Violation;

/// Runs self and pairwise checks over a set of features.
///
/// # Example
///
/// ```
/// use geolint_geometry::Geometry;
/// use geolint_topology::{GeometryModel, RangeConstraint, TopologyValidator};
///
/// let mut model = GeometryModel::new();
/// model.add(
///     Geometry::polygon([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]),
///     None,
/// );
///
/// let report = TopologyValidator::default().validate_model(&model, &RangeConstraint::new());
/// assert!(report.violations.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TopologyValidator {
    config: ValidatorConfig,
}

impl TopologyValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates a feature snapshot. Never fails; geometries that cannot be
    /// evaluated surface as findings.
    pub fn validate(&self, features: &[Feature]) -> ValidationReport {
        let never = AtomicBool::new(false);
        match self.run(features, &never) {
            Ok(report) => report,
            // The flag above is never raised.
            Err(_) => ValidationReport::default(),
        }
    }

    /// Validates the model's current features and records the active range
    /// in the report.
    pub fn validate_model(
        &self,
        model: &GeometryModel,
        range: &RangeConstraint,
    ) -> ValidationReport {
        let mut report = self.validate(model.list());
        report.range = range.extent().copied();
        report
    }

    /// Like [`TopologyValidator::validate`], but stops with
    /// [`Error::Cancelled`] once `cancel` is raised. The flag is checked
    /// before every pair.
    pub fn validate_cancellable(
        &self,
        features: &[Feature],
        cancel: &AtomicBool,
    ) -> Result<ValidationReport> {
        self.run(features, cancel)
    }

    fn run(&self, features: &[Feature], cancel: &AtomicBool) -> Result<ValidationReport> {
        let tol = &self.config.tolerances;

        let mut ordered: Vec<&Feature> = features.iter().collect();
        ordered.sort_by_key(|f| f.id());

        let mut violations: Vec<Violation> = Vec::new();
        let mut eligible: Vec<&Feature> = Vec::with_capacity(ordered.len());
        for &feature in &ordered {
            let check = check_feature(feature, tol);
            violations.extend(check.violations);
            if check.pair_eligible {
                eligible.push(feature);
            } else {
                debug!(feature = %feature.id(), "excluded from pair checks");
            }
        }
        let self_findings = violations.len();

        let n = eligible.len();
        let total = n * n.saturating_sub(1) / 2;
        let row = |i: usize| -> Result<Vec<Violation>> {
            let mut found = Vec::new();
            for j in (i + 1)..n {
                if cancel.load(Ordering::Relaxed) {
                    return Err(Error::Cancelled {
                        at_pair: pair_index(n, i, j),
                        total,
                    });
                }
                found.extend(check_pair(eligible[i], eligible[j], tol));
            }
            Ok(found)
        };

        let rows: Vec<Vec<Violation>> = if self.config.parallel {
            scan_parallel(n, &row)?
        } else {
            (0..n).map(&row).collect::<Result<_>>()?
        };
        violations.extend(rows.into_iter().flatten());

        let report = ValidationReport::new(violations, features.iter().map(Feature::id).collect());
        debug!(
            features = features.len(),
            eligible = n,
            pairs = total,
            self_findings,
            pair_findings = report.violations.len() - self_findings,
            highlighted = report.highlighted.len(),
            "validation finished"
        );
        Ok(report)
    }
}

/// Position of pair `(i, j)`, `i < j`, in lexicographic order.
fn pair_index(n: usize, i: usize, j: usize) -> usize {
    i * (2 * n - i - 1) / 2 + (j - i - 1)
}

#[cfg(not(target_arch = "wasm32"))]
fn scan_parallel<F>(n: usize, row: &F) -> Result<Vec<Vec<Violation>>>
where
    F: Fn(usize) -> Result<Vec<Violation>> + Sync,
{
    use rayon::prelude::*;

    (0..n).into_par_iter().map(row).collect()
}

// No threads on wasm32
#[cfg(target_arch = "wasm32")]
fn scan_parallel<F>(n: usize, row: &F) -> Result<Vec<Vec<Violation>>>
where
    F: Fn(usize) -> Result<Vec<Violation>> + Sync,
{
    (0..n).map(row).collect()
}
