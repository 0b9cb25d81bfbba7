// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation results.

use std::collections::BTreeSet;
use std::fmt;

use geolint_geometry::RangeExtent;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::keys::FeatureId;
use crate::violation::{Severity, Violation, ViolationKind};

/// Everything one validation run found.
///
/// Self-check findings come first, feature by feature in ascending id order,
/// followed by pair findings in lexicographic pair order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    /// Features referenced by a warning or error. Info notes do not
    /// highlight.
    pub highlighted: BTreeSet<FeatureId>,
    /// Validated features in input order; the position of an id plus one is
    /// its user-facing ordinal.
    pub feature_order: Vec<FeatureId>,
    /// Range extent active when the model was validated, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeExtent>,
}

impl ValidationReport {
    pub(crate) fn new(violations: Vec<Violation>, feature_order: Vec<FeatureId>) -> Self {
        let highlighted = violations
            .iter()
            .filter(|v| v.severity >= Severity::Warning)
            .flat_map(|v| v.features.iter().copied())
            .collect();
        Self {
            violations,
            highlighted,
            feature_order,
            range: None,
        }
    }

    /// True when no Error-severity finding was made.
    pub fn is_valid(&self) -> bool {
        self.count_by_severity(Severity::Error) == 0
    }

    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.violations.iter().filter(|v| v.severity == severity).count()
    }

    /// 1-based position of a feature in the validated input.
    pub fn ordinal(&self, id: FeatureId) -> Option<usize> {
        self.feature_order.iter().position(|&f| f == id).map(|i| i + 1)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} feature(s) checked: {} error(s), {} warning(s), {} note(s)",
            self.feature_order.len(),
            self.count_by_severity(Severity::Error),
            self.count_by_severity(Severity::Warning),
            self.count_by_severity(Severity::Info),
        )?;
        if let Some(extent) = &self.range {
            writeln!(f, "range: {extent}")?;
        }

        let ordinals: FxHashMap<FeatureId, usize> = self
            .feature_order
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i + 1))
            .collect();

        for v in &self.violations {
            write!(f, "[{}] {}:", v.severity, v.kind)?;
            for (i, id) in v.features.iter().enumerate() {
                let sep = if i == 0 { " " } else { ", " };
                match ordinals.get(id) {
                    Some(n) => write!(f, "{sep}#{n}")?,
                    None => write!(f, "{sep}{id}")?,
                }
            }
            write!(f, ": {}", v.message)?;
            if let Some(m) = &v.measure {
                write!(f, " ({m})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
