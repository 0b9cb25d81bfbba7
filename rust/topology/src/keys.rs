// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature identity.
//!
//! Ids come from a per-model monotonic counter: they are never reused, so a
//! removed and re-added geometry gets a fresh id, and ascending id order is
//! creation order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a feature within one [`crate::GeometryModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub(crate) u64);

impl FeatureId {
    /// Raw numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for FeatureId {
    fn from(raw: u64) -> Self {
        FeatureId(raw)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}
