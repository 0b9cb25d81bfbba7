// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model, admission and validation operations.

use geolint_geometry::RangeExtent;

use crate::keys::FeatureId;
use crate::range::ConstraintConfigError;

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in model, admission and validation operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The range constraint configuration was rejected.
    #[error(transparent)]
    ConstraintConfig(#[from] ConstraintConfigError),

    /// A drawn geometry lies (partly) outside the active range extent.
    #[error("geometry lies outside the allowed range {extent}")]
    OutOfRange { extent: RangeExtent },

    /// No feature with this id exists in the model.
    #[error("feature not found: {0}")]
    FeatureNotFound(FeatureId),

    /// A validation run was cancelled between pair checks.
    #[error("validation cancelled at pair {at_pair} of {total}")]
    Cancelled { at_pair: usize, total: usize },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
