// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometric routines.

use thiserror::Error;

use crate::types::GeometryKind;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while measuring or comparing geometries.
///
/// Input errors describe a malformed geometry and are stable for that
/// geometry. Computation errors describe a numerical failure of one routine
/// on otherwise well-formed input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{kind} has no coordinates")]
    EmptyGeometry { kind: GeometryKind },

    #[error("{kind} needs at least {required} distinct vertices, found {found}")]
    TooFewVertices {
        kind: GeometryKind,
        found: usize,
        required: usize,
    },

    #[error("coordinate {index} is not finite")]
    NonFiniteCoordinate { index: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("polygon overlay failed: {0}")]
    Overlay(String),
}

impl Error {
    /// True when the error describes malformed input rather than a failed
    /// computation.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyGeometry { .. }
                | Error::TooFewVertices { .. }
                | Error::NonFiniteCoordinate { .. }
        )
    }
}
