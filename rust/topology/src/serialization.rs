// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON input and output.
//!
//! Drafts are read either as a bare array or wrapped in a `features` object:
//!
//! ```json
//! {"features": [
//!   {"geometry": {"type": "Point", "coordinates": [13.4, 52.5]}, "label": "gate"},
//!   {"geometry": {"type": "LineString", "coordinates": [[13.4, 52.5], [13.5, 52.5]]}}
//! ]}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureDraft};
use crate::model::GeometryModel;
use crate::report::ValidationReport;

#[derive(Deserialize)]
#[serde(untagged)]
enum DraftDocument {
    Bare(Vec<FeatureDraft>),
    Wrapped { features: Vec<FeatureDraft> },
}

/// Serialized form of a model.
#[derive(Serialize)]
struct ModelSnapshot<'a> {
    features: &'a [Feature],
}

/// Parses feature drafts from JSON.
pub fn read_drafts(json: &str) -> Result<Vec<FeatureDraft>> {
    let doc: DraftDocument =
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
    Ok(match doc {
        DraftDocument::Bare(drafts) => drafts,
        DraftDocument::Wrapped { features } => features,
    })
}

impl GeometryModel {
    /// Serializes the features, with ids, as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&ModelSnapshot { features: self.list() })
            .map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl ValidationReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
