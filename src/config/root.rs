use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Spec;
use super::spec::RawSpec;
use crate::error::ShiftError;

/// Top-level configuration for one shift transform
///
/// ```json
/// {
///   "spec": {"items[*].id": "records[*].key"},
///   "inPlace": false,
///   "require": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftConfig {
    /// Destination → source mapping, applied in order
    pub spec: Spec,

    /// Start from a copy of the input instead of an empty object
    #[serde(default)]
    pub in_place: bool,

    /// Treat a missing source path as an error instead of writing `null`
    #[serde(default)]
    pub require: bool,
}

impl ShiftConfig {
    /// Create a config with both flags off
    pub fn new(spec: Spec) -> Self {
        Self {
            spec,
            in_place: false,
            require: false,
        }
    }

    pub fn with_in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    pub fn with_require(mut self, require: bool) -> Self {
        self.require = require;
        self
    }

    /// Parse a config from JSON text
    ///
    /// Accepts exactly what the serde derive accepts, duplicate spec
    /// destinations included, but malformed spec values surface as
    /// `ShiftError::Spec` rather than a serde message.
    pub fn from_json_str(text: &str) -> Result<Self, ShiftError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        Ok(Self {
            spec: raw.spec.try_into()?,
            in_place: raw.in_place,
            require: raw.require,
        })
    }

    /// Load a config from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ShiftError> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|e| ShiftError::io(path.display().to_string(), e))?;
        Self::from_json_str(&text)
    }
}

/// Same shape as `ShiftConfig`, with the spec left unclassified
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    spec: RawSpec,
    #[serde(default)]
    in_place: bool,
    #[serde(default)]
    require: bool,
}
