/// Shift executor
///
/// This module contains the engine that applies a spec to a document:
/// the orchestrator here, wildcard expansion and leaf insertion below it.

mod expand;
mod insert;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::config::ShiftConfig;
use crate::error::ShiftError;
use crate::path::PathTemplate;
use expand::expand;
use insert::insert;

/// Applies one [`ShiftConfig`] to input documents
///
/// The shifter holds no state besides the borrowed config, so it can be
/// reused for any number of documents and shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct Shifter<'a> {
    config: &'a ShiftConfig,
}

impl<'a> Shifter<'a> {
    pub fn new(config: &'a ShiftConfig) -> Self {
        Self { config }
    }

    /// Shift a parsed document
    ///
    /// Entries run in spec order and every source template of every entry
    /// is applied, so later writes to the same destination win. The first
    /// error stops the transform and no partial output is returned.
    ///
    /// # Example
    /// ```
    /// use jshift::{Shifter, ShiftConfig, Spec};
    /// use serde_json::json;
    ///
    /// let config = ShiftConfig::new(Spec::new().with_entry("items[*].id", "records[*].key"));
    /// let output = Shifter::new(&config)
    ///     .shift_value(&json!({"records": [{"key": "r1"}, {"key": "r2"}]}))
    ///     .unwrap();
    ///
    /// assert_eq!(output, json!({"items": [{"id": "r1"}, {"id": "r2"}]}));
    /// ```
    #[instrument(skip_all, fields(entries = self.config.spec.len(), in_place = self.config.in_place))]
    pub fn shift_value(&self, input: &Value) -> Result<Value, ShiftError> {
        let mut output = if self.config.in_place {
            input.clone()
        } else {
            Value::Object(Map::new())
        };

        for entry in self.config.spec.entries() {
            let dest = PathTemplate::parse(&entry.dest)?;
            let array = entry.source.is_list();

            for source in entry.source.paths() {
                let source = PathTemplate::parse(source)?;

                if source.has_wildcard() && source.wildcard_count() == dest.wildcard_count() {
                    debug!(%source, %dest, "expanding wildcard entry");
                    expand(&source, &dest, 0, input, self.config, array, &mut output)?;
                } else {
                    insert(&source, &dest, input, self.config, array, &mut output)?;
                }
            }
        }

        Ok(output)
    }

    /// Shift a JSON document given as bytes, returning compact JSON bytes
    pub fn shift(&self, input: &[u8]) -> Result<Vec<u8>, ShiftError> {
        let input: Value = serde_json::from_slice(input)?;
        let output = self.shift_value(&input)?;
        Ok(serde_json::to_vec(&output)?)
    }
}

/// Shift `input` according to `config`
///
/// Convenience for a one-off [`Shifter::shift`].
pub fn shift(config: &ShiftConfig, input: &[u8]) -> Result<Vec<u8>, ShiftError> {
    Shifter::new(config).shift(input)
}
