use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ShiftError;

/// Source side of a spec entry
///
/// A list copies every template it names, wrapping each value as a
/// single-element array before it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SpecValue {
    /// A single source-path template: `"records[*].key"`
    Path(String),
    /// Several source-path templates: `["a.b", "c"]`
    List(Vec<String>),
}

impl SpecValue {
    /// Classify a raw JSON value found under `key`
    pub fn from_value(key: &str, value: Value) -> Result<Self, ShiftError> {
        match value {
            Value::String(path) => Ok(Self::Path(path)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(path) => Ok(path),
                    other => Err(ShiftError::spec(
                        key,
                        format!("list element is not a path template: {}", other),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            other => Err(ShiftError::spec(
                key,
                format!("expected a path template or a list of them, got {}", other),
            )),
        }
    }

    /// Whether extracted values get wrapped as single-element arrays
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The source templates, in declared order
    pub fn paths(&self) -> &[String] {
        match self {
            Self::Path(path) => std::slice::from_ref(path),
            Self::List(paths) => paths,
        }
    }
}

impl From<&str> for SpecValue {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<Vec<&str>> for SpecValue {
    fn from(paths: Vec<&str>) -> Self {
        Self::List(paths.into_iter().map(str::to_string).collect())
    }
}

/// One destination template and where its value comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEntry {
    pub dest: String,
    pub source: SpecValue,
}

/// Ordered destination → source mapping
///
/// Entries are applied in the order they were declared, including
/// duplicate destinations, so a later entry overwrites an earlier one.
///
/// # Example
/// ```
/// use jshift::config::Spec;
///
/// let spec: Spec = serde_json::from_str(r#"{"b": "x", "a": ["y", "z"]}"#).unwrap();
/// let dests: Vec<&str> = spec.entries().iter().map(|e| e.dest.as_str()).collect();
/// assert_eq!(dests, ["b", "a"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spec {
    entries: Vec<SpecEntry>,
}

impl Spec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry (builder style)
    pub fn with_entry(mut self, dest: impl Into<String>, source: impl Into<SpecValue>) -> Self {
        self.push(dest, source);
        self
    }

    pub fn push(&mut self, dest: impl Into<String>, source: impl Into<SpecValue>) {
        self.entries.push(SpecEntry {
            dest: dest.into(),
            source: source.into(),
        });
    }

    /// Build a spec from a JSON object
    ///
    /// Key order follows the object's order.
    pub fn from_value(value: Value) -> Result<Self, ShiftError> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(ShiftError::spec(
                    "$",
                    format!("specification must be a JSON object, got {}", other),
                ));
            }
        };

        RawSpec(map.into_iter().collect()).try_into()
    }

    /// Parse a bare spec object from JSON text
    ///
    /// Duplicate destinations are kept, in order.
    pub fn from_json_str(text: &str) -> Result<Self, ShiftError> {
        let raw: RawSpec = serde_json::from_str(text)?;
        raw.try_into()
    }

    pub fn entries(&self) -> &[SpecEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<D: Into<String>, S: Into<SpecValue>> FromIterator<(D, S)> for Spec {
    fn from_iter<I: IntoIterator<Item = (D, S)>>(iter: I) -> Self {
        let mut spec = Self::new();
        for (dest, source) in iter {
            spec.push(dest, source);
        }
        spec
    }
}

impl Serialize for Spec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.dest, &entry.source)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Spec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSpec::deserialize(deserializer)?;
        Spec::try_from(raw).map_err(de::Error::custom)
    }
}

/// Spec entries as written, before their values are classified
///
/// Every text entry point goes through this so duplicate destinations
/// survive in document order, which a `serde_json::Value` cannot hold.
#[derive(Debug)]
pub(super) struct RawSpec(Vec<(String, Value)>);

impl TryFrom<RawSpec> for Spec {
    type Error = ShiftError;

    fn try_from(raw: RawSpec) -> Result<Self, ShiftError> {
        raw.0
            .into_iter()
            .map(|(dest, source)| {
                let source = SpecValue::from_value(&dest, source)?;
                Ok(SpecEntry { dest, source })
            })
            .collect::<Result<Vec<_>, ShiftError>>()
            .map(|entries| Self { entries })
    }
}

impl<'de> Deserialize<'de> for RawSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawSpecVisitor)
    }
}

struct RawSpecVisitor;

impl<'de> Visitor<'de> for RawSpecVisitor {
    type Value = RawSpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of destination paths to source paths")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawSpec, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(RawSpec(entries))
    }
}
