use serde_json::{Map, Value};

use super::{PathTemplate, PathToken};
use crate::error::ShiftError;

/// How far past the end of an array [`write`] will pad with `null`
pub const MAX_INDEX_GAP: usize = 65_536;

/// Look up the value at a concrete path
///
/// With `strict` set a missing segment is a `NotFound` error, otherwise it
/// yields `None`. The path must not carry `[*]`; use [`read`] for that.
pub fn lookup<'a>(
    doc: &'a Value,
    path: &PathTemplate,
    strict: bool,
) -> Result<Option<&'a Value>, ShiftError> {
    if path.has_wildcard() {
        return Err(ShiftError::unresolved_wildcard(path.to_string()));
    }

    let found = walk(doc, path.tokens());
    if found.is_none() && strict {
        return Err(ShiftError::not_found(path.to_string()));
    }
    Ok(found)
}

/// Read an owned copy of the value at `path`
///
/// A path with `[*]` markers yields one array holding a value per element
/// the wildcards iterate over, in document order. Nested wildcards are
/// flattened. An element missing the rest of the path contributes `null`,
/// or fails with `NotFound` under `strict`. The array the first `[*]`
/// iterates over has to exist, and be an array, for the read to count as
/// found.
///
/// # Example
/// ```
/// use jshift::path::{accessor, PathTemplate};
/// use serde_json::json;
///
/// let doc = json!({"records": [{"key": "r1"}, {}, {"key": "r3"}]});
/// let path = PathTemplate::parse("records[*].key").unwrap();
///
/// assert_eq!(
///     accessor::read(&doc, &path, false).unwrap(),
///     Some(json!(["r1", null, "r3"]))
/// );
/// assert!(accessor::read(&doc, &path, true).is_err());
/// ```
pub fn read(doc: &Value, path: &PathTemplate, strict: bool) -> Result<Option<Value>, ShiftError> {
    if !path.has_wildcard() {
        return Ok(lookup(doc, path, strict)?.cloned());
    }

    let anchor = path.wildcard_prefix();
    if walk(doc, anchor.tokens()).and_then(Value::as_array).is_none() {
        if strict {
            return Err(ShiftError::not_found(anchor.to_string()));
        }
        return Ok(None);
    }

    let mut matches = Vec::new();
    collect(doc, path, strict, &mut matches)?;
    Ok(Some(Value::Array(matches)))
}

/// Write `value` at a concrete path, creating containers along the way
///
/// Key steps create objects, index steps create arrays padded with `null`
/// up to the index. A scalar sitting where a container is needed is
/// replaced. Whatever was at the exact path is overwritten; writing at `$`
/// replaces the whole document.
pub fn write(doc: &mut Value, value: Value, path: &PathTemplate) -> Result<(), ShiftError> {
    if path.has_wildcard() {
        return Err(ShiftError::unresolved_wildcard(path.to_string()));
    }

    let mut slot = doc;
    for token in path.tokens() {
        slot = match token {
            PathToken::Key(key) => {
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                &mut slot[key.as_str()]
            }
            PathToken::Index(index) => {
                if !slot.is_array() {
                    *slot = Value::Array(Vec::new());
                }
                if let Value::Array(items) = &mut *slot {
                    if items.len() <= *index {
                        pad(items, *index, path)?;
                    }
                }
                &mut slot[*index]
            }
            PathToken::Wildcard => {
                return Err(ShiftError::unresolved_wildcard(path.to_string()));
            }
        };
    }

    *slot = value;
    Ok(())
}

/// Wrap a value as a single-element array
pub fn bookend(value: Value) -> Value {
    Value::Array(vec![value])
}

fn walk<'a>(doc: &'a Value, tokens: &[PathToken]) -> Option<&'a Value> {
    let mut current = doc;
    for token in tokens {
        current = match (token, current) {
            (PathToken::Key(key), Value::Object(map)) => map.get(key)?,
            (PathToken::Index(index), Value::Array(items)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Push one value per element under the first remaining `[*]` of `path`
fn collect(
    doc: &Value,
    path: &PathTemplate,
    strict: bool,
    out: &mut Vec<Value>,
) -> Result<(), ShiftError> {
    let anchor = path.wildcard_prefix();
    let Some(items) = walk(doc, anchor.tokens()).and_then(Value::as_array) else {
        if strict {
            return Err(ShiftError::not_found(anchor.to_string()));
        }
        out.push(Value::Null);
        return Ok(());
    };

    for index in 0..items.len() {
        let bound = path.bind_first_wildcard(index);
        if bound.has_wildcard() {
            collect(doc, &bound, strict, out)?;
        } else {
            out.push(lookup(doc, &bound, strict)?.cloned().unwrap_or(Value::Null));
        }
    }
    Ok(())
}

fn pad(items: &mut Vec<Value>, index: usize, path: &PathTemplate) -> Result<(), ShiftError> {
    if index - items.len() > MAX_INDEX_GAP {
        return Err(ShiftError::invalid_path(
            path.to_string(),
            format!(
                "index {} is more than {} past the end of an array of length {}",
                index,
                MAX_INDEX_GAP,
                items.len()
            ),
        ));
    }
    let len = index
        .checked_add(1)
        .ok_or_else(|| ShiftError::invalid_path(path.to_string(), "array index overflows"))?;
    items.resize(len, Value::Null);
    Ok(())
}
