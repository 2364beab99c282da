use serde_json::Value;
use tracing::trace;

use super::insert::insert;
use crate::config::ShiftConfig;
use crate::error::ShiftError;
use crate::path::{accessor, PathTemplate};

/// Fan a wildcard-paired source/destination out into concrete copies
///
/// Each call resolves the first remaining `[*]` of both templates. The
/// fan-out is the length of the source array that wildcard iterates over,
/// read leniently whatever `require` says; a missing or non-array value
/// means zero iterations, and nothing below it is visited. Index `i` is
/// bound into both templates, then the pair either recurses for the next
/// wildcard or, once the source is fully resolved, goes to [`insert`].
pub(crate) fn expand(
    source: &PathTemplate,
    dest: &PathTemplate,
    level: usize,
    input: &Value,
    config: &ShiftConfig,
    array: bool,
    output: &mut Value,
) -> Result<(), ShiftError> {
    let look_path = source.wildcard_prefix();
    let count = accessor::lookup(input, &look_path, false)?
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    trace!(%look_path, level, count, "expanding wildcard");

    for index in 0..count {
        let bound_source = source.bind_first_wildcard(index);
        let bound_dest = dest.bind_first_wildcard(index);

        if bound_source.has_wildcard() {
            expand(&bound_source, &bound_dest, level + 1, input, config, array, output)?;
        } else {
            insert(&bound_source, &bound_dest, input, config, array, output)?;
        }
    }

    Ok(())
}
