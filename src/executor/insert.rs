use serde_json::Value;
use tracing::debug;

use crate::config::ShiftConfig;
use crate::error::ShiftError;
use crate::path::{accessor, PathTemplate};

/// Copy one value from a resolved source path to a resolved destination
///
/// The root template `$` copies the whole input. A missing source is an
/// error under `require`, otherwise it is written as `null`. With `array`
/// set the value is wrapped as a single-element array first.
pub(crate) fn insert(
    source: &PathTemplate,
    dest: &PathTemplate,
    input: &Value,
    config: &ShiftConfig,
    array: bool,
    output: &mut Value,
) -> Result<(), ShiftError> {
    let value = if source.is_root() {
        input.clone()
    } else {
        accessor::read(input, source, config.require)?.unwrap_or(Value::Null)
    };

    let value = if array { accessor::bookend(value) } else { value };

    debug!(%source, %dest, array, "shifting value");
    accessor::write(output, value, dest)
}
