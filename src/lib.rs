/// jshift - Declarative JSON restructuring
///
/// This library moves values around a JSON document according to a spec
/// that maps destination paths to source paths, with `[*]` wildcards
/// fanning out over the arrays found in the input.

pub mod config;
pub mod error;
pub mod executor;
pub mod path;

// Re-export commonly used types
pub use config::{ShiftConfig, Spec, SpecEntry, SpecValue};
pub use error::ShiftError;
pub use executor::{shift, Shifter};
pub use path::{PathTemplate, PathToken};
