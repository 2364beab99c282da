/// Configuration types for jshift
///
/// This module contains the shift specification and the flags that
/// control how it is applied.

mod root;
mod spec;

pub use root::ShiftConfig;
pub use spec::{Spec, SpecEntry, SpecValue};
