/// Path templates and document access
///
/// Templates address values inside a JSON document with dotted keys,
/// literal indices (`[3]`) and repeating-array wildcards (`[*]`).

pub mod accessor;
mod template;

pub use template::{PathTemplate, PathToken, ROOT};
