use thiserror::Error;

/// Errors that can occur while loading a spec or shifting a document
#[derive(Debug, Error)]
pub enum ShiftError {
    /// A spec entry has a value that is not a path template or a list of them
    #[error("Spec error for key '{key}': {message}")]
    Spec { key: String, message: String },

    /// A required source path was absent from the input document
    #[error("Path not found: {path}")]
    NotFound { path: String },

    /// A path template could not be tokenized
    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// A concrete read or write was handed a path that still carries `[*]`
    #[error("Unresolved wildcard in path: {path}")]
    UnresolvedWildcard { path: String },

    /// Input was not valid JSON, or output could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A spec or config file could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ShiftError {
    /// Create a Spec error
    pub fn spec(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Spec {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an InvalidPath error
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an UnresolvedWildcard error
    pub fn unresolved_wildcard(path: impl Into<String>) -> Self {
        Self::UnresolvedWildcard { path: path.into() }
    }

    /// Create an Io error for the file at `path`
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means a required source value was missing
    ///
    /// Callers can use this to decide whether to retry with `require` off.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
