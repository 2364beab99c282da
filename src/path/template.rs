use std::fmt;

use crate::error::ShiftError;

/// Marker for "the entire document" when used as a full template
pub const ROOT: &str = "$";

/// One step of a path template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    /// Object member (`name`)
    Key(String),
    /// Literal array index (`[3]`)
    Index(usize),
    /// Repeating-array marker (`[*]`), once per element of the array here
    Wildcard,
}

/// A parsed path template such as `records[*].tags[0]`
///
/// Segments are separated by `.`; each segment is an optional key followed
/// by zero or more bracketed indices. The bare template `$` addresses the
/// whole document and has no tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    tokens: Vec<PathToken>,
}

impl PathTemplate {
    /// Parse a template string
    ///
    /// # Example
    /// ```
    /// use jshift::path::{PathTemplate, PathToken};
    ///
    /// let path = PathTemplate::parse("items[*].id").unwrap();
    /// assert_eq!(
    ///     path.tokens(),
    ///     &[
    ///         PathToken::Key("items".to_string()),
    ///         PathToken::Wildcard,
    ///         PathToken::Key("id".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn parse(template: &str) -> Result<Self, ShiftError> {
        if template == ROOT {
            return Ok(Self::root());
        }
        if template.is_empty() {
            return Err(ShiftError::invalid_path(template, "empty path"));
        }

        let mut tokens = Vec::new();
        for segment in template.split('.') {
            parse_segment(template, segment, &mut tokens)?;
        }
        Ok(Self { tokens })
    }

    /// The template addressing the whole document
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of `[*]` markers left in the template
    pub fn wildcard_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, PathToken::Wildcard))
            .count()
    }

    pub fn has_wildcard(&self) -> bool {
        self.tokens.contains(&PathToken::Wildcard)
    }

    /// Replace the first remaining `[*]` with a concrete index
    ///
    /// Returns an unchanged copy when no wildcard is left.
    pub fn bind_first_wildcard(&self, index: usize) -> Self {
        let mut tokens = self.tokens.clone();
        if let Some(slot) = tokens.iter_mut().find(|t| matches!(t, PathToken::Wildcard)) {
            *slot = PathToken::Index(index);
        }
        Self { tokens }
    }

    /// The path of the array the first remaining `[*]` iterates over
    ///
    /// For `a[0].b[*].c` this is `a[0].b`. Without a wildcard the whole
    /// template is returned.
    pub fn wildcard_prefix(&self) -> Self {
        let end = self
            .tokens
            .iter()
            .position(|t| matches!(t, PathToken::Wildcard))
            .unwrap_or(self.tokens.len());
        Self {
            tokens: self.tokens[..end].to_vec(),
        }
    }
}

fn parse_segment(
    template: &str,
    segment: &str,
    tokens: &mut Vec<PathToken>,
) -> Result<(), ShiftError> {
    let (key, mut rest) = match segment.find('[') {
        Some(open) => segment.split_at(open),
        None => (segment, ""),
    };

    if key.contains(']') {
        return Err(ShiftError::invalid_path(template, "unmatched ']'"));
    }
    if key.is_empty() && rest.is_empty() {
        return Err(ShiftError::invalid_path(template, "empty segment"));
    }
    if !key.is_empty() {
        tokens.push(PathToken::Key(key.to_string()));
    }

    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return Err(ShiftError::invalid_path(
                template,
                format!("unexpected text '{}' after index", rest),
            ));
        };
        let Some(close) = inner.find(']') else {
            return Err(ShiftError::invalid_path(template, "unclosed '['"));
        };

        let index = &inner[..close];
        let token = if index == "*" {
            PathToken::Wildcard
        } else {
            index.parse::<usize>().map(PathToken::Index).map_err(|_| {
                ShiftError::invalid_path(template, format!("bad array index '{}'", index))
            })?
        };
        tokens.push(token);
        rest = &inner[close + 1..];
    }

    Ok(())
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str(ROOT);
        }
        for (i, token) in self.tokens.iter().enumerate() {
            match token {
                PathToken::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathToken::Index(index) => write!(f, "[{}]", index)?,
                PathToken::Wildcard => f.write_str("[*]")?,
            }
        }
        Ok(())
    }
}
