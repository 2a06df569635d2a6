//! Token paths: ordered segment sequences, dot-joined for display

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A token's position in the document tree, e.g. `color.primary.500`.
///
/// Paths order lexicographically by segment, which gives every consumer a
/// deterministic iteration order without relying on hash-map internals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenPath {
    segments: Vec<String>,
}

impl TokenPath {
    /// Build a path from pre-validated segments.
    pub fn new(segments: Vec<String>) -> Result<Self, CoreError> {
        if segments.is_empty() {
            return Err(CoreError::EmptyPath);
        }
        for seg in &segments {
            validate_segment(seg)?;
        }
        Ok(Self { segments })
    }

    /// Parse a dot-separated path, e.g. `color.primary.500`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::new(raw.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment, used to group emitted artifacts by token family.
    pub fn root_group(&self) -> &str {
        &self.segments[0]
    }

    /// Leaf segment (the last one).
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Path with the leaf segment removed, if this path has a parent group.
    pub fn parent(&self) -> Option<TokenPath> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Extend this path with a child segment.
    pub fn child(&self, segment: &str) -> Result<TokenPath, CoreError> {
        validate_segment(segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }
}

fn validate_segment(seg: &str) -> Result<(), CoreError> {
    if seg.is_empty() {
        return Err(CoreError::EmptyPathSegment);
    }
    if seg.contains('.') || seg.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidPathSegment(seg.to_string()));
    }
    Ok(())
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for TokenPath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TokenPath {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TokenPath> for String {
    fn from(p: TokenPath) -> String {
        p.to_string()
    }
}

/// A `$value` string of the form `{dot.separated.path}` is an alias
/// reference; anything else is a literal.
pub fn parse_reference(value: &str) -> Option<Result<TokenPath, CoreError>> {
    let inner = value.strip_prefix('{')?.strip_suffix('}')?;
    Some(TokenPath::parse(inner))
}
