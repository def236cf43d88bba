//! Validation issue types.
//!
//! An [`Issue`] is one violated constraint: a path into the input plus a
//! human-readable message. Schema backends emit issues in input order and
//! collect every violation, not just the first.

use serde::{Deserialize, Serialize};

/// One step of an issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object property name.
    Key(String),
    /// An array element index.
    Index(usize),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

/// A single validation violation.
///
/// The `path` addresses the offending location within the schema's shape;
/// the `message` is non-empty and human-readable. The issue list is the only
/// contractually stable part of a validation failure.
///
/// # Example
///
/// ```
/// use praxis_core::Issue;
///
/// let issue = Issue::at(["user", "email"], "Expected string, received number");
/// assert_eq!(issue.path_string(), "$.user.email");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Location of the violation within the input.
    pub path: Vec<PathSegment>,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Issue {
    /// Creates an issue at the given path.
    #[must_use]
    pub fn at<P, S>(path: P, message: impl Into<String>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Creates an issue addressing the input as a whole (empty path).
    #[must_use]
    pub fn root(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Renders the path as a `$`-rooted dotted string, e.g. `$.items.0.name`.
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            out.push('.');
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_string_is_dollar_rooted() {
        let issue = Issue::at(["a", "b"], "bad");
        assert_eq!(issue.path_string(), "$.a.b");
        assert_eq!(Issue::root("bad").path_string(), "$");
    }

    #[test]
    fn test_mixed_segments() {
        let issue = Issue {
            path: vec![
                PathSegment::Key("items".to_string()),
                PathSegment::Index(2),
                PathSegment::Key("name".to_string()),
            ],
            message: "Required".to_string(),
        };
        assert_eq!(issue.path_string(), "$.items.2.name");
    }

    #[test]
    fn test_serialization_shape() {
        let issue = Issue::at(["num1"], "Expected number, received string");
        let json = serde_json::to_value(&issue).expect("serialization should work");
        assert_eq!(
            json,
            serde_json::json!({
                "path": ["num1"],
                "message": "Expected number, received string"
            })
        );
    }

    #[test]
    fn test_index_segments_serialize_as_numbers() {
        let issue = Issue::at([PathSegment::from("xs"), PathSegment::from(0)], "bad");
        let json = serde_json::to_value(&issue).expect("serialization should work");
        assert_eq!(json["path"], serde_json::json!(["xs", 0]));
    }
}
