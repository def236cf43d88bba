//! Issue shaping.
//!
//! Converts the flat issue list a schema backend emitted into the shape the
//! resolver was configured with: the raw list, a tree keyed by field path, or
//! a flattened field/form partition. Shaping is deterministic: identical
//! issue lists always shape identically, and ordering within each bucket
//! follows the order the backend emitted.

use crate::{Issue, PathSegment};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// How validation issues are presented on a normalized failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueShape {
    /// The issue list unchanged.
    #[default]
    Raw,
    /// A tree mirroring the schema's shape, messages under a reserved
    /// `_errors` key at each node.
    Formatted,
    /// Field-level messages keyed by top-level field name, plus form-level
    /// messages for issues with an empty path.
    Flattened,
}

/// Shaped issues attached to a normalized failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShapedIssues {
    /// Raw issue list.
    Raw(Vec<Issue>),
    /// Path-keyed tree.
    Formatted(IssueNode),
    /// Field/form partition.
    Flattened(FlattenedIssues),
}

impl ShapedIssues {
    /// Total number of messages across the shape.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Raw(issues) => issues.len(),
            Self::Formatted(node) => node.message_count(),
            Self::Flattened(flat) => {
                flat.form_errors.len() + flat.field_errors.values().map(Vec::len).sum::<usize>()
            }
        }
    }

    /// Returns `true` if no messages are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One node of the formatted tree.
///
/// Serializes as an object whose `_errors` key holds this node's messages and
/// whose remaining keys are child nodes, mirroring the shape the schema
/// declared (array indices become string keys).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueNode {
    errors: Vec<String>,
    children: IndexMap<String, IssueNode>,
}

impl IssueNode {
    /// Messages attached directly to this node.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Looks up a child node by key.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&IssueNode> {
        self.children.get(key)
    }

    /// Child keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    fn message_count(&self) -> usize {
        self.errors.len()
            + self
                .children
                .values()
                .map(IssueNode::message_count)
                .sum::<usize>()
    }

    fn insert(&mut self, path: &[PathSegment], message: String) {
        match path.first() {
            None => self.errors.push(message),
            Some(segment) => self
                .children
                .entry(segment.to_string())
                .or_default()
                .insert(&path[1..], message),
        }
    }
}

impl Serialize for IssueNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len() + 1))?;
        map.serialize_entry("_errors", &self.errors)?;
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

/// The flattened field/form partition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedIssues {
    /// Messages for issues with an empty path.
    pub form_errors: Vec<String>,
    /// Messages keyed by the issue's top-level field name.
    pub field_errors: IndexMap<String, Vec<String>>,
}

/// Shapes an issue list into the requested presentation.
///
/// # Example
///
/// ```
/// use praxis_core::{shape, Issue, IssueShape, ShapedIssues};
///
/// let issues = vec![Issue::at(["name"], "Expected string, received number")];
/// let ShapedIssues::Formatted(tree) = shape(&issues, IssueShape::Formatted) else {
///     unreachable!()
/// };
/// let name = tree.child("name").expect("name node");
/// assert_eq!(name.errors(), ["Expected string, received number"]);
/// ```
#[must_use]
pub fn shape(issues: &[Issue], mode: IssueShape) -> ShapedIssues {
    match mode {
        IssueShape::Raw => ShapedIssues::Raw(issues.to_vec()),
        IssueShape::Formatted => {
            let mut root = IssueNode::default();
            for issue in issues {
                root.insert(&issue.path, issue.message.clone());
            }
            ShapedIssues::Formatted(root)
        }
        IssueShape::Flattened => {
            let mut flat = FlattenedIssues::default();
            for issue in issues {
                match issue.path.first() {
                    None => flat.form_errors.push(issue.message.clone()),
                    Some(segment) => flat
                        .field_errors
                        .entry(segment.to_string())
                        .or_default()
                        .push(issue.message.clone()),
                }
            }
            ShapedIssues::Flattened(flat)
        }
    }
}
