//! Structural-constraint schema engine.
//!
//! One declarative [`Constraint`] enum describes the expected shape: a node
//! kind plus the constraints that apply to it. Validation walks the input
//! and the constraint tree together, collecting every violation with its
//! path before reporting.
//!
//! # Example
//!
//! ```
//! use praxis_schema::{Constraint, Schema};
//!
//! let schema = Constraint::object(vec![
//!     ("name", Constraint::string().min_len(1)),
//!     ("age", Constraint::integer().min_int(0)),
//!     ("tags", Constraint::array(Constraint::string()).optional()),
//! ]);
//!
//! assert!(schema.parse(&serde_json::json!({ "name": "Alice", "age": 30 })).is_ok());
//! let issues = schema
//!     .parse(&serde_json::json!({ "name": "", "age": "x" }))
//!     .unwrap_err();
//! assert_eq!(issues.len(), 2);
//! ```

use crate::{mismatch, Schema};
use praxis_core::{Issue, PathSegment};
use regex::Regex;
use serde_json::Value;

/// A declarative structural constraint on a JSON value.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// A string with optional length and pattern constraints.
    String {
        /// Minimum length in characters.
        min_len: Option<usize>,
        /// Maximum length in characters.
        max_len: Option<usize>,
        /// Pattern the string must match.
        pattern: Option<Regex>,
    },
    /// An integer with optional bounds.
    Integer {
        /// Inclusive lower bound.
        min: Option<i64>,
        /// Inclusive upper bound.
        max: Option<i64>,
        /// Whether a numeric string is coerced to an integer.
        coerce: bool,
    },
    /// A number with optional bounds.
    Number {
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
        /// Whether a numeric string is coerced to a number.
        coerce: bool,
    },
    /// A boolean.
    Boolean,
    /// An array with a uniform item constraint and optional size bounds.
    Array {
        /// Constraint every item must satisfy.
        items: Box<Constraint>,
        /// Minimum item count.
        min_items: Option<usize>,
        /// Maximum item count.
        max_items: Option<usize>,
    },
    /// An object with named properties, all required unless wrapped in
    /// [`Constraint::Optional`]. Unknown keys pass through unless denied.
    Object {
        /// Declared properties in declaration order.
        properties: Vec<(String, Constraint)>,
        /// Whether undeclared keys are rejected.
        deny_unknown: bool,
    },
    /// Accepts a missing property or `null`; otherwise defers to the inner
    /// constraint.
    Optional(Box<Constraint>),
    /// Accepts anything.
    Any,
    /// Accepts only `null`.
    Null,
}

impl Constraint {
    /// A string constraint.
    #[must_use]
    pub fn string() -> Self {
        Self::String {
            min_len: None,
            max_len: None,
            pattern: None,
        }
    }

    /// An integer constraint.
    #[must_use]
    pub fn integer() -> Self {
        Self::Integer {
            min: None,
            max: None,
            coerce: false,
        }
    }

    /// A number constraint.
    #[must_use]
    pub fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
            coerce: false,
        }
    }

    /// A boolean constraint.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Boolean
    }

    /// An array constraint with a uniform item constraint.
    #[must_use]
    pub fn array(items: Constraint) -> Self {
        Self::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    /// An object constraint from `(name, constraint)` pairs.
    #[must_use]
    pub fn object(properties: Vec<(&str, Constraint)>) -> Self {
        Self::Object {
            properties: properties
                .into_iter()
                .map(|(name, constraint)| (name.to_string(), constraint))
                .collect(),
            deny_unknown: false,
        }
    }

    /// A constraint accepting anything.
    #[must_use]
    pub fn any() -> Self {
        Self::Any
    }

    /// A constraint accepting only `null`.
    #[must_use]
    pub fn null() -> Self {
        Self::Null
    }

    /// Sets the minimum string length.
    #[must_use]
    pub fn min_len(self, len: usize) -> Self {
        match self {
            Self::String {
                max_len, pattern, ..
            } => Self::String {
                min_len: Some(len),
                max_len,
                pattern,
            },
            other => other,
        }
    }

    /// Sets the maximum string length.
    #[must_use]
    pub fn max_len(self, len: usize) -> Self {
        match self {
            Self::String {
                min_len, pattern, ..
            } => Self::String {
                min_len,
                max_len: Some(len),
                pattern,
            },
            other => other,
        }
    }

    /// Sets the pattern a string must match.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is not a valid regular expression; a malformed
    /// schema definition is a programmer error.
    #[must_use]
    pub fn pattern(self, pattern: &str) -> Self {
        let compiled = Regex::new(pattern).expect("schema pattern must be a valid regex");
        match self {
            Self::String {
                min_len, max_len, ..
            } => Self::String {
                min_len,
                max_len,
                pattern: Some(compiled),
            },
            other => other,
        }
    }

    /// Sets the inclusive integer lower bound.
    #[must_use]
    pub fn min_int(self, min: i64) -> Self {
        match self {
            Self::Integer { max, coerce, .. } => Self::Integer {
                min: Some(min),
                max,
                coerce,
            },
            other => other,
        }
    }

    /// Sets the inclusive integer upper bound.
    #[must_use]
    pub fn max_int(self, max: i64) -> Self {
        match self {
            Self::Integer { min, coerce, .. } => Self::Integer {
                min,
                max: Some(max),
                coerce,
            },
            other => other,
        }
    }

    /// Sets the inclusive number lower bound.
    #[must_use]
    pub fn min_num(self, min: f64) -> Self {
        match self {
            Self::Number { max, coerce, .. } => Self::Number {
                min: Some(min),
                max,
                coerce,
            },
            other => other,
        }
    }

    /// Sets the inclusive number upper bound.
    #[must_use]
    pub fn max_num(self, max: f64) -> Self {
        match self {
            Self::Number { min, coerce, .. } => Self::Number {
                min,
                max: Some(max),
                coerce,
            },
            other => other,
        }
    }

    /// Enables numeric-string coercion for integer and number constraints.
    #[must_use]
    pub fn coercing(self) -> Self {
        match self {
            Self::Integer { min, max, .. } => Self::Integer {
                min,
                max,
                coerce: true,
            },
            Self::Number { min, max, .. } => Self::Number {
                min,
                max,
                coerce: true,
            },
            other => other,
        }
    }

    /// Sets the minimum array item count.
    #[must_use]
    pub fn min_items(self, min: usize) -> Self {
        match self {
            Self::Array {
                items, max_items, ..
            } => Self::Array {
                items,
                min_items: Some(min),
                max_items,
            },
            other => other,
        }
    }

    /// Sets the maximum array item count.
    #[must_use]
    pub fn max_items(self, max: usize) -> Self {
        match self {
            Self::Array {
                items, min_items, ..
            } => Self::Array {
                items,
                min_items,
                max_items: Some(max),
            },
            other => other,
        }
    }

    /// Marks this constraint as optional: a missing property or `null`
    /// satisfies it.
    #[must_use]
    pub fn optional(self) -> Self {
        match self {
            already @ Self::Optional(_) => already,
            inner => Self::Optional(Box::new(inner)),
        }
    }

    /// Rejects undeclared object keys instead of passing them through.
    #[must_use]
    pub fn deny_unknown(self) -> Self {
        match self {
            Self::Object { properties, .. } => Self::Object {
                properties,
                deny_unknown: true,
            },
            other => other,
        }
    }

    fn apply(&self, value: &Value, path: &mut Vec<PathSegment>, issues: &mut Vec<Issue>) -> Value {
        match self {
            Self::Optional(inner) => {
                if value.is_null() {
                    Value::Null
                } else {
                    inner.apply(value, path, issues)
                }
            }
            Self::Any => value.clone(),
            Self::Null => {
                if !value.is_null() {
                    push(issues, path, mismatch("null", value));
                }
                value.clone()
            }
            Self::Boolean => {
                if !value.is_boolean() {
                    push(issues, path, mismatch("boolean", value));
                }
                value.clone()
            }
            Self::String {
                min_len,
                max_len,
                pattern,
            } => {
                let Some(text) = value.as_str() else {
                    push(issues, path, mismatch("string", value));
                    return value.clone();
                };
                let chars = text.chars().count();
                if let Some(min) = min_len {
                    if chars < *min {
                        push(issues, path, format!("Must be at least {min} characters"));
                    }
                }
                if let Some(max) = max_len {
                    if chars > *max {
                        push(issues, path, format!("Must be at most {max} characters"));
                    }
                }
                if let Some(re) = pattern {
                    if !re.is_match(text) {
                        push(issues, path, "Does not match the required pattern".to_string());
                    }
                }
                value.clone()
            }
            Self::Integer { min, max, coerce } => {
                let parsed = match value {
                    Value::Number(n) => n.as_i64().map(|n| (n, value.clone())),
                    Value::String(s) if *coerce => s
                        .trim()
                        .parse::<i64>()
                        .ok()
                        .map(|n| (n, Value::from(n))),
                    _ => None,
                };
                let Some((n, coerced)) = parsed else {
                    push(issues, path, mismatch("integer", value));
                    return value.clone();
                };
                if let Some(min) = min {
                    if n < *min {
                        push(issues, path, format!("Must be at least {min}"));
                    }
                }
                if let Some(max) = max {
                    if n > *max {
                        push(issues, path, format!("Must be at most {max}"));
                    }
                }
                coerced
            }
            Self::Number { min, max, coerce } => {
                let parsed = match value {
                    Value::Number(n) => n.as_f64().map(|n| (n, value.clone())),
                    Value::String(s) if *coerce => s
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .and_then(|n| serde_json::Number::from_f64(n).map(|num| (n, Value::Number(num)))),
                    _ => None,
                };
                let Some((n, coerced)) = parsed else {
                    push(issues, path, mismatch("number", value));
                    return value.clone();
                };
                if let Some(min) = min {
                    if n < *min {
                        push(issues, path, format!("Must be at least {min}"));
                    }
                }
                if let Some(max) = max {
                    if n > *max {
                        push(issues, path, format!("Must be at most {max}"));
                    }
                }
                coerced
            }
            Self::Array {
                items,
                min_items,
                max_items,
            } => {
                let Some(elements) = value.as_array() else {
                    push(issues, path, mismatch("array", value));
                    return value.clone();
                };
                if let Some(min) = min_items {
                    if elements.len() < *min {
                        push(issues, path, format!("Must contain at least {min} items"));
                    }
                }
                if let Some(max) = max_items {
                    if elements.len() > *max {
                        push(issues, path, format!("Must contain at most {max} items"));
                    }
                }
                let coerced = elements
                    .iter()
                    .enumerate()
                    .map(|(idx, element)| {
                        path.push(PathSegment::Index(idx));
                        let out = items.apply(element, path, issues);
                        path.pop();
                        out
                    })
                    .collect();
                Value::Array(coerced)
            }
            Self::Object {
                properties,
                deny_unknown,
            } => {
                let Some(map) = value.as_object() else {
                    push(issues, path, mismatch("object", value));
                    return value.clone();
                };
                let mut coerced = map.clone();
                for (name, constraint) in properties {
                    path.push(PathSegment::Key(name.clone()));
                    match map.get(name) {
                        Some(property) => {
                            let out = constraint.apply(property, path, issues);
                            coerced.insert(name.clone(), out);
                        }
                        None => {
                            if !constraint.accepts_missing() {
                                push(issues, path, "Required".to_string());
                            }
                        }
                    }
                    path.pop();
                }
                if *deny_unknown {
                    for key in map.keys() {
                        if !properties.iter().any(|(name, _)| name == key) {
                            push(issues, path, format!("Unrecognized key: '{key}'"));
                        }
                    }
                }
                Value::Object(coerced)
            }
        }
    }
}

fn push(issues: &mut Vec<Issue>, path: &[PathSegment], message: String) {
    issues.push(Issue {
        path: path.to_vec(),
        message,
    });
}

impl Schema for Constraint {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        let mut issues = Vec::new();
        let mut path = Vec::new();
        let coerced = self.apply(raw, &mut path, &mut issues);
        if issues.is_empty() {
            Ok(coerced)
        } else {
            Err(issues)
        }
    }

    fn accepts_missing(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_matching_object() {
        let schema = Constraint::object(vec![
            ("num1", Constraint::number()),
            ("num2", Constraint::number()),
        ]);
        let parsed = schema
            .parse(&json!({ "num1": 100, "num2": 220 }))
            .expect("valid input");
        assert_eq!(parsed, json!({ "num1": 100, "num2": 220 }));
    }

    #[test]
    fn test_collects_every_violation() {
        let schema = Constraint::object(vec![
            ("name", Constraint::string().min_len(3)),
            ("age", Constraint::integer()),
            ("tags", Constraint::array(Constraint::string())),
        ]);
        let issues = schema
            .parse(&json!({ "name": "ab", "age": "x", "tags": [1, "ok", 2] }))
            .unwrap_err();
        // name too short, age not an integer, tags[0] and tags[2] not strings
        assert_eq!(issues.len(), 4);
        assert_eq!(issues[0].path_string(), "$.name");
        assert_eq!(issues[1].path_string(), "$.age");
        assert_eq!(issues[2].path_string(), "$.tags.0");
        assert_eq!(issues[3].path_string(), "$.tags.2");
    }

    #[test]
    fn test_missing_required_property() {
        let schema = Constraint::object(vec![("name", Constraint::string())]);
        let issues = schema.parse(&json!({})).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Required");
        assert_eq!(issues[0].path_string(), "$.name");
    }

    #[test]
    fn test_optional_property_may_be_absent_or_null() {
        let schema = Constraint::object(vec![(
            "nickname",
            Constraint::string().optional(),
        )]);
        assert!(schema.parse(&json!({})).is_ok());
        assert!(schema.parse(&json!({ "nickname": null })).is_ok());
        assert!(schema.parse(&json!({ "nickname": 3 })).is_err());
    }

    #[test]
    fn test_numeric_string_rejected_without_coercion() {
        let schema = Constraint::object(vec![("num1", Constraint::number())]);
        let issues = schema.parse(&json!({ "num1": "200" })).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Expected number, received string");
    }

    #[test]
    fn test_declared_coercion_rewrites_value() {
        let schema = Constraint::object(vec![("age", Constraint::integer().coercing())]);
        let parsed = schema.parse(&json!({ "age": "42" })).expect("coerces");
        assert_eq!(parsed["age"], json!(42));

        let issues = schema.parse(&json!({ "age": "nope" })).unwrap_err();
        assert_eq!(issues[0].message, "Expected integer, received string");
    }

    #[test]
    fn test_bounds_and_pattern() {
        let schema = Constraint::object(vec![
            ("code", Constraint::string().pattern("^[A-Z]{3}$")),
            ("count", Constraint::integer().min_int(1).max_int(10)),
        ]);
        assert!(schema.parse(&json!({ "code": "ABC", "count": 5 })).is_ok());
        let issues = schema
            .parse(&json!({ "code": "abc", "count": 11 }))
            .unwrap_err();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message, "Does not match the required pattern");
        assert_eq!(issues[1].message, "Must be at most 10");
    }

    #[test]
    fn test_deny_unknown_keys() {
        let schema =
            Constraint::object(vec![("name", Constraint::string())]).deny_unknown();
        let issues = schema
            .parse(&json!({ "name": "ok", "extra": 1 }))
            .unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Unrecognized key: 'extra'");
        assert_eq!(issues[0].path_string(), "$");
    }

    #[test]
    fn test_nested_paths() {
        let schema = Constraint::object(vec![(
            "user",
            Constraint::object(vec![("email", Constraint::string())]),
        )]);
        let issues = schema.parse(&json!({ "user": { "email": 5 } })).unwrap_err();
        assert_eq!(issues[0].path_string(), "$.user.email");
        assert_eq!(issues[0].message, "Expected string, received number");
    }

    #[test]
    #[should_panic(expected = "valid regex")]
    fn test_malformed_pattern_fails_fast() {
        let _ = Constraint::string().pattern("([");
    }

    #[test]
    fn test_root_scalar_schema() {
        let schema = Constraint::string();
        assert!(schema.parse(&json!("John")).is_ok());
        let issues = schema.parse(&json!(9)).unwrap_err();
        assert_eq!(issues[0].path_string(), "$");
    }
}
