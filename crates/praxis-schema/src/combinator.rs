//! Declarative-combinator schema engine.
//!
//! Schemas are built by composing small chainable values: `string().min(3)`,
//! `object().field("age", integer().coerce())`. Each combinator implements
//! [`Schema`] on its own and reports issues relative to itself; containers
//! re-root child issues under the child's path segment.
//!
//! # Example
//!
//! ```
//! use praxis_schema::combinator::{integer, object, optional, string};
//! use praxis_schema::Schema;
//!
//! let schema = object()
//!     .field("name", string().min(1))
//!     .field("age", integer().min(0))
//!     .field("nickname", optional(string()));
//!
//! assert!(schema
//!     .parse(&serde_json::json!({ "name": "Alice", "age": 30 }))
//!     .is_ok());
//! ```

use crate::{mismatch, Schema};
use praxis_core::{Issue, PathSegment};
use regex::Regex;
use serde_json::Value;

/// A string schema.
#[must_use]
pub fn string() -> StringSchema {
    StringSchema {
        min: None,
        max: None,
        pattern: None,
    }
}

/// An integer schema.
#[must_use]
pub fn integer() -> IntegerSchema {
    IntegerSchema {
        min: None,
        max: None,
        coerce: false,
    }
}

/// A number schema.
#[must_use]
pub fn number() -> NumberSchema {
    NumberSchema {
        min: None,
        max: None,
        coerce: false,
    }
}

/// A boolean schema.
#[must_use]
pub fn boolean() -> BooleanSchema {
    BooleanSchema
}

/// A schema accepting anything.
#[must_use]
pub fn any() -> AnySchema {
    AnySchema
}

/// An array schema with a uniform item schema.
#[must_use]
pub fn array(items: impl Schema + 'static) -> ArraySchema {
    ArraySchema {
        items: Box::new(items),
        min: None,
        max: None,
    }
}

/// An object schema; add properties with [`ObjectSchema::field`].
#[must_use]
pub fn object() -> ObjectSchema {
    ObjectSchema {
        fields: Vec::new(),
        deny_unknown: false,
    }
}

/// Wraps a schema so a missing property or `null` satisfies it.
#[must_use]
pub fn optional(inner: impl Schema + 'static) -> OptionalSchema {
    OptionalSchema {
        inner: Box::new(inner),
    }
}

/// Re-roots child issues under a parent segment.
fn prefix(issues: Vec<Issue>, segment: PathSegment) -> impl Iterator<Item = Issue> {
    issues.into_iter().map(move |mut issue| {
        issue.path.insert(0, segment.clone());
        issue
    })
}

/// String combinator; see [`string`].
#[derive(Debug, Clone)]
pub struct StringSchema {
    min: Option<usize>,
    max: Option<usize>,
    pattern: Option<Regex>,
}

impl StringSchema {
    /// Sets the minimum length in characters.
    #[must_use]
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the maximum length in characters.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the pattern the string must match.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is not a valid regular expression; a malformed
    /// schema definition is a programmer error.
    #[must_use]
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(Regex::new(pattern).expect("schema pattern must be a valid regex"));
        self
    }
}

impl Schema for StringSchema {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        let Some(text) = raw.as_str() else {
            return Err(vec![Issue::root(mismatch("string", raw))]);
        };
        let mut issues = Vec::new();
        let chars = text.chars().count();
        if let Some(min) = self.min {
            if chars < min {
                issues.push(Issue::root(format!("Must be at least {min} characters")));
            }
        }
        if let Some(max) = self.max {
            if chars > max {
                issues.push(Issue::root(format!("Must be at most {max} characters")));
            }
        }
        if let Some(re) = &self.pattern {
            if !re.is_match(text) {
                issues.push(Issue::root("Does not match the required pattern".to_string()));
            }
        }
        if issues.is_empty() {
            Ok(raw.clone())
        } else {
            Err(issues)
        }
    }
}

/// Integer combinator; see [`integer`].
#[derive(Debug, Clone)]
pub struct IntegerSchema {
    min: Option<i64>,
    max: Option<i64>,
    coerce: bool,
}

impl IntegerSchema {
    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Coerces numeric strings to integers.
    #[must_use]
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }
}

impl Schema for IntegerSchema {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        let parsed = match raw {
            Value::Number(n) => n.as_i64().map(|n| (n, raw.clone())),
            Value::String(s) if self.coerce => {
                s.trim().parse::<i64>().ok().map(|n| (n, Value::from(n)))
            }
            _ => None,
        };
        let Some((n, coerced)) = parsed else {
            return Err(vec![Issue::root(mismatch("integer", raw))]);
        };
        let mut issues = Vec::new();
        if let Some(min) = self.min {
            if n < min {
                issues.push(Issue::root(format!("Must be at least {min}")));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                issues.push(Issue::root(format!("Must be at most {max}")));
            }
        }
        if issues.is_empty() {
            Ok(coerced)
        } else {
            Err(issues)
        }
    }
}

/// Number combinator; see [`number`].
#[derive(Debug, Clone)]
pub struct NumberSchema {
    min: Option<f64>,
    max: Option<f64>,
    coerce: bool,
}

impl NumberSchema {
    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Coerces numeric strings to numbers.
    #[must_use]
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }
}

impl Schema for NumberSchema {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        let parsed = match raw {
            Value::Number(n) => n.as_f64().map(|n| (n, raw.clone())),
            Value::String(s) if self.coerce => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .and_then(|n| serde_json::Number::from_f64(n).map(|num| (n, Value::Number(num)))),
            _ => None,
        };
        let Some((n, coerced)) = parsed else {
            return Err(vec![Issue::root(mismatch("number", raw))]);
        };
        let mut issues = Vec::new();
        if let Some(min) = self.min {
            if n < min {
                issues.push(Issue::root(format!("Must be at least {min}")));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                issues.push(Issue::root(format!("Must be at most {max}")));
            }
        }
        if issues.is_empty() {
            Ok(coerced)
        } else {
            Err(issues)
        }
    }
}

/// Boolean combinator; see [`boolean`].
#[derive(Debug, Clone, Copy)]
pub struct BooleanSchema;

impl Schema for BooleanSchema {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        if raw.is_boolean() {
            Ok(raw.clone())
        } else {
            Err(vec![Issue::root(mismatch("boolean", raw))])
        }
    }
}

/// Pass-through combinator; see [`any`].
#[derive(Debug, Clone, Copy)]
pub struct AnySchema;

impl Schema for AnySchema {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        Ok(raw.clone())
    }
}

/// Array combinator; see [`array`].
pub struct ArraySchema {
    items: Box<dyn Schema>,
    min: Option<usize>,
    max: Option<usize>,
}

impl ArraySchema {
    /// Sets the minimum item count.
    #[must_use]
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the maximum item count.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

impl Schema for ArraySchema {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        let Some(elements) = raw.as_array() else {
            return Err(vec![Issue::root(mismatch("array", raw))]);
        };
        let mut issues = Vec::new();
        if let Some(min) = self.min {
            if elements.len() < min {
                issues.push(Issue::root(format!("Must contain at least {min} items")));
            }
        }
        if let Some(max) = self.max {
            if elements.len() > max {
                issues.push(Issue::root(format!("Must contain at most {max} items")));
            }
        }
        let mut coerced = Vec::with_capacity(elements.len());
        for (idx, element) in elements.iter().enumerate() {
            match self.items.parse(element) {
                Ok(value) => coerced.push(value),
                Err(child) => {
                    issues.extend(prefix(child, PathSegment::Index(idx)));
                    coerced.push(element.clone());
                }
            }
        }
        if issues.is_empty() {
            Ok(Value::Array(coerced))
        } else {
            Err(issues)
        }
    }
}

/// Object combinator; see [`object`].
pub struct ObjectSchema {
    fields: Vec<(String, Box<dyn Schema>)>,
    deny_unknown: bool,
}

impl ObjectSchema {
    /// Declares a property. Properties are required unless wrapped in
    /// [`optional`]; declaration order fixes issue order.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, schema: impl Schema + 'static) -> Self {
        self.fields.push((name.into(), Box::new(schema)));
        self
    }

    /// Rejects undeclared keys instead of passing them through.
    #[must_use]
    pub fn deny_unknown(mut self) -> Self {
        self.deny_unknown = true;
        self
    }
}

impl Schema for ObjectSchema {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        let Some(map) = raw.as_object() else {
            return Err(vec![Issue::root(mismatch("object", raw))]);
        };
        let mut issues = Vec::new();
        let mut coerced = map.clone();
        for (name, schema) in &self.fields {
            match map.get(name) {
                Some(property) => match schema.parse(property) {
                    Ok(value) => {
                        coerced.insert(name.clone(), value);
                    }
                    Err(child) => {
                        issues.extend(prefix(child, PathSegment::Key(name.clone())));
                    }
                },
                None => {
                    if !schema.accepts_missing() {
                        issues.push(Issue::at([name.as_str()], "Required"));
                    }
                }
            }
        }
        if self.deny_unknown {
            for key in map.keys() {
                if !self.fields.iter().any(|(name, _)| name == key) {
                    issues.push(Issue::root(format!("Unrecognized key: '{key}'")));
                }
            }
        }
        if issues.is_empty() {
            Ok(Value::Object(coerced))
        } else {
            Err(issues)
        }
    }
}

/// Optional wrapper; see [`optional`].
pub struct OptionalSchema {
    inner: Box<dyn Schema>,
}

impl Schema for OptionalSchema {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        if raw.is_null() {
            Ok(Value::Null)
        } else {
            self.inner.parse(raw)
        }
    }

    fn accepts_missing(&self) -> bool {
        true
    }
}
