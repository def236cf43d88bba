//! # Praxis Schema
//!
//! Schema validation for the Praxis resolver pipeline.
//!
//! Two independent engines live behind the single [`Schema`] capability
//! trait: [`constraint`] (structural-constraint style, one declarative node
//! enum) and [`combinator`] (declarative-combinator style, chainable schema
//! values). Callers depend only on the trait; nothing in the pipeline ever
//! inspects which engine produced a schema.
//!
//! Given equivalent schemas, the two engines accept and reject the same
//! inputs, apply the same declared coercions, and emit the same issues.

#![doc(html_root_url = "https://docs.rs/praxis-schema/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod combinator;
pub mod constraint;

pub use constraint::Constraint;

use praxis_core::{Issue, ResolverError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The single capability the pipeline requires of a schema.
///
/// `parse` either returns the coerced/normalized value (schemas may coerce
/// where declared, e.g. numeric string to number) or the full ordered list
/// of violations. Engines collect every violation, never just the first.
pub trait Schema: Send + Sync {
    /// Validates a raw value, returning the coerced value or all issues.
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>>;

    /// Whether an absent object property satisfies this schema.
    ///
    /// Only optional wrappers return `true`; object validation consults this
    /// before reporting a missing property.
    fn accepts_missing(&self) -> bool {
        false
    }
}

impl Schema for Box<dyn Schema> {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        self.as_ref().parse(raw)
    }

    fn accepts_missing(&self) -> bool {
        self.as_ref().accepts_missing()
    }
}

impl Schema for std::sync::Arc<dyn Schema> {
    fn parse(&self, raw: &Value) -> Result<Value, Vec<Issue>> {
        self.as_ref().parse(raw)
    }

    fn accepts_missing(&self) -> bool {
        self.as_ref().accepts_missing()
    }
}

/// Validates a value against a schema and decodes it into `T`.
///
/// A failed validation carries the full issue list. A decode mismatch after
/// successful validation means the schema and `T` disagree, which is a
/// programmer error surfaced as [`ResolverError::Unexpected`].
///
/// # Example
///
/// ```
/// use praxis_schema::{combinator, Schema};
///
/// #[derive(serde::Deserialize)]
/// struct Login {
///     name: String,
/// }
///
/// let schema = combinator::object().field("name", combinator::string());
/// let login: Login =
///     praxis_schema::validate(&serde_json::json!({ "name": "John" }), &schema)
///         .expect("valid input");
/// assert_eq!(login.name, "John");
/// ```
pub fn validate<T: DeserializeOwned>(
    value: &Value,
    schema: &dyn Schema,
) -> Result<T, ResolverError> {
    let coerced = schema.parse(value).map_err(ResolverError::validation)?;
    serde_json::from_value(coerced).map_err(|err| {
        ResolverError::unexpected(
            anyhow::Error::new(err).context("validated value did not match the requested type"),
        )
    })
}

/// JSON type name used in issue messages.
pub(crate) fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The shared type-mismatch message, e.g. `Expected string, received number`.
pub(crate) fn mismatch(expected: &str, value: &Value) -> String {
    format!("Expected {expected}, received {}", type_of(value))
}
