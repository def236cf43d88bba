//! The discriminated result shape.
//!
//! Every resolver invocation ends in an [`Outcome`]: a success carrying the
//! handler's data and a status, or a [`NormalizedFailure`] carrying an
//! explicit kind, a status from the fixed table, and optionally shaped
//! validation issues. The JSON encoding is the wire contract:
//!
//! ```json
//! { "success": true,  "status": 200, "data": { } }
//! { "success": false, "error": { "kind": "domain", "status": 403, "message": "" } }
//! ```

use crate::{shape, ErrorCode, ErrorKind, IssueShape, ResolverError, ShapedIssues};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

/// A failure normalized into the discriminated shape.
///
/// Built by the pipeline from a [`ResolverError`], or directly by handler
/// code through [`Events::fail`](crate::Events::fail). The underlying error
/// stays reachable through `cause` for diagnostics but is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedFailure {
    /// Explicit kind discriminant.
    pub kind: ErrorKind,
    /// HTTP-style integer status.
    pub status: u16,
    /// Human-readable message.
    pub message: String,
    /// Shaped validation issues, present for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<ShapedIssues>,
    /// Caller-defined structured payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// The original error, kept for diagnostics; not serialized.
    #[serde(skip)]
    pub cause: Option<Arc<anyhow::Error>>,
}

impl NormalizedFailure {
    /// Creates a domain-kind failure with the given payload and status.
    #[must_use]
    pub fn domain(message: impl Into<String>, code: ErrorCode, payload: Option<Value>) -> Self {
        Self {
            kind: ErrorKind::Domain,
            status: code.as_u16(),
            message: message.into(),
            issues: None,
            payload,
            cause: None,
        }
    }

    /// Normalizes a [`ResolverError`], shaping validation issues with `mode`.
    #[must_use]
    pub fn from_error(error: ResolverError, mode: IssueShape) -> Self {
        match error {
            ResolverError::Validation { issues, cause } => Self {
                kind: ErrorKind::Validation,
                status: ErrorCode::BadRequest.as_u16(),
                message: "input validation failed".to_string(),
                issues: Some(shape(&issues, mode)),
                payload: None,
                cause: cause.map(Arc::new),
            },
            ResolverError::Domain {
                message,
                code,
                payload,
                cause,
            } => Self {
                kind: ErrorKind::Domain,
                status: code.as_u16(),
                message,
                issues: None,
                payload,
                cause: cause.map(Arc::new),
            },
            ResolverError::Unexpected(cause) => Self {
                kind: ErrorKind::Unexpected,
                status: ErrorCode::InternalServerError.as_u16(),
                message: cause.to_string(),
                issues: None,
                payload: None,
                cause: Some(Arc::new(cause)),
            },
        }
    }
}

/// The discriminated result of a resolver invocation.
///
/// # Example
///
/// ```
/// use praxis_core::Outcome;
///
/// let outcome = Outcome::success(42);
/// assert!(outcome.is_success());
/// assert_eq!(outcome.status(), 200);
/// assert_eq!(outcome.data(), Some(&42));
/// ```
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// The handler produced a value.
    Success {
        /// HTTP-style status, `200` unless the handler overrode it.
        status: u16,
        /// The handler's data.
        data: T,
    },
    /// The invocation failed.
    Failure(NormalizedFailure),
}

impl<T> Outcome<T> {
    /// Wraps a value as a success with status `200`.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self::Success {
            status: http::StatusCode::OK.as_u16(),
            data,
        }
    }

    /// Wraps a value as a success with an explicit status from the table.
    #[must_use]
    pub fn success_with(data: T, code: ErrorCode) -> Self {
        Self::Success {
            status: code.as_u16(),
            data,
        }
    }

    /// Wraps a normalized failure.
    #[must_use]
    pub const fn failure(failure: NormalizedFailure) -> Self {
        Self::Failure(failure)
    }

    /// Returns `true` for the success variant.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the status carried by either variant.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } => *status,
            Self::Failure(failure) => failure.status,
        }
    }

    /// Returns the success data, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Consumes the outcome, returning the success data.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&NormalizedFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

impl<T: Serialize> Outcome<T> {
    /// Erases the data type, serializing it to a JSON value.
    ///
    /// Used when outcomes of differently typed resolvers must share one
    /// shape, e.g. behind a matcher.
    pub fn into_json(self) -> Result<Outcome<Value>, serde_json::Error> {
        Ok(match self {
            Self::Success { status, data } => Outcome::Success {
                status,
                data: serde_json::to_value(data)?,
            },
            Self::Failure(failure) => Outcome::Failure(failure),
        })
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { status, data } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("status", status)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            Self::Failure(failure) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", failure)?;
                map.end()
            }
        }
    }
}

/// What a handler hands back to the pipeline.
///
/// A plain value is wrapped as a `200` success during normalization; an
/// already discriminated [`Outcome`] passes through unchanged, so wrapping is
/// idempotent and never doubles up.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    /// A plain value, to be wrapped as a success.
    Plain(T),
    /// An already discriminated outcome, passed through as-is.
    Wrapped(Outcome<T>),
}

impl<T> From<T> for Reply<T> {
    fn from(data: T) -> Self {
        Self::Plain(data)
    }
}

impl<T> From<Outcome<T>> for Reply<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self::Wrapped(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Issue;

    #[test]
    fn test_success_serialization() {
        let outcome = Outcome::success(serde_json::json!({ "sum": 320 }));
        let json = serde_json::to_value(&outcome).expect("serialization should work");
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "status": 200, "data": { "sum": 320 } })
        );
    }

    #[test]
    fn test_failure_serialization_skips_cause() {
        let failure = NormalizedFailure::from_error(
            ResolverError::validation_with_cause(
                vec![Issue::at(["num1"], "Expected number, received string")],
                anyhow::anyhow!("backend detail"),
            ),
            IssueShape::Raw,
        );
        let json =
            serde_json::to_value(Outcome::<()>::failure(failure)).expect("should serialize");
        assert_eq!(json["success"], serde_json::json!(false));
        assert_eq!(json["error"]["kind"], serde_json::json!("validation"));
        assert_eq!(json["error"]["status"], serde_json::json!(400));
        assert!(json["error"].get("cause").is_none());
    }

    #[test]
    fn test_success_with_created_status() {
        let outcome = Outcome::success_with("id-1", ErrorCode::Created);
        assert_eq!(outcome.status(), 201);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_from_error_keeps_cause_reachable() {
        let failure = NormalizedFailure::from_error(
            ResolverError::unexpected(anyhow::anyhow!("boom")),
            IssueShape::Raw,
        );
        assert_eq!(failure.kind, ErrorKind::Unexpected);
        assert_eq!(failure.status, 500);
        assert!(failure.cause.is_some());
    }

    #[test]
    fn test_reply_conversions() {
        let plain: Reply<i64> = 7.into();
        assert!(matches!(plain, Reply::Plain(7)));
        let wrapped: Reply<i64> = Outcome::success(7).into();
        assert!(matches!(wrapped, Reply::Wrapped(Outcome::Success { .. })));
    }

    #[test]
    fn test_into_json_preserves_status() {
        let outcome = Outcome::success_with(vec![1, 2, 3], ErrorCode::Created)
            .into_json()
            .expect("data serializes");
        assert_eq!(outcome.status(), 201);
        assert_eq!(outcome.data(), Some(&serde_json::json!([1, 2, 3])));
    }
}
