//! Error types for the resolver pipeline.
//!
//! Three error classes flow through the pipeline, each carrying an explicit
//! [`ErrorKind`] discriminant rather than relying on downcasting:
//!
//! - validation failures, built from the issue list a schema backend emitted;
//! - domain failures, raised deliberately by handler code with a status from
//!   the [`ErrorCode`] table;
//! - unexpected errors, which the pipeline refuses to absorb silently.

use crate::{ErrorCode, Issue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Discriminant carried by every pipeline error and normalized failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input did not satisfy the schema.
    Validation,
    /// Handler code explicitly rejected the request.
    Domain,
    /// Anything else raised by handler or context-factory code.
    Unexpected,
}

/// An application-level rejection raised by handler or context-factory code.
///
/// Carries a message, a status from the [`ErrorCode`] table, an optional
/// structured payload for the client, and an optional underlying cause kept
/// for diagnostics.
///
/// # Example
///
/// ```
/// use praxis_core::{DomainError, ErrorCode};
///
/// let err = DomainError::new("quota exceeded", ErrorCode::Forbidden)
///     .with_payload(serde_json::json!({ "limit": 10 }));
/// assert_eq!(err.status(), 403);
/// ```
#[derive(Error, Debug)]
#[error("{message}")]
pub struct DomainError {
    message: String,
    code: ErrorCode,
    payload: Option<Value>,
    #[source]
    cause: Option<anyhow::Error>,
}

impl DomainError {
    /// Creates a domain error with a message and a status code from the table.
    #[must_use]
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            payload: None,
            cause: None,
        }
    }

    /// Attaches a structured payload for client consumption.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the symbolic status code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the integer status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.code.as_u16()
    }

    /// Returns the structured payload if one was attached.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub(crate) fn into_parts(self) -> (String, ErrorCode, Option<Value>, Option<anyhow::Error>) {
        (self.message, self.code, self.payload, self.cause)
    }
}

/// What handler and context-factory code returns on failure.
///
/// `From` impls let `?` propagate both deliberate [`DomainError`] rejections
/// and arbitrary [`anyhow::Error`] causes.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// A deliberate application-level rejection.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Anything the handler could not anticipate.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl HandlerError {
    /// Wraps an arbitrary error as unexpected.
    #[must_use]
    pub fn unexpected(cause: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected(cause.into())
    }
}

/// The typed error a resolver raises to its caller.
///
/// With the default configuration validation and domain failures come back
/// as discriminated [`Outcome`](crate::Outcome) values and this type only
/// surfaces for unexpected errors; with `throw_on_fail` every failure is
/// raised as a `ResolverError` instead.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The input did not satisfy the schema.
    #[error("input validation failed ({} issue(s))", .issues.len())]
    Validation {
        /// Every violated constraint, in the order the backend emitted them.
        issues: Vec<Issue>,
        /// Backend-specific diagnostics; the issue list is the stable field.
        #[source]
        cause: Option<anyhow::Error>,
    },

    /// Handler code explicitly rejected the request.
    #[error("{message}")]
    Domain {
        /// Human-readable rejection message.
        message: String,
        /// Status from the [`ErrorCode`] table.
        code: ErrorCode,
        /// Structured payload for the client, if any.
        payload: Option<Value>,
        /// The underlying error, kept reachable for diagnostics.
        #[source]
        cause: Option<anyhow::Error>,
    },

    /// An error nobody anticipated; never absorbed silently.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ResolverError {
    /// Creates a validation failure from an issue list.
    #[must_use]
    pub fn validation(issues: Vec<Issue>) -> Self {
        Self::Validation {
            issues,
            cause: None,
        }
    }

    /// Creates a validation failure keeping the backend error as cause.
    #[must_use]
    pub fn validation_with_cause(issues: Vec<Issue>, cause: impl Into<anyhow::Error>) -> Self {
        Self::Validation {
            issues,
            cause: Some(cause.into()),
        }
    }

    /// Wraps an arbitrary error as unexpected.
    #[must_use]
    pub fn unexpected(cause: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected(cause.into())
    }

    /// Returns the explicit kind discriminant.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Domain { .. } => ErrorKind::Domain,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Returns the integer status for this error.
    ///
    /// Validation failures are always `400`; unexpected errors report `500`.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Validation { .. } => ErrorCode::BadRequest.as_u16(),
            Self::Domain { code, .. } => code.as_u16(),
            Self::Unexpected(_) => ErrorCode::InternalServerError.as_u16(),
        }
    }

    /// Returns the status as an [`http::StatusCode`].
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        http::StatusCode::from_u16(self.status()).expect("status comes from the fixed table")
    }

    /// Returns the issue list for validation failures.
    #[must_use]
    pub fn issues(&self) -> Option<&[Issue]> {
        match self {
            Self::Validation { issues, .. } => Some(issues),
            _ => None,
        }
    }

    /// Returns the structured payload for domain failures.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Domain { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

impl From<DomainError> for ResolverError {
    fn from(err: DomainError) -> Self {
        let (message, code, payload, cause) = err.into_parts();
        Self::Domain {
            message,
            code,
            payload,
            cause,
        }
    }
}

impl From<HandlerError> for ResolverError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Domain(domain) => domain.into(),
            HandlerError::Unexpected(cause) => Self::Unexpected(cause),
        }
    }
}
