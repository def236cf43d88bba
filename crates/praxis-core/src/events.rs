//! Helpers handed to every handler invocation.
//!
//! [`Events`] bundles the convenience constructors a handler may use to
//! produce an explicit success or failure, plus the fixed [`ErrorCode`]
//! table. Handlers are free to ignore it and return a plain value or raise a
//! [`DomainError`](crate::DomainError) instead.

use crate::{ErrorCode, NormalizedFailure, Outcome};
use serde_json::Value;

/// Convenience constructors available inside a handler.
///
/// # Example
///
/// ```
/// use praxis_core::{ErrorCode, Events, Outcome};
///
/// let ev = Events::default();
/// let ok: Outcome<&str> = ev.success("hello");
/// assert_eq!(ok.status(), 200);
///
/// let no: Outcome<&str> = ev.fail(serde_json::json!({ "message": "no token" }), ErrorCode::Unauthorized);
/// assert_eq!(no.status(), 401);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Events;

impl Events {
    /// The status-code table, as handlers see it.
    pub const STATUS: [ErrorCode; 8] = ErrorCode::ALL;

    /// Wraps data as a success with status `200`.
    #[must_use]
    pub fn success<T>(self, data: T) -> Outcome<T> {
        Outcome::success(data)
    }

    /// Wraps data as a success with an explicit status, e.g.
    /// [`ErrorCode::Created`].
    #[must_use]
    pub fn success_with<T>(self, data: T, code: ErrorCode) -> Outcome<T> {
        Outcome::success_with(data, code)
    }

    /// Builds an explicit failure outcome carrying a structured payload.
    ///
    /// The message defaults to the code's canonical reason phrase. A failure
    /// built here is already discriminated: the pipeline passes it through
    /// unchanged, bypassing issue shaping and the error formatter.
    #[must_use]
    pub fn fail<T>(self, payload: Value, code: ErrorCode) -> Outcome<T> {
        Outcome::Failure(NormalizedFailure::domain(
            code.reason(),
            code,
            Some(payload),
        ))
    }
}
