//! The fixed status-code table handed to handlers.
//!
//! [`ErrorCode`] maps symbolic names to canonical HTTP-style integers. The
//! table is a process-wide constant: the pipeline never invents codes outside
//! it, and handlers pick from it when rejecting a request or overriding the
//! success status.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Symbolic status codes recognized by the resolver pipeline.
///
/// Handlers receive this table through the [`Events`](crate::Events) argument
/// and use it to pick a status for explicit failures (or for non-200
/// successes such as [`ErrorCode::Created`]).
///
/// # Example
///
/// ```
/// use praxis_core::ErrorCode;
///
/// assert_eq!(ErrorCode::Forbidden.as_u16(), 403);
/// assert_eq!(ErrorCode::from_u16(409), Some(ErrorCode::Conflict));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request input was rejected (validation failures use this code).
    BadRequest,
    /// Missing or invalid credentials.
    Unauthorized,
    /// The caller is not allowed to perform the operation.
    Forbidden,
    /// The addressed resource does not exist.
    NotFound,
    /// The request conflicts with current state.
    Conflict,
    /// The operation created a resource (success-status override).
    Created,
    /// An internal failure the caller cannot fix.
    InternalServerError,
    /// The operation did not complete in time.
    Timeout,
}

impl ErrorCode {
    /// Every code in the table, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::Conflict,
        Self::Created,
        Self::InternalServerError,
        Self::Timeout,
    ];

    /// Returns the canonical integer for this code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Created => 201,
            Self::InternalServerError => 500,
            Self::Timeout => 504,
        }
    }

    /// Returns the code as an [`http::StatusCode`].
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        StatusCode::from_u16(self.as_u16()).expect("table holds only valid status codes")
    }

    /// Looks up a code by its integer value.
    #[must_use]
    pub fn from_u16(status: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_u16() == status)
    }

    /// Returns the symbolic name, e.g. `"BAD_REQUEST"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Created => "CREATED",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::Timeout => "TIMEOUT",
        }
    }

    /// Returns the canonical human-readable reason phrase.
    #[must_use]
    pub fn reason(self) -> &'static str {
        self.status_code().canonical_reason().unwrap_or("error")
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
