//! Resolver configuration.
//!
//! One enumerated configuration struct fixes the failure semantics of a
//! resolver at definition time. There is exactly one pipeline; behavior
//! differences are strategy choices here, never parallel implementations.

use praxis_core::{IssueShape, ResolverError};
use serde_json::Value;
use std::sync::Arc;

/// Post-processes a caught failure into a caller-chosen payload.
///
/// The formatter output is attached to the normalized failure's `payload`
/// field. Failures the handler returned as already-discriminated outcomes
/// never pass through here.
pub trait ErrorFormatter: Send + Sync {
    /// Formats the error into a payload value.
    fn format(&self, error: &ResolverError) -> Value;
}

impl<F> ErrorFormatter for F
where
    F: Fn(&ResolverError) -> Value + Send + Sync,
{
    fn format(&self, error: &ResolverError) -> Value {
        (self)(error)
    }
}

/// Failure semantics of a resolver, fixed at definition time.
///
/// The axes compose:
///
/// - `throw_on_fail` raises validation and domain failures as
///   [`ResolverError`] instead of returning a discriminated outcome.
/// - `safe_mode` captures every failure, including unexpected ones, into the
///   discriminated shape; it takes precedence over `throw_on_fail`.
/// - `issue_shape` picks how validation issues are presented.
/// - `error_formatter` post-processes caught failures into a payload.
#[derive(Clone, Default)]
pub struct ResolverConfig {
    /// Raise failures instead of returning them.
    pub throw_on_fail: bool,
    /// Capture every error into the discriminated shape; nothing propagates.
    pub safe_mode: bool,
    /// Presentation of validation issues.
    pub issue_shape: IssueShape,
    /// Optional failure payload formatter.
    pub error_formatter: Option<Arc<dyn ErrorFormatter>>,
}

impl std::fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("throw_on_fail", &self.throw_on_fail)
            .field("safe_mode", &self.safe_mode)
            .field("issue_shape", &self.issue_shape)
            .field("error_formatter", &self.error_formatter.is_some())
            .finish()
    }
}
