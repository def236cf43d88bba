//! Ambient arguments and the context factory seam.
//!
//! A [`ContextFactory`] derives the per-invocation context a handler
//! consumes (an authenticated user, a tenant handle) from whatever ambient
//! data the caller supplied. It runs only after validation has succeeded, so
//! privileged or expensive work never happens for input already known to be
//! invalid.

use crate::HandlerError;
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Per-call ambient data handed to the context factory.
///
/// Carries whatever the factory needs to derive a context: typically the
/// incoming HTTP request, and optionally an already-parsed submission.
/// Cheap to clone; the request is shared behind an `Arc`.
///
/// # Example
///
/// ```
/// use praxis_core::AmbientArgs;
///
/// let args = AmbientArgs::new().with_data(serde_json::json!({ "intent": "save" }));
/// assert!(args.request().is_none());
/// assert!(args.data().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AmbientArgs {
    request: Option<Arc<http::Request<Bytes>>>,
    data: Option<Value>,
}

impl AmbientArgs {
    /// Creates empty ambient args.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the incoming HTTP request.
    #[must_use]
    pub fn with_request(mut self, request: http::Request<Bytes>) -> Self {
        self.request = Some(Arc::new(request));
        self
    }

    /// Attaches an already-parsed submission.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Returns the incoming request, if one was attached.
    #[must_use]
    pub fn request(&self) -> Option<&http::Request<Bytes>> {
        self.request.as_deref()
    }

    /// Returns the parsed submission, if one was attached.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

/// Derives the handler's context from ambient data.
///
/// The factory is invoked at most once per invocation, only after validation
/// succeeded. Failures propagate exactly like handler errors: a
/// [`DomainError`](crate::DomainError) becomes a normalized failure, anything
/// else is an unexpected error the pipeline refuses to absorb.
///
/// Async closures taking [`AmbientArgs`] implement this trait directly:
///
/// ```
/// use praxis_core::{AmbientArgs, ContextFactory, HandlerError};
///
/// #[derive(Debug, PartialEq)]
/// struct Session { token: String }
///
/// let factory = |args: AmbientArgs| async move {
///     let token = args
///         .data()
///         .and_then(|d| d.get("token"))
///         .and_then(|t| t.as_str())
///         .unwrap_or("anonymous")
///         .to_string();
///     Ok::<_, HandlerError>(Session { token })
/// };
///
/// # tokio_test::block_on(async {
/// let session = factory
///     .build(AmbientArgs::new())
///     .await
///     .expect("factory succeeds");
/// assert_eq!(session.token, "anonymous");
/// # });
/// ```
#[async_trait]
pub trait ContextFactory<C>: Send + Sync {
    /// Builds the context for one invocation.
    async fn build(&self, args: AmbientArgs) -> Result<C, HandlerError>;
}

#[async_trait]
impl<C, F, Fut> ContextFactory<C> for F
where
    F: Fn(AmbientArgs) -> Fut + Send + Sync,
    Fut: Future<Output = Result<C, HandlerError>> + Send + 'static,
    C: Send + 'static,
{
    async fn build(&self, args: AmbientArgs) -> Result<C, HandlerError> {
        (self)(args).await
    }
}
