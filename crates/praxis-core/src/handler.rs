//! Handler trait for resolver business logic.
//!
//! A [`Handler`] receives the validated input, the derived context, and the
//! [`Events`] helpers, and produces either a value or an error. Async
//! closures with that signature implement the trait directly; the pipeline
//! never calls business logic any other way.

use crate::{Events, HandlerError, Reply};
use async_trait::async_trait;
use std::future::Future;

/// Business logic invoked by the resolver pipeline.
///
/// # Type Parameters
///
/// - `I`: the validated input type
/// - `C`: the derived context type
/// - `O`: the success data type
///
/// A handler may return:
///
/// - a plain `O`, wrapped as a `200` success during normalization;
/// - an [`Outcome`](crate::Outcome) built via [`Events`], passed through
///   unchanged (wrapping is idempotent);
/// - `Err` with a [`DomainError`](crate::DomainError) for a deliberate
///   rejection, or any other error, which the pipeline will not absorb.
///
/// # Example
///
/// ```
/// use praxis_core::{Events, Handler, HandlerError};
///
/// #[derive(serde::Deserialize)]
/// struct AddInput {
///     num1: i64,
///     num2: i64,
/// }
///
/// let add = |input: AddInput, _ctx: (), _ev: Events| async move {
///     Ok::<_, HandlerError>(input.num1 + input.num2)
/// };
///
/// # tokio_test::block_on(async {
/// let reply = add
///     .call(AddInput { num1: 100, num2: 220 }, (), Events::default())
///     .await
///     .expect("handler succeeds");
/// assert!(matches!(reply, praxis_core::Reply::Plain(320)));
/// # });
/// ```
#[async_trait]
pub trait Handler<I, C, O>: Send + Sync {
    /// Runs the business logic for one invocation.
    async fn call(&self, input: I, ctx: C, events: Events) -> Result<Reply<O>, HandlerError>;
}

#[async_trait]
impl<F, Fut, R, I, C, O> Handler<I, C, O> for F
where
    F: Fn(I, C, Events) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, HandlerError>> + Send + 'static,
    R: Into<Reply<O>> + Send + 'static,
    I: Send + 'static,
    C: Send + 'static,
    O: Send + 'static,
{
    async fn call(&self, input: I, ctx: C, events: Events) -> Result<Reply<O>, HandlerError> {
        Ok((self)(input, ctx, events).await?.into())
    }
}
