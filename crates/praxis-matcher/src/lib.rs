//! # Praxis Matcher
//!
//! A named-key dispatcher over resolver invocations. A [`Matcher`] holds a
//! map from string keys to zero-argument thunks, each wrapping a resolver
//! invocation already bound to its arguments. Dispatch runs exactly one
//! thunk; an undeclared key is an error, and conversion to an HTTP-shaped
//! response happens only when explicitly requested.

#![doc(html_root_url = "https://docs.rs/praxis-matcher/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use bytes::Bytes;
use http::{header, Response, StatusCode};
use indexmap::IndexMap;
use praxis_core::{IssueShape, NormalizedFailure, Outcome, ResolverError};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by a matcher thunk.
pub type MatchFuture = Pin<Box<dyn Future<Output = Result<Outcome<Value>, ResolverError>> + Send>>;

type Thunk = Box<dyn Fn() -> MatchFuture + Send + Sync>;

/// Errors raised by matcher dispatch.
#[derive(Error, Debug)]
pub enum MatchError {
    /// The supplied key is not one of the declared keys.
    #[error("unknown matcher key: {key}")]
    UnknownKey {
        /// The key that failed to match.
        key: String,
    },

    /// The matched resolver raised.
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

/// A named-key dispatcher over bound resolver invocations.
///
/// # Example
///
/// ```
/// use praxis_core::Outcome;
/// use praxis_matcher::Matcher;
///
/// let matcher = Matcher::builder()
///     .entry("sayHello", || async { Ok(Outcome::success("hello world".into())) })
///     .entry("default", || async { Ok(Outcome::success(serde_json::json!({}))) })
///     .build();
///
/// # tokio_test::block_on(async {
/// let outcome = matcher.match_key("sayHello").await.expect("declared key");
/// assert_eq!(outcome.into_data(), Some("hello world".into()));
/// assert!(matcher.match_key("nope").await.is_err());
/// # });
/// ```
pub struct Matcher {
    entries: IndexMap<String, Thunk>,
    throw_validation_errors: bool,
}

impl Matcher {
    /// Creates a matcher builder.
    #[must_use]
    pub fn builder() -> MatcherBuilder {
        MatcherBuilder {
            entries: IndexMap::new(),
            throw_validation_errors: false,
        }
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Checks that a caller-supplied string is one of the declared keys.
    ///
    /// Useful before dispatch, e.g. to validate an intent field parsed out
    /// of a form submission.
    pub fn validate_key<'k>(&self, key: &'k str) -> Result<&'k str, MatchError> {
        if self.entries.contains_key(key) {
            Ok(key)
        } else {
            Err(MatchError::UnknownKey {
                key: key.to_string(),
            })
        }
    }

    /// Runs exactly the thunk declared under `key`.
    ///
    /// By default a validation failure the resolver raised is converted back
    /// into a discriminated failure rather than propagated; configure
    /// [`MatcherBuilder::throw_validation_errors`] to propagate it instead.
    pub async fn match_key(&self, key: &str) -> Result<Outcome<Value>, MatchError> {
        let thunk = self.entries.get(key).ok_or_else(|| MatchError::UnknownKey {
            key: key.to_string(),
        })?;
        tracing::debug!(key, "dispatching matcher thunk");
        match thunk().await {
            Ok(outcome) => Ok(outcome),
            Err(error @ ResolverError::Validation { .. }) if !self.throw_validation_errors => {
                Ok(Outcome::Failure(NormalizedFailure::from_error(
                    error,
                    IssueShape::Raw,
                )))
            }
            Err(error) => Err(MatchError::Resolver(error)),
        }
    }

    /// Dispatches `key` and converts the outcome into an HTTP-shaped
    /// response.
    ///
    /// The body is the serialized discriminated shape; the response status
    /// mirrors the outcome status. Resolver errors still propagate to the
    /// caller's error boundary.
    pub async fn match_response(&self, key: &str) -> Result<Response<Bytes>, MatchError> {
        let outcome = self.match_key(key).await?;
        Ok(to_response(&outcome))
    }
}

/// Builds the HTTP-shaped response for an outcome.
///
/// # Panics
///
/// Panics if JSON serialization fails, which cannot happen for a
/// [`Value`]-typed outcome.
fn to_response(outcome: &Outcome<Value>) -> Response<Bytes> {
    let status =
        StatusCode::from_u16(outcome.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::to_vec(outcome).expect("JSON serialization failed");
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Bytes::from(body))
        .expect("failed to build response")
}

/// Builder for [`Matcher`].
pub struct MatcherBuilder {
    entries: IndexMap<String, Thunk>,
    throw_validation_errors: bool,
}

impl MatcherBuilder {
    /// Declares a key bound to a zero-argument thunk.
    ///
    /// Redeclaring a key replaces the previous thunk.
    #[must_use]
    pub fn entry<F, Fut>(mut self, key: impl Into<String>, thunk: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Outcome<Value>, ResolverError>> + Send + 'static,
    {
        self.entries.insert(
            key.into(),
            Box::new(move || Box::pin(thunk()) as MatchFuture),
        );
        self
    }

    /// Propagates validation failures raised by resolvers instead of
    /// converting them into discriminated failures.
    #[must_use]
    pub fn throw_validation_errors(mut self, throw: bool) -> Self {
        self.throw_validation_errors = throw;
        self
    }

    /// Finishes the matcher.
    #[must_use]
    pub fn build(self) -> Matcher {
        Matcher {
            entries: self.entries,
            throw_validation_errors: self.throw_validation_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praxis_core::{Events, HandlerError, Issue};
    use praxis_resolver::Resolver;
    use praxis_schema::combinator;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn add_resolver() -> Resolver<Vec<f64>, (), f64> {
        Resolver::builder(|values: Vec<f64>, _ctx: (), _ev: Events| async move {
            Ok::<_, HandlerError>(values.iter().sum::<f64>())
        })
        .schema(combinator::array(combinator::number()))
        .build()
    }

    fn matcher() -> Matcher {
        let add = add_resolver();
        let add_more = add.clone();
        Matcher::builder()
            .entry("sayHello", || async {
                Ok(Outcome::success(json!("hello world")))
            })
            .entry("add", move || {
                let add = add.clone();
                async move { add.invoke(json!([20, 30, 50])).await?.into_json().map_err(ResolverError::unexpected) }
            })
            .entry("addMore", move || {
                let add_more = add_more.clone();
                async move {
                    add_more
                        .invoke(json!([20]))
                        .await?
                        .into_json()
                        .map_err(ResolverError::unexpected)
                }
            })
            .entry("default", || async { Ok(Outcome::success(json!({}))) })
            .build()
    }

    #[tokio::test]
    async fn test_match_runs_exactly_one_thunk() {
        static HITS: AtomicUsize = AtomicUsize::new(0);
        let matcher = Matcher::builder()
            .entry("a", || async {
                HITS.fetch_add(1, Ordering::SeqCst);
                Ok(Outcome::success(json!("a")))
            })
            .entry("b", || async {
                HITS.fetch_add(10, Ordering::SeqCst);
                Ok(Outcome::success(json!("b")))
            })
            .build();
        let outcome = matcher.match_key("a").await.expect("declared");
        assert_eq!(outcome.into_data(), Some(json!("a")));
        assert_eq!(HITS.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bound_resolver_dispatch() {
        let matcher = matcher();
        let outcome = matcher.match_key("add").await.expect("declared");
        assert_eq!(outcome.into_data(), Some(json!(100.0)));
        let outcome = matcher.match_key("sayHello").await.expect("declared");
        assert_eq!(outcome.into_data(), Some(json!("hello world")));
    }

    #[tokio::test]
    async fn test_unknown_key_is_an_error() {
        let matcher = matcher();
        let err = matcher.match_key("missing").await.unwrap_err();
        assert!(matches!(err, MatchError::UnknownKey { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_validate_key() {
        let matcher = matcher();
        assert_eq!(matcher.validate_key("add").expect("declared"), "add");
        assert!(matcher.validate_key("nope").is_err());
    }

    #[tokio::test]
    async fn test_thrown_validation_failure_converted_by_default() {
        let throwing = Resolver::<Vec<f64>, (), f64>::builder(
            |values: Vec<f64>, _ctx: (), _ev: Events| async move {
                Ok::<_, HandlerError>(values.iter().sum::<f64>())
            },
        )
        .schema(combinator::array(combinator::number()))
        .throw_on_fail(true)
        .build();
        let throwing = Arc::new(throwing);

        let build = |throw: bool| {
            let throwing = Arc::clone(&throwing);
            Matcher::builder()
                .entry("add", move || {
                    let throwing = Arc::clone(&throwing);
                    async move {
                        throwing
                            .invoke(json!(["x"]))
                            .await?
                            .into_json()
                            .map_err(ResolverError::unexpected)
                    }
                })
                .throw_validation_errors(throw)
                .build()
        };

        let outcome = build(false).match_key("add").await.expect("converted");
        let failure = outcome.error().expect("failure");
        assert_eq!(failure.status, 400);

        let err = build(true).match_key("add").await.unwrap_err();
        assert!(matches!(
            err,
            MatchError::Resolver(ResolverError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_response_mirrors_outcome_status() {
        let matcher = Matcher::builder()
            .entry("made", || async {
                Ok(Outcome::success_with(
                    json!({ "id": 1 }),
                    praxis_core::ErrorCode::Created,
                ))
            })
            .entry("denied", || async {
                Ok(Outcome::Failure(NormalizedFailure::from_error(
                    ResolverError::validation(vec![Issue::at(["name"], "Required")]),
                    IssueShape::Raw,
                )))
            })
            .build();

        let response = matcher.match_response("made").await.expect("declared");
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body: Value = serde_json::from_slice(response.body()).expect("json body");
        assert_eq!(body["success"], json!(true));

        let response = matcher.match_response("denied").await.expect("declared");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(response.body()).expect("json body");
        assert_eq!(body["error"]["status"], json!(400));
    }
}
