//! The resolver pipeline.
//!
//! A [`Resolver`] bundles a schema, an optional context factory, a handler,
//! and a [`ResolverConfig`] into one immutable definition built at startup
//! and shared across invocations. Each invocation walks a fixed sequence:
//! validate, build context, invoke the handler, normalize the result. No
//! state is revisited and nothing is retried.

use crate::{ErrorFormatter, ResolverConfig};
use praxis_core::{
    AmbientArgs, ContextFactory, Events, Handler, HandlerError, IssueShape, NormalizedFailure,
    Outcome, Reply, ResolverError,
};
use praxis_schema::Schema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// An immutable resolver definition.
///
/// # Type Parameters
///
/// - `I`: validated input type, decoded from the schema's output
/// - `C`: context type; `C::default()` is supplied when no factory is set
/// - `O`: success data type
///
/// # Example
///
/// ```
/// use praxis_core::{Events, HandlerError};
/// use praxis_resolver::Resolver;
/// use praxis_schema::combinator::{number, object};
///
/// #[derive(serde::Deserialize)]
/// struct AddInput {
///     num1: f64,
///     num2: f64,
/// }
///
/// let add = Resolver::<AddInput, (), f64>::builder(
///     |input: AddInput, _ctx: (), _ev: Events| async move {
///         Ok::<_, HandlerError>(input.num1 + input.num2)
///     },
/// )
/// .schema(object().field("num1", number()).field("num2", number()))
/// .build();
///
/// # tokio_test::block_on(async {
/// let outcome = add
///     .invoke(serde_json::json!({ "num1": 100, "num2": 220 }))
///     .await
///     .expect("nothing unexpected");
/// assert_eq!(outcome.into_data(), Some(320.0));
/// # });
/// ```
pub struct Resolver<I, C, O> {
    schema: Option<Arc<dyn Schema>>,
    context: Option<Arc<dyn ContextFactory<C>>>,
    handler: Arc<dyn Handler<I, C, O>>,
    config: ResolverConfig,
}

impl<I, C, O> Clone for Resolver<I, C, O> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            context: self.context.clone(),
            handler: Arc::clone(&self.handler),
            config: self.config.clone(),
        }
    }
}

impl<I, C, O> Resolver<I, C, O>
where
    I: DeserializeOwned + Send + 'static,
    C: Default + Send + 'static,
    O: Send + 'static,
{
    /// Starts a definition around the given handler.
    #[must_use]
    pub fn builder(handler: impl Handler<I, C, O> + 'static) -> ResolverBuilder<I, C, O> {
        ResolverBuilder {
            schema: None,
            context: None,
            handler: Arc::new(handler),
            config: ResolverConfig::default(),
        }
    }

    /// Returns the definition's configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Invokes the pipeline without ambient args.
    pub async fn invoke(&self, raw: Value) -> Result<Outcome<O>, ResolverError> {
        self.invoke_with(raw, AmbientArgs::new()).await
    }

    /// Invokes the pipeline: validate, build context, handle, normalize.
    ///
    /// With the default configuration, validation and domain failures come
    /// back as `Ok(Outcome::Failure(..))` and only unexpected errors are
    /// `Err`; `throw_on_fail` raises every failure, and `safe_mode` captures
    /// every error into the discriminated shape.
    pub async fn invoke_with(
        &self,
        raw: Value,
        args: AmbientArgs,
    ) -> Result<Outcome<O>, ResolverError> {
        // Validating
        let validated = match &self.schema {
            Some(schema) => match schema.parse(&raw) {
                Ok(value) => value,
                Err(issues) => {
                    tracing::debug!(issues = issues.len(), "input validation failed");
                    return self.failed(ResolverError::validation(issues));
                }
            },
            // Documented escape hatch: no schema, no checking.
            None => raw,
        };
        let input: I = match serde_json::from_value(validated) {
            Ok(input) => input,
            Err(err) => {
                // The schema accepted a value the declared input type cannot
                // represent; that disagreement is a programmer error.
                return self.failed(ResolverError::unexpected(
                    anyhow::Error::new(err)
                        .context("validated input did not match the handler input type"),
                ));
            }
        };

        // BuildingContext; runs only for valid input, at most once.
        let ctx = match &self.context {
            Some(factory) => match factory.build(args).await {
                Ok(ctx) => ctx,
                Err(err) => {
                    tracing::debug!("context factory failed");
                    return self.failed(err.into());
                }
            },
            None => C::default(),
        };

        // Invoking; the pipeline always awaits completion.
        match self.handler.call(input, ctx, Events::default()).await {
            // Normalizing: already-discriminated replies pass through
            // unchanged, bypassing shaping and the formatter.
            Ok(Reply::Wrapped(outcome)) => {
                if let Outcome::Failure(failure) = &outcome {
                    tracing::debug!(status = failure.status, "handler returned failure");
                }
                Ok(outcome)
            }
            Ok(Reply::Plain(data)) => Ok(Outcome::success(data)),
            Err(err) => {
                tracing::debug!("handler raised");
                self.failed(err.into())
            }
        }
    }

    /// Applies the configured failure semantics to a caught error.
    fn failed(&self, error: ResolverError) -> Result<Outcome<O>, ResolverError> {
        if self.config.safe_mode {
            if let ResolverError::Unexpected(cause) = &error {
                tracing::warn!(error = %cause, "safe mode captured unexpected error");
            }
            return Ok(Outcome::Failure(self.normalize(error)));
        }
        if matches!(error, ResolverError::Unexpected(_)) || self.config.throw_on_fail {
            return Err(error);
        }
        Ok(Outcome::Failure(self.normalize(error)))
    }

    fn normalize(&self, error: ResolverError) -> NormalizedFailure {
        let payload = self
            .config
            .error_formatter
            .as_deref()
            .map(|formatter| formatter.format(&error));
        let mut failure = NormalizedFailure::from_error(error, self.config.issue_shape);
        if payload.is_some() {
            failure.payload = payload;
        }
        failure
    }
}

/// Builder for [`Resolver`] definitions.
pub struct ResolverBuilder<I, C, O> {
    schema: Option<Arc<dyn Schema>>,
    context: Option<Arc<dyn ContextFactory<C>>>,
    handler: Arc<dyn Handler<I, C, O>>,
    config: ResolverConfig,
}

impl<I, C, O> ResolverBuilder<I, C, O>
where
    I: DeserializeOwned + Send + 'static,
    C: Default + Send + 'static,
    O: Send + 'static,
{
    /// Sets the input schema. Without one, input passes through unchecked.
    #[must_use]
    pub fn schema(mut self, schema: impl Schema + 'static) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    /// Sets the context factory. Without one, `C::default()` is supplied.
    #[must_use]
    pub fn context(mut self, factory: impl ContextFactory<C> + 'static) -> Self {
        self.context = Some(Arc::new(factory));
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Raises failures instead of returning discriminated outcomes.
    #[must_use]
    pub fn throw_on_fail(mut self, throw: bool) -> Self {
        self.config.throw_on_fail = throw;
        self
    }

    /// Captures every error, unexpected ones included, into the
    /// discriminated shape.
    #[must_use]
    pub fn safe_mode(mut self, safe: bool) -> Self {
        self.config.safe_mode = safe;
        self
    }

    /// Picks how validation issues are presented.
    #[must_use]
    pub fn issue_shape(mut self, shape: IssueShape) -> Self {
        self.config.issue_shape = shape;
        self
    }

    /// Sets the failure payload formatter.
    #[must_use]
    pub fn error_formatter(mut self, formatter: impl ErrorFormatter + 'static) -> Self {
        self.config.error_formatter = Some(Arc::new(formatter));
        self
    }

    /// Finishes the immutable definition.
    #[must_use]
    pub fn build(self) -> Resolver<I, C, O> {
        Resolver {
            schema: self.schema,
            context: self.context,
            handler: self.handler,
            config: self.config,
        }
    }
}
