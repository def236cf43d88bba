//! # Praxis
//!
//! **Validated resolver pipelines for server-side request handlers.**
//!
//! Praxis wraps an arbitrary business-logic function with input-schema
//! validation, execution-context derivation, and normalization of the result
//! into one discriminated success/failure shape:
//!
//! - untrusted input is validated before anything privileged runs;
//! - validation failures carry every violated constraint with its path;
//! - handler rejections carry a status from a fixed code table;
//! - unexpected errors are never silently absorbed.
//!
//! ## Quick Start
//!
//! ```rust
//! use praxis::prelude::*;
//!
//! #[derive(serde::Deserialize)]
//! struct AddInput {
//!     num1: f64,
//!     num2: f64,
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let add = Resolver::<AddInput, (), f64>::builder(
//!         |input: AddInput, _ctx: (), _ev: Events| async move {
//!             Ok::<_, HandlerError>(input.num1 + input.num2)
//!         },
//!     )
//!     .schema(
//!         combinator::object()
//!             .field("num1", combinator::number())
//!             .field("num2", combinator::number()),
//!     )
//!     .build();
//!
//!     let outcome = add
//!         .invoke(serde_json::json!({ "num1": 100, "num2": 220 }))
//!         .await
//!         .expect("nothing unexpected");
//!     assert_eq!(outcome.into_data(), Some(320.0));
//! }
//! ```
//!
//! ## Architecture
//!
//! Each invocation walks a fixed sequence, every state at most once:
//!
//! ```text
//! raw input → Validate → BuildContext → Invoke handler → Normalize
//!                 ↓             ↓              ↓
//!              Failed ←──── Failed ←─────── Failed
//! ```

#![doc(html_root_url = "https://docs.rs/praxis/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use praxis_core as core;

// Re-export schema engines
pub use praxis_schema as schema;

// Re-export the pipeline
pub use praxis_resolver as resolver;

// Re-export the matcher
pub use praxis_matcher as matcher;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use praxis_core::{
        AmbientArgs, ContextFactory, DomainError, ErrorCode, ErrorKind, Events, Handler,
        HandlerError, Issue, IssueShape, NormalizedFailure, Outcome, PathSegment, Reply,
        ResolverError, ShapedIssues,
    };
    pub use praxis_matcher::{MatchError, Matcher};
    pub use praxis_resolver::{ErrorFormatter, Resolver, ResolverConfig};
    pub use praxis_schema::{combinator, validate, Constraint, Schema};
}
