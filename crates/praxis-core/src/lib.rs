//! # Praxis Core
//!
//! Core types for the Praxis resolver pipeline:
//!
//! - [`ErrorCode`] - the fixed symbolic status-code table
//! - [`Issue`] / [`PathSegment`] - one validation violation
//! - [`ResolverError`] / [`DomainError`] / [`HandlerError`] - the error model
//! - [`Outcome`] / [`NormalizedFailure`] / [`Reply`] - the discriminated
//!   result shape
//! - [`shape`] / [`IssueShape`] / [`ShapedIssues`] - issue shaping
//! - [`Events`] - the helpers handed to handlers
//! - [`AmbientArgs`] / [`ContextFactory`] - the context seam
//! - [`Handler`] - the business-logic seam

#![doc(html_root_url = "https://docs.rs/praxis-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codes;
mod context;
mod error;
mod events;
mod handler;
mod issue;
mod outcome;
mod shape;

pub use codes::ErrorCode;
pub use context::{AmbientArgs, ContextFactory};
pub use error::{DomainError, ErrorKind, HandlerError, ResolverError};
pub use events::Events;
pub use handler::Handler;
pub use issue::{Issue, PathSegment};
pub use outcome::{NormalizedFailure, Outcome, Reply};
pub use shape::{shape, FlattenedIssues, IssueNode, IssueShape, ShapedIssues};
