//! # Praxis Resolver
//!
//! The resolver pipeline: the orchestrator that validates untrusted input,
//! derives an execution context, invokes business logic, and normalizes the
//! result into one discriminated success/failure shape.
//!
//! A [`Resolver`] is defined once at startup and invoked for every request;
//! its failure semantics (throw-vs-return, safe mode, issue shaping, error
//! formatting) are fixed by [`ResolverConfig`] at definition time.

#![doc(html_root_url = "https://docs.rs/praxis-resolver/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod resolver;

pub use config::{ErrorFormatter, ResolverConfig};
pub use resolver::{Resolver, ResolverBuilder};
