//! Resolution of generic type parameters from the point of view of a concrete type.
//!
//! Given `class SomethingMore extends Something<Integer>`, a method declared on
//! `Something<T>` returning `Container<T>` really returns `Container<Integer>` when
//! inspected through `SomethingMore`. [`Resolver`] computes that instantiated type from
//! the hierarchy graph in a [`reify_types::TypeEnv`].

#![forbid(unsafe_code)]

pub mod config;
mod error;
mod members;
mod resolver;

pub use config::{ConfigError, LoggingConfig, ResolverConfig, SupertypeSearch};
pub use error::TypeResolutionError;
pub use members::{ResolvedField, ResolvedMethod};
pub use resolver::{resolve, Resolver};

/// Tracing target for resolver events.
pub const TRACE_TARGET: &str = "reify.resolve";
