//! # Servable abstractions.
//!
//! This module provides the types the supervisor runs:
//! - [`Servable`] - trait for implementing a pluggable network server
//! - [`ServeFn`] - function-backed servable implementation
//! - [`ServableRef`] - shared reference to a servable (`Arc<dyn Servable>`)

mod servable;
mod serve_fn;

pub use servable::{Servable, ServableRef};
pub use serve_fn::ServeFn;
