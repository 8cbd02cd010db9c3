//! Runtime core: orchestration and lifecycle.
//!
//! This module contains the supervisor runtime. The main public API is
//! [`Supervisor`], which binds the listener, runs the servable, and drives
//! graceful shutdown.
//!
//! Modules:
//! - [`supervisor`]: startup/shutdown orchestration and the trigger race;
//! - [`builder`]: supervisor construction with optional subscribers;
//! - [`shutdown`]: scoped, cross-platform OS signal subscription;
//! - [`config`]: runtime settings (grace period, bus capacity).

mod builder;
mod config;
mod shutdown;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use config::SupervisorConfig;
pub use shutdown::SignalListener;
pub use supervisor::Supervisor;
