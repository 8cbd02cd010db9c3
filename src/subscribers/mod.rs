//! # Event subscribers: the observability sink.
//!
//! This module provides the [`Subscribe`] trait and the fan-out machinery
//! that delivers supervisor lifecycle events to user-defined sinks (logging,
//! metrics, alerting).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Supervisor ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit(&Event)
//!                                                     ┌─────────┬─────────┐
//!                                                     ▼         ▼         ▼
//!                                                 [queue S1] [queue S2] [queue SN]
//!                                                     ▼         ▼         ▼
//!                                               worker S1  worker S2  worker SN
//!                                                     ▼         ▼         ▼
//!                                             sub.on_event(&Event) (per subscriber)
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use async_trait::async_trait;
//! use servekit::{Event, EventKind, Subscribe};
//!
//! struct Metrics;
//!
//! #[async_trait]
//! impl Subscribe for Metrics {
//!     async fn on_event(&self, event: &Event) {
//!         if matches!(event.kind, EventKind::ServeFailed) {
//!             // increment failure counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "metrics" }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
