//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted by the supervisor.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor` (lifecycle transitions) and the
//!   [`SubscriberSet`](crate::SubscriberSet) workers (overflow/panic reports).
//! - **Consumer**: the supervisor's internal delivery loop, which fans events
//!   out to the subscriber queues.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
