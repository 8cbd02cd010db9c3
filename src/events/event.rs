//! # Lifecycle events emitted by the supervisor.
//!
//! The [`EventKind`] enum classifies the transitions of one supervisor run,
//! and the [`Event`] struct carries metadata such as timestamps, the servable
//! name, the bound address, and failure reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use servekit::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ServeFailed)
//!     .with_server("grpc")
//!     .with_reason("accept: connection reset");
//!
//! assert_eq!(ev.kind, EventKind::ServeFailed);
//! assert_eq!(ev.server.as_deref(), Some("grpc"));
//! assert_eq!(ev.reason.as_deref(), Some("accept: connection reset"));
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of supervisor lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `server`: subscriber name
    /// - `reason`: panic info/message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `server`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberOverflow,

    /// Listener bound and the serve task is starting.
    ///
    /// Sets:
    /// - `server`: servable name
    /// - `addr`: bound local address
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ServerStarted,

    /// A shutdown trigger was observed (OS signal, or the serve task
    /// concluded on its own).
    ///
    /// Sets:
    /// - `server`: servable name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownRequested,

    /// The run ended with an error after a successful start.
    ///
    /// Sets:
    /// - `server`: servable name
    /// - `reason`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ServeFailed,

    /// The run completed cleanly: stop requested, drain finished, task joined.
    ///
    /// Sets:
    /// - `server`: servable name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ServiceStopped,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the servable (or, for subscriber events, the subscriber)
    /// this event concerns.
    pub server: Option<Arc<str>>,
    /// Bound local address (set for `ServerStarted`).
    pub addr: Option<SocketAddr>,
    /// Human-readable reason (errors, shutdown cause, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            server: None,
            addr: None,
            reason: None,
        }
    }

    /// Attaches the servable name.
    #[inline]
    pub fn with_server(mut self, server: impl Into<Arc<str>>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Attaches the bound local address.
    #[inline]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_server(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_server(subscriber)
            .with_reason(info)
    }

    /// True for events about the subscriber plumbing itself.
    ///
    /// These are never re-reported when they overflow a queue or make a
    /// subscriber panic, which breaks the feedback loop.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}
