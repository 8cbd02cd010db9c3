//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] hands each [`Event`](crate::events::Event) to every
//! subscriber through a bounded per-subscriber queue, each drained by its own
//! worker task. Delivery problems are themselves reported as events: a full
//! queue publishes [`EventKind::SubscriberOverflow`] and a panicking handler
//! publishes [`EventKind::SubscriberPanicked`] back onto the bus, so the
//! remaining subscribers can observe them.
//!
//! ## Rules
//! - `emit(&Event)` uses `try_send` and returns immediately.
//! - Per-subscriber FIFO; no ordering across subscribers.
//! - A slow or panicking subscriber affects only its own queue.
//! - Subscriber events ([`Event::is_subscriber_event`]) are never re-reported
//!   when they overflow or panic, which breaks the feedback loop.
//!
//! ## Panic handling
//! Worker tasks wrap each `on_event` call in `catch_unwind`: the panic
//! message is extracted, published as `SubscriberPanicked`, and the worker
//! moves on to the next event.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a subscriber panics while holding a lock.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event};

use super::Subscribe;

/// Per-subscriber channel with metadata
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Event>,
}

/// Composite fan-out with per-subscriber bounded queues and worker tasks.
///
/// Holds a handle to the [`Bus`] so delivery failures (overflow, panics)
/// surface as events instead of disappearing.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    ///
    /// Events are cheap to clone (small struct, `Arc<str>` payloads), so each
    /// queue carries its own copy.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, rx) = mpsc::channel::<Event>(cap);

            workers.push(tokio::spawn(Self::worker(
                Arc::clone(&sub),
                rx,
                bus.clone(),
            )));
            channels.push(SubscriberChannel { name, sender: tx });
        }

        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Drains one subscriber's queue, isolating panics.
    async fn worker(sub: Arc<dyn Subscribe>, mut rx: mpsc::Receiver<Event>, bus: Bus) {
        while let Some(ev) = rx.recv().await {
            let fut = sub.on_event(&ev);
            if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                // A panic while handling a subscriber event is swallowed;
                // re-publishing it would feed the panicking handler again.
                if !ev.is_subscriber_event() {
                    bus.publish(Event::subscriber_panicked(
                        sub.name(),
                        panic_info(&*panic_err),
                    ));
                }
            }
        }
    }

    /// Fan-out one event to all subscribers (non-blocking).
    ///
    /// If a subscriber's queue is **full** or **closed**, the event is
    /// dropped for it and a [`SubscriberOverflow`](crate::EventKind::SubscriberOverflow)
    /// event is published with the subscriber's name, unless the dropped
    /// event was itself a subscriber event.
    pub fn emit(&self, event: &Event) {
        for channel in &self.channels {
            let dropped = match channel.sender.try_send(event.clone()) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !event.is_subscriber_event() {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, dropped));
            }
        }
    }

    /// Flush-and-close: drops all queues and awaits worker completion.
    ///
    /// Already-queued events are still delivered before the workers exit.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }
}

/// Extracts a printable message from a caught panic payload.
fn panic_info(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
