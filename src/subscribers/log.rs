//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints lifecycle events to stdout in a human-readable
//! format. This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [started] server=grpc addr=0.0.0.0:50051
//! [shutdown-requested] server=grpc
//! [serve-failed] server=grpc reason="transport error: accept failed"
//! [stopped] server=grpc
//! [subscriber-overflow] subscriber=metrics reason="full"
//! [subscriber-panicked] subscriber=metrics reason="index out of bounds"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Creates a new stdout log writer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, event: &Event) {
        let server = event.server.as_deref().unwrap_or("?");
        match event.kind {
            EventKind::ServerStarted => match event.addr {
                Some(addr) => println!("[started] server={server} addr={addr}"),
                None => println!("[started] server={server}"),
            },
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested] server={server}");
            }
            EventKind::ServeFailed => {
                let reason = event.reason.as_deref().unwrap_or("unknown");
                println!("[serve-failed] server={server} reason={reason:?}");
            }
            EventKind::ServiceStopped => {
                println!("[stopped] server={server}");
            }
            EventKind::SubscriberOverflow => {
                let reason = event.reason.as_deref().unwrap_or("unknown");
                println!("[subscriber-overflow] subscriber={server} reason={reason:?}");
            }
            EventKind::SubscriberPanicked => {
                let reason = event.reason.as_deref().unwrap_or("unknown");
                println!("[subscriber-panicked] subscriber={server} reason={reason:?}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
