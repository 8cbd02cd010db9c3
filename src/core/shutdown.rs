//! # Cross-platform OS signal handling.
//!
//! Provides [`SignalListener`] a scoped subscription to process termination
//! signals, split into an **arm** step ([`SignalListener::install`]) and a
//! **wait** step ([`SignalListener::recv`]).
//!
//! The split matters: the supervisor arms the listener before it spawns the
//! serve task, so a signal delivered in between is buffered by the armed
//! streams instead of being lost.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]
//!
//! No other signals are handled.

use std::io;

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Scoped subscription to OS termination signals.
///
/// Each [`install`](SignalListener::install) creates independent signal
/// streams; dropping the listener releases them. Nothing process-global
/// outlives the value, so repeated runs do not leak handlers into each other.
#[cfg(unix)]
pub struct SignalListener {
    sigint: Signal,
    sigterm: Signal,
}

#[cfg(unix)]
impl SignalListener {
    /// Arms listeners for `SIGINT` and `SIGTERM`.
    ///
    /// Returns `Err` if signal registration with the OS fails.
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Waits until either termination signal is received.
    ///
    /// Signals delivered after [`install`](SignalListener::install) but
    /// before this call are already buffered and complete the wait
    /// immediately.
    pub async fn recv(mut self) {
        tokio::select! {
            _ = self.sigint.recv() => {}
            _ = self.sigterm.recv() => {}
        }
    }
}

/// Scoped subscription to OS termination signals.
///
/// On non-Unix platforms only Ctrl-C is observed.
#[cfg(not(unix))]
pub struct SignalListener {
    _private: (),
}

#[cfg(not(unix))]
impl SignalListener {
    /// Arms the Ctrl-C listener.
    pub fn install() -> io::Result<Self> {
        Ok(Self { _private: () })
    }

    /// Waits until Ctrl-C is received.
    pub async fn recv(self) {
        let _ = tokio::signal::ctrl_c().await;
    }
}
