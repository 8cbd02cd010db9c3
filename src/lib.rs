//! # servekit
//!
//! **Servekit** is a small lifecycle wrapper for network servers.
//!
//! It owns the boring-but-easy-to-get-wrong part of running a server process:
//! binding the listener, launching the blocking serve loop on a background
//! task, racing OS termination signals against the loop's own failure, and
//! driving an ordered graceful shutdown. The actual server (request handling,
//! routing, encoding) is an injected collaborator implementing [`Servable`].
//!
//! ## Architecture
//! ```text
//!   Servable (user server)          Supervisor::run()
//!        │                               │
//!        │  attach(servable, port)       ├─► arm OS signal listeners (SIGINT/SIGTERM)
//!        └──────────────────────────────►├─► bind TcpListener on 0.0.0.0:<port>
//!                                        │       └─ publish ServerStarted{addr}
//!                                        ├─► spawn servable.serve(listener)
//!                                        │
//!                                        ├─► select! ──┬─ OS signal
//!                                        │             └─ serve task concluded
//!                                        │       └─ publish ShutdownRequested
//!                                        ├─► servable.graceful_stop()   (exactly once)
//!                                        ├─► join serve task, collect its error
//!                                        │       └─ publish ServiceStopped | ServeFailed
//!                                        └─► Result<(), RunError>
//!
//!   Events flow through a broadcast Bus and fan out to subscribers:
//!
//!   Supervisor ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                     ┌─────────┼─────────┐
//!                                                     ▼         ▼         ▼
//!                                                [queue S1] [queue S2] [queue SN]
//!                                                     ▼         ▼         ▼
//!                                              sub.on_event(&Event) (per subscriber)
//! ```
//!
//! ## Lifecycle
//! ```text
//! Idle ──run()──► Binding ──bind ok──► Serving ──signal / serve done──► ShuttingDown ──join──► Stopped
//!                    └─ bind failed ──────────────────────────────────► Stopped (RunError::Listen)
//! ```
//!
//! ## Guarantees
//! - Signal listeners are armed **before** the serve task starts; a signal
//!   delivered immediately after `run()` begins is never lost.
//! - `graceful_stop` is invoked at most once per run, whichever trigger wins
//!   the race.
//! - The serve task is always joined after stop is requested; its error is
//!   surfaced, never dropped.
//! - Signal listeners are scoped to the run and released on every exit path.
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use servekit::{ServeError, ServeFn, Supervisor, SupervisorConfig};
//! use tokio::net::TcpListener;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // A servable that accepts connections until graceful stop is requested.
//!     let server = ServeFn::arc("echo", |listener: TcpListener, stop: CancellationToken| async move {
//!         loop {
//!             tokio::select! {
//!                 () = stop.cancelled() => return Ok::<_, ServeError>(()),
//!                 accepted = listener.accept() => {
//!                     let (_socket, _peer) = accepted?;
//!                     // hand the socket to a connection handler...
//!                 }
//!             }
//!         }
//!     });
//!
//!     let mut sup = Supervisor::builder(SupervisorConfig::default()).build();
//!     sup.attach(server, 50051);
//!
//!     // Blocks until SIGINT/SIGTERM or until the serve loop fails.
//!     sup.run().await?;
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod servables;
mod subscribers;

// ---- Public re-exports ----

pub use core::{SignalListener, Supervisor, SupervisorBuilder, SupervisorConfig};
pub use error::{RunError, ServeError};
pub use events::{Bus, Event, EventKind};
pub use servables::{Servable, ServableRef, ServeFn};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
