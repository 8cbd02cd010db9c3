//! # Servable abstraction.
//!
//! This module defines the [`Servable`] trait, the contract between the
//! supervisor and the actual network server it runs. The common handle type
//! is [`ServableRef`], an `Arc<dyn Servable>` suitable for sharing between
//! the supervisor and the background serve task.
//!
//! A servable receives a pre-bound listener, serves on it until shutdown is
//! requested, and drains in-flight work when [`graceful_stop`](Servable::graceful_stop)
//! is called.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;

use crate::error::ServeError;

/// Shared reference to a servable.
pub type ServableRef = Arc<dyn Servable>;

/// # Pluggable network server.
///
/// A `Servable` has a stable [`name`](Servable::name), a blocking
/// [`serve`](Servable::serve) loop, and a [`graceful_stop`](Servable::graceful_stop)
/// primitive. The supervisor binds the listener, runs `serve` on a background
/// task, and calls `graceful_stop` exactly once when shutdown is triggered.
///
/// ## Contract
/// - `serve` runs until the loop ends: either because `graceful_stop` was
///   called, or because of an internal failure. It returns the loop's error,
///   if any.
/// - `graceful_stop` stops accepting new work **immediately**, lets in-flight
///   work finish, and only then allows `serve` to return. It is called at
///   most once per run.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio::net::TcpListener;
/// use tokio_util::sync::CancellationToken;
/// use servekit::{Servable, ServeError};
///
/// struct Echo {
///     stop: CancellationToken,
/// }
///
/// #[async_trait]
/// impl Servable for Echo {
///     fn name(&self) -> &str { "echo" }
///
///     async fn serve(&self, listener: TcpListener) -> Result<(), ServeError> {
///         loop {
///             tokio::select! {
///                 () = self.stop.cancelled() => return Ok(()),
///                 accepted = listener.accept() => {
///                     let (_socket, _peer) = accepted?;
///                     // handle the connection...
///                 }
///             }
///         }
///     }
///
///     async fn graceful_stop(&self) {
///         self.stop.cancel();
///         // wait for in-flight connections to drain...
///     }
/// }
/// ```
#[async_trait]
pub trait Servable: Send + Sync + 'static {
    /// Returns a stable, human-readable server name (used in log events).
    fn name(&self) -> &str;

    /// Serves on the pre-bound listener until the loop ends.
    ///
    /// Returns `Ok(())` on a clean stop, or the loop's error. The supervisor
    /// wraps a returned error into [`RunError::Serve`](crate::RunError::Serve).
    async fn serve(&self, listener: TcpListener) -> Result<(), ServeError>;

    /// Requests a graceful stop: new work is rejected immediately, in-flight
    /// work drains, then the serve loop returns.
    ///
    /// There is no deadline here; bounding the drain is the supervisor's
    /// concern (see [`SupervisorConfig::grace`](crate::SupervisorConfig)).
    async fn graceful_stop(&self);
}
