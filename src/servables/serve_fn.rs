//! # Function-backed servable (`ServeFn`)
//!
//! [`ServeFn`] wraps a closure `F: Fn(TcpListener, CancellationToken) -> Fut`
//! into a [`Servable`], wiring `graceful_stop` to a [`CancellationToken`].
//! This is the low-ceremony path for small embedders and tests that don't
//! need a full trait implementation.
//!
//! ## Stop semantics
//! - [`Servable::graceful_stop`] cancels the token and returns; the closure
//!   owns the drain and signals its completion by returning from `serve`.
//! - The supervisor still joins the serve task after stop, so a drain that
//!   happens inside the closure is always waited for.
//!
//! ## Example
//! ```rust
//! use servekit::{ServableRef, ServeError, ServeFn};
//! use tokio::net::TcpListener;
//! use tokio_util::sync::CancellationToken;
//!
//! let s: ServableRef = ServeFn::arc("echo", |listener: TcpListener, stop: CancellationToken| async move {
//!     loop {
//!         tokio::select! {
//!             () = stop.cancelled() => return Ok::<_, ServeError>(()),
//!             accepted = listener.accept() => {
//!                 let (_socket, _peer) = accepted?;
//!                 // handle the connection...
//!             }
//!         }
//!     }
//! });
//!
//! assert_eq!(s.name(), "echo");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error::ServeError;
use crate::servables::servable::Servable;

/// Function-backed servable implementation.
///
/// Wraps a serve closure plus the stop token handed to it.
#[derive(Debug)]
pub struct ServeFn<F> {
    name: Cow<'static, str>,
    f: F,
    stop: CancellationToken,
}

impl<F> ServeFn<F> {
    /// Creates a new function-backed servable.
    ///
    /// Prefer [`ServeFn::arc`] when you immediately need a [`ServableRef`](crate::ServableRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            stop: CancellationToken::new(),
        }
    }

    /// Creates the servable and returns it as a shared handle (`Arc<Self>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Servable for ServeFn<F>
where
    F: Fn(TcpListener, CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), ServeError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn serve(&self, listener: TcpListener) -> Result<(), ServeError> {
        (self.f)(listener, self.stop.clone()).await
    }

    async fn graceful_stop(&self) {
        self.stop.cancel();
    }
}
