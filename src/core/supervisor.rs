//! # Supervisor: coordinated startup and shutdown of one servable.
//!
//! The [`Supervisor`] owns the event bus, the [`SubscriberSet`], and the
//! injected [`Servable`](crate::Servable). One `run` call executes exactly
//! one server lifecycle.
//!
//! ## Key responsibilities
//! - arm OS signal listeners **before** the serve task starts (no lost-signal
//!   window)
//! - bind the TCP listener; a bind failure short-circuits before anything is
//!   spawned
//! - race the shutdown trigger against the serve task's own conclusion
//! - invoke `graceful_stop` exactly once, then join the serve task and
//!   surface its error
//!
//! ## Shutdown path
//! ```text
//! trigger observed (signal | serve task concluded)
//!     └─► publish ShutdownRequested
//!     └─► servable.graceful_stop()            (once; stops new work, drains)
//!     └─► join serve task
//!           ├─ Ok(Ok(()))  → publish ServiceStopped → Ok(())
//!           ├─ Ok(Err(e))  → publish ServeFailed    → Err(RunError::Serve)
//!           ├─ Err(join)   → publish ServeFailed    → Err(RunError::Join)
//!           └─ grace hit   → abort serve task       → Err(RunError::GraceExceeded)
//! ```
//!
//! The drain is unbounded by default; set a non-zero
//! [`SupervisorConfig::grace`] for a deadline.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinHandle};
use tokio::time;

use crate::error::{RunError, ServeError};
use crate::events::{Bus, Event, EventKind};
use crate::servables::ServableRef;
use crate::subscribers::SubscriberSet;

use super::config::SupervisorConfig;
use super::shutdown::SignalListener;
use super::SupervisorBuilder;

/// Result of joining the background serve task.
type Joined = Result<Result<(), ServeError>, JoinError>;

/// Coordinates one server lifecycle: bind, serve, race triggers, drain, join.
///
/// Constructed empty via [`Supervisor::builder`], configured once with
/// [`attach`](Supervisor::attach), and consumed by exactly one
/// [`run`](Supervisor::run) (or [`run_until`](Supervisor::run_until)) call.
pub struct Supervisor {
    cfg: SupervisorConfig,
    bus: Bus,
    subs: SubscriberSet,
    servable: Option<ServableRef>,
    port: u16,
}

impl Supervisor {
    /// Returns a builder for a supervisor with the given configuration.
    pub fn builder(cfg: SupervisorConfig) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: SupervisorConfig, bus: Bus, subs: SubscriberSet) -> Self {
        Self {
            cfg,
            bus,
            subs,
            servable: None,
            port: 0,
        }
    }

    /// Injects the servable and the TCP port to bind.
    ///
    /// Must be called before [`run`](Supervisor::run); running an unattached
    /// supervisor fails with [`RunError::NotConfigured`]. The port is not
    /// validated here; an unusable port surfaces as
    /// [`RunError::Listen`] at bind time.
    pub fn attach(&mut self, servable: ServableRef, port: u16) {
        self.servable = Some(servable);
        self.port = port;
    }

    /// Runs the server lifecycle until an OS termination signal arrives or
    /// the serve loop concludes on its own.
    ///
    /// Signal listeners (`SIGINT`/`SIGTERM`) are armed before anything else
    /// and torn down on every exit path.
    pub async fn run(self) -> Result<(), RunError> {
        let signals = SignalListener::install().map_err(|source| RunError::Signal { source })?;
        self.run_until(signals.recv()).await
    }

    /// Runs the server lifecycle with an injected shutdown trigger instead of
    /// OS signals.
    ///
    /// The lifecycle is identical to [`run`](Supervisor::run): whichever of
    /// `shutdown` and the serve task's conclusion fires first starts the
    /// drain. Useful for embedding into a larger shutdown orchestration and
    /// for tests.
    ///
    /// Lifecycle events are flushed to all subscribers before this returns.
    pub async fn run_until<S>(self, shutdown: S) -> Result<(), RunError>
    where
        S: Future<Output = ()>,
    {
        let Supervisor {
            cfg,
            bus,
            subs,
            servable,
            port,
        } = self;
        let servable = servable.ok_or(RunError::NotConfigured)?;

        // Deliver bus events into the per-subscriber queues concurrently with
        // the lifecycle. The drive branch always terminates the loop; the bus
        // outlives it, so `Closed` is unreachable here.
        let mut rx = bus.subscribe();
        let drive = Self::drive(&cfg, &bus, &servable, port, shutdown);
        tokio::pin!(drive);
        let result = loop {
            tokio::select! {
                result = &mut drive => break result,
                received = rx.recv() => match received {
                    Ok(ev) => subs.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => continue,
                },
            }
        };

        match &result {
            Ok(()) => {
                bus.publish(Event::new(EventKind::ServiceStopped).with_server(servable.name()));
            }
            // Bind failed: the server never started, there is no lifecycle to report.
            Err(RunError::Listen { .. }) => {}
            Err(err) => {
                bus.publish(
                    Event::new(EventKind::ServeFailed)
                        .with_server(servable.name())
                        .with_reason(err.to_string()),
                );
            }
        }

        // Drain what is still buffered on the bus (the final events above,
        // plus any overflow/panic reports), then flush the subscriber queues.
        // Guarantees subscribers observed all events of this run.
        loop {
            match rx.try_recv() {
                Ok(ev) => subs.emit(&ev),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        subs.shutdown().await;

        result
    }

    /// Executes the lifecycle: bind, spawn serve, race triggers, drain, join.
    async fn drive<S>(
        cfg: &SupervisorConfig,
        bus: &Bus,
        servable: &ServableRef,
        port: u16,
        shutdown: S,
    ) -> Result<(), RunError>
    where
        S: Future<Output = ()>,
    {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| RunError::Listen { addr, source })?;
        let local = listener.local_addr().unwrap_or(addr);

        bus.publish(
            Event::new(EventKind::ServerStarted)
                .with_server(servable.name())
                .with_addr(local),
        );

        let serving = Arc::clone(servable);
        let mut handle = tokio::spawn(async move { serving.serve(listener).await });
        let abort = handle.abort_handle();

        // Race the shutdown trigger against the serve task concluding on its
        // own. Whichever fires first wins; the other path has no further
        // effect.
        tokio::pin!(shutdown);
        let early = tokio::select! {
            () = &mut shutdown => None,
            joined = &mut handle => Some(joined),
        };

        bus.publish(Event::new(EventKind::ShutdownRequested).with_server(servable.name()));

        match cfg.grace_limit() {
            None => Self::stop_and_join(servable, handle, early).await,
            Some(grace) => {
                let drain = Self::stop_and_join(servable, handle, early);
                match time::timeout(grace, drain).await {
                    Ok(result) => result,
                    Err(_elapsed) => {
                        abort.abort();
                        Err(RunError::GraceExceeded { grace })
                    }
                }
            }
        }
    }

    /// Requests graceful stop (exactly once per run), joins the serve task,
    /// and maps the collected outcome.
    ///
    /// `early` carries the join result if the serve task already concluded
    /// before the stop request; the handle must not be polled again in that
    /// case.
    async fn stop_and_join(
        servable: &ServableRef,
        handle: JoinHandle<Result<(), ServeError>>,
        early: Option<Joined>,
    ) -> Result<(), RunError> {
        servable.graceful_stop().await;

        let joined = match early {
            Some(joined) => joined,
            None => handle.await,
        };

        match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(RunError::Serve { source }),
            Err(err) => Err(RunError::Join {
                reason: err.to_string(),
            }),
        }
    }
}
