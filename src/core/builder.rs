//! Construction of [`Supervisor`] instances.

use std::sync::Arc;

use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};

use super::{config::SupervisorConfig, supervisor::Supervisor};

/// Builder for constructing a [`Supervisor`] with optional subscribers.
pub struct SupervisorBuilder {
    cfg: SupervisorConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: SupervisorConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive lifecycle events (server started, shutdown
    /// requested, service stopped, serve failed) through dedicated workers
    /// with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds and returns the supervisor.
    ///
    /// The supervisor starts out empty; attach the servable and port via
    /// [`Supervisor::attach`] before calling [`Supervisor::run`].
    pub fn build(self) -> Supervisor {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        Supervisor::new_internal(self.cfg, bus, subs)
    }
}
