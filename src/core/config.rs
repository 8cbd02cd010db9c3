//! # Global runtime configuration.
//!
//! Provides [`SupervisorConfig`] centralized settings for one supervisor run.
//!
//! ## Sentinel values
//! - `grace = 0s` → unbounded drain (the supervisor waits for the servable's
//!   graceful stop as long as it takes)
//! - `bus_capacity` → minimum 1 (clamped by the Bus)

use std::time::Duration;

/// Global configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `grace`: Maximum wait for graceful stop + task join (`0s` = no deadline)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct SupervisorConfig {
    /// Maximum time to wait for the drain phase (graceful stop + join).
    ///
    /// When a shutdown trigger is observed:
    /// - The servable's `graceful_stop` is invoked.
    /// - The supervisor waits up to `grace` for the serve task to finish.
    /// - On expiry the serve task is aborted and `run` returns
    ///   [`RunError::GraceExceeded`](crate::RunError::GraceExceeded).
    ///
    /// `Duration::ZERO` disables the deadline entirely: the drain may block
    /// until in-flight work finishes naturally.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages
    /// will receive `Lagged` and skip older items. Minimum value is 1
    /// (enforced by the Bus).
    pub bus_capacity: usize,
}

impl SupervisorConfig {
    /// Returns the drain deadline as an `Option`.
    ///
    /// - `None` → unbounded drain
    /// - `Some(d)` → stop + join must finish within `d`
    #[inline]
    pub fn grace_limit(&self) -> Option<Duration> {
        if self.grace == Duration::ZERO {
            None
        } else {
            Some(self.grace)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    ///
    /// The `Bus` should use this value to avoid constructing an invalid
    /// channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SupervisorConfig {
    /// Default configuration:
    ///
    /// - `grace = 0s` (unbounded drain; callers wanting a bounded shutdown
    ///   set an explicit deadline)
    /// - `bus_capacity = 64` (a run emits a handful of events)
    fn default() -> Self {
        Self {
            grace: Duration::ZERO,
            bus_capacity: 64,
        }
    }
}
