//! Error types used by the servekit runtime and servables.
//!
//! This module defines two main error enums:
//!
//! - [`RunError`] — errors raised by the supervisor lifecycle itself.
//! - [`ServeError`] — errors raised by the injected servable's serve loop.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// # Errors produced by a supervisor run.
///
/// Each variant identifies which lifecycle phase failed. None of these are
/// retried internally; restart policy belongs to the embedding application.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunError {
    /// No servable was attached before `run` was invoked.
    ///
    /// This is a programmer error, reported synchronously before any socket
    /// or signal state is touched.
    #[error("no servable configured; call attach() before run()")]
    NotConfigured,

    /// Installing the OS signal listeners failed.
    #[error("failed to install signal listener: {source}")]
    Signal {
        /// The underlying registration error.
        source: io::Error,
    },

    /// Binding the TCP listener failed; the serve task was never launched.
    #[error("failed to listen on {addr}: {source}")]
    Listen {
        /// The wildcard address the bind was attempted on.
        addr: SocketAddr,
        /// The underlying bind error.
        source: io::Error,
    },

    /// The serve loop returned an error after a successful start.
    #[error("server error: {source}")]
    Serve {
        /// The error reported by the servable.
        source: ServeError,
    },

    /// Joining the background serve task failed (panic or runtime cancellation).
    #[error("failed to join serve task: {reason}")]
    Join {
        /// Human-readable join failure description.
        reason: String,
    },

    /// The configured shutdown grace period elapsed before the drain finished.
    ///
    /// Only reachable when [`SupervisorConfig::grace`](crate::SupervisorConfig)
    /// is non-zero; the serve task is aborted in that case.
    #[error("shutdown grace {grace:?} exceeded; serve task aborted")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl RunError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use servekit::RunError;
    ///
    /// let err = RunError::NotConfigured;
    /// assert_eq!(err.as_label(), "run_not_configured");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::NotConfigured => "run_not_configured",
            RunError::Signal { .. } => "run_signal_install",
            RunError::Listen { .. } => "run_listen_failed",
            RunError::Serve { .. } => "run_serve_failed",
            RunError::Join { .. } => "run_join_failed",
            RunError::GraceExceeded { .. } => "run_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RunError::NotConfigured => "no servable configured".to_string(),
            RunError::Signal { source } => format!("signal install: {source}"),
            RunError::Listen { addr, source } => format!("listen on {addr}: {source}"),
            RunError::Serve { source } => format!("serve: {source}"),
            RunError::Join { reason } => format!("join: {reason}"),
            RunError::GraceExceeded { grace } => format!("grace exceeded after {grace:?}"),
        }
    }
}

/// # Errors produced by a servable's serve loop.
///
/// The supervisor does not interpret these beyond wrapping them into
/// [`RunError::Serve`]; the taxonomy exists for the servable's own
/// logging/metrics.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ServeError {
    /// Socket-level failure (accept error, broken listener, I/O fault).
    #[error("transport error: {error}")]
    Transport {
        /// The underlying error message.
        error: String,
    },

    /// Failure inside the servable itself (handler setup, internal state).
    #[error("serve loop failed: {error}")]
    Internal {
        /// The underlying error message.
        error: String,
    },
}

impl ServeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use servekit::ServeError;
    ///
    /// let err = ServeError::Internal { error: "boom".into() };
    /// assert_eq!(err.as_label(), "serve_internal");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ServeError::Transport { .. } => "serve_transport",
            ServeError::Internal { .. } => "serve_internal",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ServeError::Transport { error } => format!("transport: {error}"),
            ServeError::Internal { error } => format!("internal: {error}"),
        }
    }
}

impl From<io::Error> for ServeError {
    /// Socket-level I/O errors map to [`ServeError::Transport`].
    fn from(err: io::Error) -> Self {
        ServeError::Transport {
            error: err.to_string(),
        }
    }
}
