//! Integration tests for the supervisor lifecycle: the trigger race, the
//! single-stop guarantee, error propagation, and event ordering.

use std::future::pending;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

use servekit::{
    Event, EventKind, RunError, Servable, ServeError, SignalListener, Subscribe, Supervisor,
    SupervisorConfig,
};

/// How the fake serve loop behaves after starting.
enum ServeMode {
    /// Block until graceful stop is requested, then return Ok.
    UntilStopped,
    /// Return Ok immediately (loop concludes on its own).
    FinishImmediately,
    /// Return an error immediately.
    FailImmediately(String),
    /// Never return, not even after graceful stop.
    HangForever,
}

/// Fake servable that counts serve/stop invocations.
struct FakeServer {
    mode: ServeMode,
    stop: CancellationToken,
    serves: AtomicUsize,
    stops: AtomicUsize,
}

impl FakeServer {
    fn new(mode: ServeMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            stop: CancellationToken::new(),
            serves: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        })
    }

    fn serve_calls(&self) -> usize {
        self.serves.load(Ordering::SeqCst)
    }

    fn stop_calls(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Servable for FakeServer {
    fn name(&self) -> &str {
        "fake"
    }

    async fn serve(&self, _listener: TcpListener) -> Result<(), ServeError> {
        self.serves.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            ServeMode::UntilStopped => {
                self.stop.cancelled().await;
                Ok(())
            }
            ServeMode::FinishImmediately => Ok(()),
            ServeMode::FailImmediately(msg) => Err(ServeError::Internal { error: msg.clone() }),
            ServeMode::HangForever => {
                pending::<()>().await;
                unreachable!()
            }
        }
    }

    async fn graceful_stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.stop.cancel();
    }
}

/// Subscriber that forwards every event to a channel for assertions.
struct Recorder {
    tx: mpsc::UnboundedSender<Event>,
}

#[async_trait]
impl Subscribe for Recorder {
    async fn on_event(&self, event: &Event) {
        let _ = self.tx.send(event.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}

/// Subscriber that panics on every lifecycle event.
struct Panicker;

#[async_trait]
impl Subscribe for Panicker {
    async fn on_event(&self, event: &Event) {
        if !event.is_subscriber_event() {
            panic!("panicker always fails");
        }
    }

    fn name(&self) -> &'static str {
        "panicker"
    }
}

/// Subscriber with a one-slot queue that stalls on the first event.
struct Blocker;

#[async_trait]
impl Subscribe for Blocker {
    async fn on_event(&self, event: &Event) {
        if event.kind == EventKind::ServerStarted {
            sleep(Duration::from_millis(300)).await;
        }
    }

    fn name(&self) -> &'static str {
        "blocker"
    }

    fn queue_capacity(&self) -> usize {
        1
    }
}

fn recording_supervisor(cfg: SupervisorConfig) -> (Supervisor, mpsc::UnboundedReceiver<Event>) {
    recording_supervisor_with(cfg, Vec::new())
}

fn recording_supervisor_with(
    cfg: SupervisorConfig,
    extra: Vec<Arc<dyn Subscribe>>,
) -> (Supervisor, mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut subscribers = extra;
    subscribers.push(Arc::new(Recorder { tx }));
    let sup = Supervisor::builder(cfg)
        .with_subscribers(subscribers)
        .build();
    (sup, rx)
}

fn collected_kinds(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<EventKind> {
    let mut kinds = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        kinds.push(ev.kind);
    }
    kinds
}

const BOUND: Duration = Duration::from_secs(5);

#[tokio::test]
async fn interrupt_triggers_clean_shutdown() {
    let server = FakeServer::new(ServeMode::UntilStopped);
    let (mut sup, mut rx) = recording_supervisor(SupervisorConfig::default());
    sup.attach(server.clone(), 0);

    // Simulated interrupt 50ms after the run starts.
    let result = timeout(BOUND, sup.run_until(sleep(Duration::from_millis(50))))
        .await
        .expect("run did not finish within bound");

    assert!(result.is_ok(), "expected clean shutdown, got {result:?}");
    assert_eq!(server.serve_calls(), 1);
    assert_eq!(server.stop_calls(), 1, "graceful stop must be called exactly once");

    // started → shutdown-received → stopped, in order.
    assert_eq!(
        collected_kinds(&mut rx),
        vec![
            EventKind::ServerStarted,
            EventKind::ShutdownRequested,
            EventKind::ServiceStopped,
        ]
    );
}

#[tokio::test]
async fn started_event_carries_bound_address() {
    let server = FakeServer::new(ServeMode::UntilStopped);
    let (mut sup, mut rx) = recording_supervisor(SupervisorConfig::default());
    sup.attach(server, 0);

    timeout(BOUND, sup.run_until(sleep(Duration::from_millis(20))))
        .await
        .expect("run did not finish within bound")
        .expect("run failed");

    let started = rx.try_recv().expect("missing ServerStarted event");
    assert_eq!(started.kind, EventKind::ServerStarted);
    assert_eq!(started.server.as_deref(), Some("fake"));
    let addr = started.addr.expect("ServerStarted must carry the bound address");
    assert_ne!(addr.port(), 0, "bound address must expose the real port");
}

#[tokio::test]
async fn serve_failure_is_wrapped_and_still_drained() {
    let server = FakeServer::new(ServeMode::FailImmediately("accept blew up".into()));
    let (mut sup, mut rx) = recording_supervisor(SupervisorConfig::default());
    sup.attach(server.clone(), 0);

    // No external trigger: the serve task's own failure must resolve the race.
    let result = timeout(BOUND, sup.run_until(pending::<()>()))
        .await
        .expect("run did not finish within bound");

    match result {
        Err(RunError::Serve { source }) => {
            assert!(source.to_string().contains("accept blew up"));
        }
        other => panic!("expected RunError::Serve, got {other:?}"),
    }
    // Stop and join still happen after a serve failure.
    assert_eq!(server.stop_calls(), 1);

    let kinds = collected_kinds(&mut rx);
    assert!(kinds.contains(&EventKind::ServeFailed), "events: {kinds:?}");
    assert!(!kinds.contains(&EventKind::ServiceStopped));
}

#[tokio::test]
async fn serve_concluding_cleanly_ends_the_run() {
    let server = FakeServer::new(ServeMode::FinishImmediately);
    let (mut sup, mut rx) = recording_supervisor(SupervisorConfig::default());
    sup.attach(server.clone(), 0);

    let result = timeout(BOUND, sup.run_until(pending::<()>()))
        .await
        .expect("run did not finish within bound");

    assert!(result.is_ok(), "got {result:?}");
    // The loop concluding on its own still counts as a shutdown trigger.
    assert_eq!(server.stop_calls(), 1);
    assert_eq!(
        collected_kinds(&mut rx),
        vec![
            EventKind::ServerStarted,
            EventKind::ShutdownRequested,
            EventKind::ServiceStopped,
        ]
    );
}

#[tokio::test]
async fn bind_failure_short_circuits() {
    // Occupy a port so the supervisor's bind fails.
    let occupied = TcpListener::bind(("0.0.0.0", 0)).await.expect("pre-bind");
    let port = occupied.local_addr().expect("local addr").port();

    let server = FakeServer::new(ServeMode::UntilStopped);
    let (mut sup, mut rx) = recording_supervisor(SupervisorConfig::default());
    sup.attach(server.clone(), port);

    let result = timeout(BOUND, sup.run_until(pending::<()>()))
        .await
        .expect("run did not finish within bound");

    match result {
        Err(RunError::Listen { addr, .. }) => assert_eq!(addr.port(), port),
        other => panic!("expected RunError::Listen, got {other:?}"),
    }
    // The serve task was never launched and graceful stop never requested.
    assert_eq!(server.serve_calls(), 0);
    assert_eq!(server.stop_calls(), 0);
    assert!(collected_kinds(&mut rx).is_empty());
}

#[tokio::test]
async fn unattached_supervisor_fails_fast() {
    let (sup, mut rx) = recording_supervisor(SupervisorConfig::default());

    let result = timeout(BOUND, sup.run_until(pending::<()>()))
        .await
        .expect("run did not finish within bound");

    assert!(matches!(result, Err(RunError::NotConfigured)));
    assert!(collected_kinds(&mut rx).is_empty());
}

#[tokio::test]
async fn grace_deadline_bounds_a_stuck_drain() {
    let server = FakeServer::new(ServeMode::HangForever);
    let cfg = SupervisorConfig {
        grace: Duration::from_millis(100),
        ..SupervisorConfig::default()
    };
    let (mut sup, _rx) = recording_supervisor(cfg);
    sup.attach(server.clone(), 0);

    let result = timeout(BOUND, sup.run_until(sleep(Duration::from_millis(20))))
        .await
        .expect("run did not finish within bound");

    match result {
        Err(RunError::GraceExceeded { grace }) => {
            assert_eq!(grace, Duration::from_millis(100));
        }
        other => panic!("expected RunError::GraceExceeded, got {other:?}"),
    }
    assert_eq!(server.stop_calls(), 1);
}

#[tokio::test]
async fn sequential_runs_are_independent() {
    for _ in 0..2 {
        let server = FakeServer::new(ServeMode::UntilStopped);
        let (mut sup, _rx) = recording_supervisor(SupervisorConfig::default());
        sup.attach(server.clone(), 0);

        timeout(BOUND, sup.run_until(sleep(Duration::from_millis(20))))
            .await
            .expect("run did not finish within bound")
            .expect("run failed");
        assert_eq!(server.stop_calls(), 1);
    }
}

#[tokio::test]
async fn panicking_subscriber_does_not_disrupt_delivery() {
    let server = FakeServer::new(ServeMode::UntilStopped);
    let (mut sup, mut rx) =
        recording_supervisor_with(SupervisorConfig::default(), vec![Arc::new(Panicker)]);
    sup.attach(server.clone(), 0);

    let result = timeout(BOUND, sup.run_until(sleep(Duration::from_millis(50))))
        .await
        .expect("run did not finish within bound");

    assert!(result.is_ok(), "got {result:?}");
    assert_eq!(server.stop_calls(), 1);

    // The panicking subscriber must not take down the fan-out: the recorder
    // still sees the full lifecycle, in order.
    let lifecycle: Vec<EventKind> = collected_kinds(&mut rx)
        .into_iter()
        .filter(|k| {
            !matches!(
                k,
                EventKind::SubscriberPanicked | EventKind::SubscriberOverflow
            )
        })
        .collect();
    assert_eq!(
        lifecycle,
        vec![
            EventKind::ServerStarted,
            EventKind::ShutdownRequested,
            EventKind::ServiceStopped,
        ]
    );
}

#[tokio::test]
async fn overflowing_queue_is_reported_and_isolated() {
    let server = FakeServer::new(ServeMode::UntilStopped);
    let (mut sup, mut rx) =
        recording_supervisor_with(SupervisorConfig::default(), vec![Arc::new(Blocker)]);
    sup.attach(server.clone(), 0);

    let result = timeout(BOUND, sup.run_until(sleep(Duration::from_millis(50))))
        .await
        .expect("run did not finish within bound");

    assert!(result.is_ok(), "got {result:?}");

    // The blocker's one-slot queue cannot hold all three lifecycle events:
    // the drop is reported as SubscriberOverflow, and the recorder is
    // unaffected by its neighbor's stall.
    let kinds = collected_kinds(&mut rx);
    assert!(
        kinds.contains(&EventKind::SubscriberOverflow),
        "events: {kinds:?}"
    );
    let lifecycle: Vec<EventKind> = kinds
        .into_iter()
        .filter(|k| {
            !matches!(
                k,
                EventKind::SubscriberPanicked | EventKind::SubscriberOverflow
            )
        })
        .collect();
    assert_eq!(
        lifecycle,
        vec![
            EventKind::ServerStarted,
            EventKind::ShutdownRequested,
            EventKind::ServiceStopped,
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn signal_listeners_are_scoped_per_install() {
    // Repeated installs must not interfere with each other: registration is
    // per-listener, released on drop.
    let first = SignalListener::install().expect("first install");
    let second = SignalListener::install().expect("second install");
    drop(first);
    drop(second);
    let _again = SignalListener::install().expect("install after drop");
}
