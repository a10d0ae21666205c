
use crate::{
    ClientId, Notification, NotificationKind, NotificationSink, Orchestrator, PowerConfig,
};

use aw_power::PowerControl;
use aw_proto::{ReachabilityProbe, ReachabilityResult};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

/// Probe returning queued results first, then a fallback
pub(crate) struct FakeProbe {
    queued: Mutex<VecDeque<ReachabilityResult>>,
    fallback: Mutex<ReachabilityResult>,
    latency: Duration,
    probes: AtomicUsize,
}

impl FakeProbe {
    pub(crate) fn new(fallback: ReachabilityResult) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(fallback),
            latency: Duration::ZERO,
            probes: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn push(&self, result: ReachabilityResult) {
        self.queued.lock().unwrap().push_back(result);
    }

    pub(crate) fn set(&self, result: ReachabilityResult) {
        self.queued.lock().unwrap().clear();
        *self.fallback.lock().unwrap() = result;
    }

    pub(crate) fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReachabilityProbe for FakeProbe {
    async fn probe(&self, _host: &str, _port: u16, _timeout: Duration) -> ReachabilityResult {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let queued = self.queued.lock().unwrap().pop_front();
        queued.unwrap_or(*self.fallback.lock().unwrap())
    }

    async fn can_connect(&self, _host: &str, _port: u16, _timeout: Duration) -> bool {
        self.fallback.lock().unwrap().tcp_reachable
    }
}

/// Control API double counting calls
pub(crate) struct FakePower {
    start_ok: AtomicBool,
    stop_ok: AtomicBool,
    latency: Duration,
    starts: AtomicUsize,
    stops: AtomicUsize,
    releases: AtomicUsize,
}

impl FakePower {
    pub(crate) fn new() -> Self {
        Self {
            start_ok: AtomicBool::new(true),
            stop_ok: AtomicBool::new(true),
            latency: Duration::ZERO,
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn set_start_ok(&self, ok: bool) {
        self.start_ok.store(ok, Ordering::SeqCst);
    }

    pub(crate) fn set_stop_ok(&self, ok: bool) {
        self.stop_ok.store(ok, Ordering::SeqCst);
    }

    pub(crate) fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub(crate) fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub(crate) fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl PowerControl for FakePower {
    async fn request_start(&self, _server_id: &str) -> bool {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.start_ok.load(Ordering::SeqCst)
    }

    async fn request_stop(&self, _server_id: &str) -> bool {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.stop_ok.load(Ordering::SeqCst)
    }

    async fn query_status(&self, _server_id: &str) -> String {
        String::from("running")
    }

    fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Sink keeping every notification in order
#[derive(Default)]
pub(crate) struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub(crate) fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub(crate) fn kinds(&self) -> Vec<NotificationKind> {
        self.all().into_iter().map(|n| n.kind).collect()
    }

    pub(crate) fn count(&self, kind: NotificationKind) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }

    pub(crate) fn count_matching(&self, predicate: impl Fn(&NotificationKind) -> bool) -> usize {
        self.kinds().iter().filter(|k| predicate(k)).count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

pub(crate) struct Harness {
    pub(crate) orchestrator: Orchestrator,
    pub(crate) probe: Arc<FakeProbe>,
    pub(crate) power: Arc<FakePower>,
    pub(crate) sink: Arc<RecordingSink>,
}

pub(crate) fn harness(config: PowerConfig, probe: FakeProbe, power: FakePower) -> Harness {
    let probe = Arc::new(probe);
    let power = Arc::new(power);
    let sink = Arc::new(RecordingSink::default());
    let orchestrator = Orchestrator::new(config, probe.clone(), power.clone(), sink.clone());
    Harness {
        orchestrator,
        probe,
        power,
        sink,
    }
}

pub(crate) fn client(id: &str) -> ClientId {
    ClientId::parse(id).unwrap()
}

pub(crate) fn online(players: Option<u32>) -> ReachabilityResult {
    ReachabilityResult {
        tcp_reachable: true,
        protocol_online: true,
        player_count: players,
    }
}

pub(crate) fn offline() -> ReachabilityResult {
    ReachabilityResult::unreachable()
}

/// Auto-shutdown on: 300s delay, 60s checks
pub(crate) fn auto_shutdown_config() -> PowerConfig {
    PowerConfig {
        server_id: String::from("1a7ce997"),
        auto_shutdown_enabled: true,
        ..PowerConfig::default()
    }
}

/// Let spawned tasks run without moving the clock
pub(crate) async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

pub(crate) async fn advance_secs(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
    settle().await;
}
