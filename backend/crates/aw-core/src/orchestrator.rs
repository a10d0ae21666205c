use crate::{
    ClientId, ConnectionOutcome, CoreError, CoreResult, Countdown, LifecycleState, Notification,
    NotificationKind, NotificationSink, PowerConfig, Scheduler, ShutdownRequestOutcome,
    StatusReport, TimerKind, countdown::ceil_secs,
};

use aw_power::PowerControl;
use aw_proto::ReachabilityProbe;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Lifecycle orchestrator for one managed server.
///
/// Every transition runs under a single async mutex that is released before
/// any probe or control API call. Continuations re-acquire it and check that
/// the orchestrator is not draining and that the cycle they belong to is
/// still current; otherwise they do nothing.
///
/// Cloning is cheap and yields a handle to the same orchestrator.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    probe: Arc<dyn ReachabilityProbe>,
    power: Arc<dyn PowerControl>,
    sink: Arc<dyn NotificationSink>,
    scheduler: Scheduler,
    record: Mutex<LifecycleRecord>,
}

struct LifecycleRecord {
    config: PowerConfig,
    phase: Phase,
    /// Kept apart from `phase` so only a non-zero reading, a completed stop
    /// or an accepted start resets it.
    empty_since: Option<Instant>,
    /// Identifies startup cycles and stop calls for stale-completion checks
    generation: u64,
    /// Clients waiting on a connection-triggered probe, while one is in flight
    connection_check: Option<BTreeSet<ClientId>>,
    tick_in_flight: bool,
    manual_shutdown_pending: bool,
    /// Set by a completed stop; no new empty timer starts until the server is
    /// seen with players, seen offline, or started again.
    stopped_while_empty: bool,
}

enum Phase {
    Idle,
    StartRequested(StartupCycle),
    StartupMonitoring {
        cycle: StartupCycle,
        attempts_elapsed: u32,
    },
    StartupTimedOut,
    ShutdownRequested {
        generation: u64,
    },
    Draining,
}

struct StartupCycle {
    generation: u64,
    trigger: ClientId,
    interested: BTreeSet<ClientId>,
}

struct Target {
    host: String,
    port: u16,
    timeout: Duration,
}

impl Target {
    fn of(config: &PowerConfig) -> Self {
        Self {
            host: config.target_host.clone(),
            port: config.target_port,
            timeout: config.probe_timeout,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl LifecycleRecord {
    fn new(config: PowerConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            empty_since: None,
            generation: 0,
            connection_check: None,
            tick_in_flight: false,
            manual_shutdown_pending: false,
            stopped_while_empty: false,
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn is_draining(&self) -> bool {
        matches!(self.phase, Phase::Draining)
    }

    /// `StartupTimedOut` ends its cycle and behaves as `Idle`
    fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::StartupTimedOut)
    }

    fn snapshot(&self) -> LifecycleState {
        match &self.phase {
            Phase::Idle => match self.empty_since {
                Some(empty_since) => LifecycleState::EmptyTimerRunning { empty_since },
                None => LifecycleState::Idle,
            },
            Phase::StartRequested(_) => LifecycleState::StartRequested,
            Phase::StartupMonitoring {
                cycle,
                attempts_elapsed,
            } => LifecycleState::StartupMonitoring {
                attempts_elapsed: *attempts_elapsed,
                client: cycle.trigger.clone(),
            },
            Phase::StartupTimedOut => LifecycleState::StartupTimedOut,
            Phase::ShutdownRequested { .. } => LifecycleState::ShutdownRequested,
            Phase::Draining => LifecycleState::Draining,
        }
    }

    fn countdown(&self) -> Countdown {
        let enabled = self.config.auto_shutdown_enabled && !self.is_draining();
        let seconds_remaining = match self.empty_since {
            Some(since) if enabled => Some(ceil_secs(
                self.config.empty_delay().saturating_sub(since.elapsed()),
            )),
            _ => None,
        };
        Countdown {
            enabled,
            seconds_remaining,
        }
    }
}

impl Orchestrator {
    pub fn new(
        config: PowerConfig,
        probe: Arc<dyn ReachabilityProbe>,
        power: Arc<dyn PowerControl>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                probe,
                power,
                sink,
                scheduler: Scheduler::new(),
                record: Mutex::new(LifecycleRecord::new(config)),
            }),
        }
    }

    /// Start the periodic emptiness check when auto-shutdown is enabled.
    pub async fn start(&self) {
        let record = self.inner.record.lock().await;
        if record.is_draining() {
            return;
        }

        if record.config.auto_shutdown_enabled {
            info!(
                "Auto-shutdown enabled: stop after {}s empty, checking every {}s",
                record.config.empty_delay_seconds, record.config.empty_check_interval_seconds
            );
            self.schedule_empty_checks(record.config.empty_check_interval());
        } else {
            info!("Auto-shutdown disabled");
        }
    }

    // =========================================================================
    // Connection attempts
    // =========================================================================

    /// A client wants to reach the managed server.
    ///
    /// Probes the server and, when it is offline, requests a start and begins
    /// a startup cycle. Attempts arriving while a probe or cycle is already
    /// running join it instead of issuing another start.
    pub async fn on_connection_attempt(&self, client: ClientId) -> CoreResult<ConnectionOutcome> {
        let target = {
            let mut record = self.inner.record.lock().await;
            match &mut record.phase {
                Phase::Draining => return Err(CoreError::draining()),
                Phase::StartRequested(cycle) | Phase::StartupMonitoring { cycle, .. } => {
                    debug!(
                        "{} joined startup cycle {} in progress",
                        client, cycle.generation
                    );
                    cycle.interested.insert(client.clone());
                    self.notify_client(NotificationKind::StartupInProgress, client);
                    return Ok(ConnectionOutcome::StartupInProgress);
                }
                Phase::ShutdownRequested { .. } => {
                    info!("{} tried to connect while the server is stopping", client);
                    return Ok(ConnectionOutcome::ShuttingDown);
                }
                Phase::Idle | Phase::StartupTimedOut => {}
            }

            if let Some(waiting) = record.connection_check.as_mut() {
                waiting.insert(client.clone());
                self.notify_client(NotificationKind::StartupInProgress, client);
                return Ok(ConnectionOutcome::StartupInProgress);
            }

            record.connection_check = Some(BTreeSet::from([client.clone()]));
            Target::of(&record.config)
        };

        // The check runs detached so a caller that goes away mid-probe or
        // mid-start cannot leave the record holding a claimed check or cycle.
        let this = self.clone();
        let check = tokio::spawn(async move { this.run_connection_check(client, target).await });
        match check.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Connection check task failed: {}", e);
                self.inner.record.lock().await.connection_check = None;
                Ok(ConnectionOutcome::Cancelled)
            }
        }
    }

    /// Probe, then request a start when the server is offline. Owns the
    /// claimed `connection_check` until it resolves.
    async fn run_connection_check(
        &self,
        client: ClientId,
        target: Target,
    ) -> CoreResult<ConnectionOutcome> {
        let result = self
            .inner
            .probe
            .probe(&target.host, target.port, target.timeout)
            .await;

        let (generation, server_id) = {
            let mut record = self.inner.record.lock().await;
            if record.is_draining() {
                return Err(CoreError::draining());
            }

            let mut waiting = record.connection_check.take().unwrap_or_default();
            waiting.insert(client.clone());

            if result.is_online() {
                debug!("{} is online, letting {} through", target, client);
                for other in waiting.into_iter().filter(|other| *other != client) {
                    self.notify_client(NotificationKind::Started, other);
                }
                return Ok(ConnectionOutcome::Online);
            }

            match record.phase {
                Phase::Idle | Phase::StartupTimedOut => {}
                Phase::ShutdownRequested { .. } => return Ok(ConnectionOutcome::ShuttingDown),
                _ => return Ok(ConnectionOutcome::StartupInProgress),
            }

            info!("{} is offline, requesting start for {}", target, client);
            let generation = record.next_generation();
            record.phase = Phase::StartRequested(StartupCycle {
                generation,
                trigger: client.clone(),
                interested: waiting,
            });
            (generation, record.config.server_id.clone())
        };

        let accepted = self.inner.power.request_start(&server_id).await;

        let mut record = self.inner.record.lock().await;
        if record.is_draining() {
            return Err(CoreError::draining());
        }

        let current = matches!(
            &record.phase,
            Phase::StartRequested(cycle) if cycle.generation == generation
        );
        if !current {
            debug!("Start completion for cycle {} is stale", generation);
            return Ok(ConnectionOutcome::Cancelled);
        }
        let Phase::StartRequested(cycle) = std::mem::replace(&mut record.phase, Phase::Idle) else {
            return Ok(ConnectionOutcome::Cancelled);
        };

        if !accepted {
            warn!("Start signal for cycle {} was refused", generation);
            for client in &cycle.interested {
                self.notify_client(NotificationKind::StartFailed, client.clone());
            }
            return Ok(ConnectionOutcome::StartFailed);
        }

        // The server was offline, so earlier emptiness readings no longer apply.
        record.empty_since = None;
        record.stopped_while_empty = false;

        for client in &cycle.interested {
            self.notify_client(NotificationKind::Starting, client.clone());
        }

        let delay = record.config.startup_initial_delay;
        record.phase = Phase::StartupMonitoring {
            cycle,
            attempts_elapsed: 0,
        };
        self.schedule_startup_poll(generation, delay);

        Ok(ConnectionOutcome::Starting)
    }

    /// A client gave up waiting. The next startup poll abandons the cycle
    /// once nobody is left.
    pub async fn on_client_disconnected(&self, client: ClientId) -> CoreResult<()> {
        let mut record = self.inner.record.lock().await;
        match &mut record.phase {
            Phase::Draining => return Err(CoreError::draining()),
            Phase::StartRequested(cycle) | Phase::StartupMonitoring { cycle, .. } => {
                if cycle.interested.remove(&client) {
                    debug!(
                        "{} left startup cycle {} ({} still waiting)",
                        client,
                        cycle.generation,
                        cycle.interested.len()
                    );
                }
            }
            _ => {}
        }

        if let Some(waiting) = record.connection_check.as_mut() {
            waiting.remove(&client);
        }

        Ok(())
    }

    // =========================================================================
    // Startup polling
    // =========================================================================

    fn schedule_startup_poll(&self, generation: u64, delay: Duration) {
        let this = self.clone();
        self.inner
            .scheduler
            .schedule(TimerKind::StartupPoll, delay, async move {
                this.run_startup_poll(generation).await;
            });
    }

    async fn run_startup_poll(&self, generation: u64) {
        let target = {
            let mut record = self.inner.record.lock().await;
            let target = Target::of(&record.config);
            let Phase::StartupMonitoring { cycle, .. } = &record.phase else {
                return;
            };
            if cycle.generation != generation {
                return;
            }
            if cycle.interested.is_empty() {
                info!(
                    "Nobody is waiting any more, abandoning startup cycle {}",
                    generation
                );
                record.phase = Phase::Idle;
                self.notify(Notification::broadcast(NotificationKind::StartupAbandoned));
                return;
            }
            target
        };

        let result = self
            .inner
            .probe
            .probe(&target.host, target.port, target.timeout)
            .await;

        let mut record = self.inner.record.lock().await;
        let max_attempts = record.config.startup_max_attempts;
        let poll_interval = record.config.startup_poll_interval;
        let Phase::StartupMonitoring {
            cycle,
            attempts_elapsed,
        } = &mut record.phase
        else {
            return;
        };
        if cycle.generation != generation {
            return;
        }

        let attempts = *attempts_elapsed + 1;

        if result.is_online() {
            info!("{} is online after {} poll(s)", target, attempts);
            for client in &cycle.interested {
                self.notify_client(NotificationKind::Started, client.clone());
            }
            record.phase = Phase::Idle;
            return;
        }

        if attempts >= max_attempts {
            warn!(
                "{} did not come online after {} poll(s), giving up",
                target, attempts
            );
            for client in &cycle.interested {
                self.notify_client(NotificationKind::TimedOut, client.clone());
            }
            record.phase = Phase::StartupTimedOut;
            return;
        }

        debug!(
            "{} still offline ({}/{}), polling again in {}s",
            target,
            attempts,
            max_attempts,
            poll_interval.as_secs()
        );
        *attempts_elapsed = attempts;
        self.schedule_startup_poll(generation, poll_interval);
    }

    // =========================================================================
    // Emptiness check
    // =========================================================================

    fn schedule_empty_checks(&self, interval: Duration) {
        let this = self.clone();
        self.inner
            .scheduler
            .schedule_repeating(TimerKind::EmptyCheck, interval, move || {
                let this = this.clone();
                async move { this.on_periodic_tick().await }
            });
    }

    /// Periodic emptiness check driving auto-shutdown.
    ///
    /// Skipped while auto-shutdown is disabled, while a startup cycle or stop
    /// call is in flight, and while a previous check is still probing.
    pub async fn on_periodic_tick(&self) {
        let target = {
            let mut record = self.inner.record.lock().await;
            if !record.config.auto_shutdown_enabled || !record.is_idle() {
                return;
            }
            if record.tick_in_flight {
                debug!("Previous emptiness check still running");
                return;
            }
            record.tick_in_flight = true;
            Target::of(&record.config)
        };

        let result = self
            .inner
            .probe
            .probe(&target.host, target.port, target.timeout)
            .await;

        let (generation, server_id) = {
            let mut record = self.inner.record.lock().await;
            record.tick_in_flight = false;
            if !record.config.auto_shutdown_enabled || !record.is_idle() {
                return;
            }
            record.phase = Phase::Idle;

            // An unreachable server may already be off; never stop it.
            if !result.is_online() {
                debug!("{} is offline, nothing to shut down", target);
                record.stopped_while_empty = false;
                return;
            }

            let Some(players) = result.player_count else {
                debug!("{} did not report a player count", target);
                return;
            };

            if players > 0 {
                record.stopped_while_empty = false;
                if record.empty_since.take().is_some() {
                    info!("{} player(s) on {}, auto-shutdown cancelled", players, target);
                    self.notify(Notification::broadcast(NotificationKind::EmptyTimerCleared));
                } else {
                    debug!("{} player(s) on {}", players, target);
                }
                return;
            }

            if record.stopped_while_empty {
                debug!("{} still reports 0 players after a stop", target);
                return;
            }

            let now = Instant::now();
            let delay = record.config.empty_delay();
            let Some(since) = record.empty_since else {
                info!(
                    "{} is empty, stopping it in {}s unless a player joins",
                    target,
                    delay.as_secs()
                );
                record.empty_since = Some(now);
                self.notify(Notification::broadcast(NotificationKind::EmptyTimerStarted));
                return;
            };

            let elapsed = now.saturating_duration_since(since);
            if elapsed < delay {
                let seconds_remaining = ceil_secs(delay - elapsed);
                debug!("{} empty, shutting down in {}s", target, seconds_remaining);
                self.notify(Notification::broadcast(
                    NotificationKind::StillCountingDown { seconds_remaining },
                ));
                return;
            }

            info!(
                "{} has been empty for {}s, requesting stop",
                target,
                elapsed.as_secs()
            );
            let generation = record.next_generation();
            record.phase = Phase::ShutdownRequested { generation };
            self.notify(Notification::broadcast(NotificationKind::ShuttingDown));
            (generation, record.config.server_id.clone())
        };

        self.finish_stop(generation, &server_id).await;
    }

    async fn finish_stop(&self, generation: u64, server_id: &str) {
        let stopped = self.inner.power.request_stop(server_id).await;

        let mut record = self.inner.record.lock().await;
        let current = matches!(
            record.phase,
            Phase::ShutdownRequested { generation: pending } if pending == generation
        );
        if !current {
            debug!("Stop completion {} is stale", generation);
            return;
        }

        record.phase = Phase::Idle;
        if stopped {
            info!("Stop signal accepted");
            record.empty_since = None;
            record.stopped_while_empty = true;
            self.notify(Notification::broadcast(NotificationKind::StopSucceeded));
        } else {
            warn!("Stop signal refused, the next check retries");
            self.notify(Notification::broadcast(NotificationKind::StopFailed));
        }
    }

    // =========================================================================
    // Admin requests
    // =========================================================================

    /// Stop the server after the configured grace period. Cancels any
    /// startup cycle when it fires.
    pub async fn on_manual_shutdown_request(&self) -> CoreResult<ShutdownRequestOutcome> {
        let mut record = self.inner.record.lock().await;
        match record.phase {
            Phase::Draining => return Err(CoreError::draining()),
            Phase::ShutdownRequested { .. } => return Ok(ShutdownRequestOutcome::AlreadyPending),
            _ => {}
        }
        if record.manual_shutdown_pending {
            return Ok(ShutdownRequestOutcome::AlreadyPending);
        }

        let delay = record.config.manual_shutdown_delay;
        info!("Manual shutdown requested, stopping in {}s", delay.as_secs());
        record.manual_shutdown_pending = true;
        self.schedule_manual_shutdown(delay);

        Ok(ShutdownRequestOutcome::Scheduled {
            delay_secs: delay.as_secs(),
        })
    }

    fn schedule_manual_shutdown(&self, delay: Duration) {
        let this = self.clone();
        self.inner
            .scheduler
            .schedule(TimerKind::ManualShutdown, delay, async move {
                this.run_manual_shutdown().await;
            });
    }

    async fn run_manual_shutdown(&self) {
        let (generation, server_id) = {
            let mut record = self.inner.record.lock().await;
            record.manual_shutdown_pending = false;
            match &record.phase {
                Phase::Draining => return,
                Phase::ShutdownRequested { .. } => {
                    debug!("Stop already in flight, manual shutdown absorbed");
                    return;
                }
                Phase::StartRequested(cycle) | Phase::StartupMonitoring { cycle, .. } => {
                    info!(
                        "Cancelling startup cycle {} for manual shutdown",
                        cycle.generation
                    );
                }
                Phase::Idle | Phase::StartupTimedOut => {}
            }

            self.inner.scheduler.cancel(TimerKind::StartupPoll);
            let generation = record.next_generation();
            record.phase = Phase::ShutdownRequested { generation };
            self.notify(Notification::broadcast(NotificationKind::ShuttingDown));
            (generation, record.config.server_id.clone())
        };

        self.finish_stop(generation, &server_id).await;
    }

    /// Swap in a new configuration.
    ///
    /// Restarts the emptiness check with the new interval, or stops it and
    /// clears the empty timer when auto-shutdown is now disabled. A running
    /// startup cycle keeps going and uses the new poll settings from its next
    /// poll on.
    pub async fn on_manual_reload_request(&self, config: PowerConfig) -> CoreResult<()> {
        config.validate()?;

        let mut record = self.inner.record.lock().await;
        if record.is_draining() {
            return Err(CoreError::draining());
        }

        if record.config.control_endpoint != config.control_endpoint
            || record.config.credentials != config.credentials
        {
            warn!("Control API endpoint or credentials changed; restart aw-server to apply them");
        }

        let enabled = config.auto_shutdown_enabled;
        let interval = config.empty_check_interval();
        record.config = config;

        if enabled {
            self.schedule_empty_checks(interval);
        } else {
            self.inner.scheduler.cancel(TimerKind::EmptyCheck);
            if record.empty_since.take().is_some() {
                self.notify(Notification::broadcast(NotificationKind::EmptyTimerCleared));
            }
        }

        info!(
            "Configuration reloaded (auto-shutdown {})",
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    /// Enter `Draining`: cancel every timer, turn in-flight completions into
    /// no-ops and release the control client. Idempotent.
    pub async fn on_teardown(&self) {
        let mut record = self.inner.record.lock().await;
        if record.is_draining() {
            debug!("Orchestrator already draining");
            return;
        }

        record.phase = Phase::Draining;
        record.connection_check = None;
        record.manual_shutdown_pending = false;
        self.inner.scheduler.close();
        self.inner.power.release();
        info!("Orchestrator drained");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn state(&self) -> LifecycleState {
        self.inner.record.lock().await.snapshot()
    }

    pub async fn countdown(&self) -> Countdown {
        self.inner.record.lock().await.countdown()
    }

    /// TCP check, full probe and control API status, run concurrently.
    ///
    /// Refused once draining, since it would touch the network.
    pub async fn status_report(&self) -> CoreResult<StatusReport> {
        let (state, countdown, target, server_id) = {
            let record = self.inner.record.lock().await;
            if record.is_draining() {
                return Err(CoreError::draining());
            }
            (
                record.snapshot(),
                record.countdown(),
                Target::of(&record.config),
                record.config.server_id.clone(),
            )
        };

        let (tcp_check, reachability, control_status) = tokio::join!(
            self.inner
                .probe
                .can_connect(&target.host, target.port, target.timeout),
            self.inner
                .probe
                .probe(&target.host, target.port, target.timeout),
            self.inner.power.query_status(&server_id),
        );

        Ok(StatusReport {
            state,
            target: target.to_string(),
            server_id,
            tcp_check,
            reachability,
            control_status,
            countdown,
        })
    }

    fn notify(&self, notification: Notification) {
        self.inner.sink.notify(notification);
    }

    fn notify_client(&self, kind: NotificationKind, client: ClientId) {
        self.notify(Notification::to_client(kind, client));
    }
}
