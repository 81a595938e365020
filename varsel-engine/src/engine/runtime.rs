//! The evaluation actor: one task owning all engine state.
//!
//! Inbound events, the heartbeat scheduler and the auto-recovery scheduler
//! are three asynchronous triggers over one mutable state. They are
//! serialized by construction: a single task owns the state and multiplexes
//! all three through one `select!`, so no trigger can interleave with
//! another and timer re-arming is literally "disarm, mutate, re-arm" on
//! owned fields. Both timers are single-shot deadlines with manual re-arm;
//! the next heartbeat period is measured from completion of the previous
//! body, not from its deadline (drift-tolerant, not drift-free).
//!
//! Select priority is biased: inbound commands first, then recovery, then
//! heartbeat. An unhealthy event arriving together with a tick is folded in
//! before any report is built, and a recovery falling on the same instant
//! as a heartbeat resolves to the single OK recovery report.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, instrument, trace, warn};

use varsel_config::VarselConfig;
use varsel_core::events::{ClassifiedEvent, EventClass};
use varsel_core::history::{AlertHistory, AlertRecord};
use varsel_core::status::{reduce, Severity, Status, StatusReport};
use varsel_telemetry::MetricsRecorder;

use crate::engine::error::EngineError;
use crate::engine::report_sink::ReportSink;

const COMMAND_QUEUE_DEPTH: usize = 256;

/// Resolved engine parameters, immutable for the life of the instance.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Identity the reports are filed under at the monitoring endpoint.
    pub target: String,

    /// Heartbeat period between periodic status reports.
    pub message_interval: Duration,

    /// Quiet time after the last unhealthy event before the engine forces
    /// a return to healthy state. Also the lifetime of each alert record.
    pub auto_recovery_timeout: Duration,

    /// Whether error-level events escalate to critical.
    pub error_is_critical: bool,

    /// Severity reported when an interval passes without any event.
    pub no_event_severity: Severity,

    /// Optional override for the heartbeat message text.
    pub status_message: Option<String>,

    /// Upper bound on a single report delivery attempt.
    pub sink_timeout: Duration,
}

impl EngineConfig {
    /// Resolves the validated settings into engine parameters.
    pub fn from_settings(config: &VarselConfig) -> Result<Self, EngineError> {
        let no_event_severity = Severity::from_str(&config.reporting.no_event_severity)?;
        Ok(Self {
            target: config.target.identity.clone(),
            message_interval: Duration::from_secs(config.reporting.message_interval_secs),
            auto_recovery_timeout: Duration::from_secs(config.reporting.auto_recovery_secs),
            error_is_critical: config.reporting.error_is_critical,
            no_event_severity,
            status_message: config.reporting.status_message.clone(),
            sink_timeout: Duration::from_secs(config.reporting.sink_timeout_secs),
        })
    }
}

enum Command {
    Event(ClassifiedEvent),
    Shutdown,
}

enum Wakeup {
    Cmd(Option<Command>),
    Recovery,
    Heartbeat,
}

/// The evaluation actor. Owns the alert history, the recent-activity flag
/// and both scheduler deadlines; everything else talks to it through an
/// [`EngineHandle`].
pub struct StatusEngine {
    config: EngineConfig,
    sink: Arc<dyn ReportSink>,
    metrics: Arc<MetricsRecorder>,
    rx: mpsc::Receiver<Command>,
    history: AlertHistory,
    recent_ok_seen: bool,
    heartbeat_deadline: Option<Instant>,
    recovery_deadline: Option<Instant>,
    last_report: Arc<Mutex<Option<StatusReport>>>,
}

/// Cloneable-enough front for the actor: enqueue events, snapshot the last
/// report, shut down.
pub struct EngineHandle {
    tx: mpsc::Sender<Command>,
    last_report: Arc<Mutex<Option<StatusReport>>>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Enqueues one classified event for the actor.
    pub async fn handle_event(&self, event: ClassifiedEvent) -> Result<(), EngineError> {
        self.tx
            .send(Command::Event(event))
            .await
            .map_err(|_| EngineError::ChannelClosed)
    }

    /// Snapshot of the most recently dispatched report.
    pub fn last_report(&self) -> Option<StatusReport> {
        self.last_report.lock().clone()
    }

    /// Stops the actor. Both deadlines are disarmed before the task
    /// returns, so no timer can fire after teardown begins.
    pub async fn shutdown(self) -> Result<(), EngineError> {
        let _ = self.tx.send(Command::Shutdown).await;
        self.task.await.map_err(EngineError::from)
    }
}

impl StatusEngine {
    /// Spawns the actor. One OK report announcing startup is dispatched
    /// before the first heartbeat is armed.
    pub fn spawn(
        config: EngineConfig,
        sink: Arc<dyn ReportSink>,
        metrics: Arc<MetricsRecorder>,
    ) -> EngineHandle {
        let (tx, rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let last_report = Arc::new(Mutex::new(None));

        let engine = StatusEngine {
            config,
            sink,
            metrics,
            rx,
            history: AlertHistory::new(),
            recent_ok_seen: false,
            heartbeat_deadline: None,
            recovery_deadline: None,
            last_report: Arc::clone(&last_report),
        };

        let task = tokio::spawn(engine.run());

        EngineHandle {
            tx,
            last_report,
            task,
        }
    }

    #[instrument(skip_all, fields(target = %self.config.target))]
    async fn run(mut self) {
        info!(
            interval_secs = self.config.message_interval.as_secs(),
            recovery_secs = self.config.auto_recovery_timeout.as_secs(),
            "Status engine started"
        );

        let startup_message = self
            .config
            .status_message
            .clone()
            .unwrap_or_else(|| "status reporting started".to_string());
        self.dispatch(Status {
            severity: Severity::Ok,
            message: startup_message,
        })
        .await;
        self.heartbeat_deadline = Some(Instant::now() + self.config.message_interval);

        loop {
            let heartbeat = self.heartbeat_deadline;
            let recovery = self.recovery_deadline;

            let wakeup = tokio::select! {
                biased;
                cmd = self.rx.recv() => Wakeup::Cmd(cmd),
                _ = Self::deadline_elapsed(recovery) => Wakeup::Recovery,
                _ = Self::deadline_elapsed(heartbeat) => Wakeup::Heartbeat,
            };

            match wakeup {
                Wakeup::Cmd(Some(Command::Event(event))) => self.event_apply(event).await,
                Wakeup::Cmd(Some(Command::Shutdown)) | Wakeup::Cmd(None) => break,
                Wakeup::Recovery => self.recovery_fire().await,
                Wakeup::Heartbeat => self.heartbeat_fire().await,
            }
        }

        // Disarm both schedulers before teardown completes.
        self.heartbeat_deadline = None;
        self.recovery_deadline = None;
        info!("Status engine stopped");
    }

    async fn deadline_elapsed(deadline: Option<Instant>) {
        match deadline {
            Some(at) => time::sleep_until(at).await,
            None => std::future::pending().await,
        }
    }

    #[instrument(skip_all, level = "debug")]
    async fn event_apply(&mut self, event: ClassifiedEvent) {
        self.metrics.ingested_events.inc();

        match event.class {
            EventClass::Ok => {
                trace!("Healthy event, flagging activity");
                self.recent_ok_seen = true;
            }
            EventClass::Nok(level) => {
                // Disarm the heartbeat so a due tick cannot interleave
                // with this update.
                self.heartbeat_deadline = None;
                self.recent_ok_seen = false;

                let severity = level.severity(self.config.error_is_critical);
                let now = Instant::now();
                let expires_at = now + self.config.auto_recovery_timeout;
                debug!(%severity, message = %event.message, "Unhealthy event, recording alert");
                self.history
                    .record_push(AlertRecord::new(expires_at, severity, event.message));

                self.history.purge_expired(now);
                let status = self.evaluate();
                self.dispatch(status).await;

                // Cancel-and-restart: a new unhealthy event pushes the
                // recovery deadline forward.
                self.recovery_deadline = Some(expires_at);
                self.heartbeat_deadline = Some(Instant::now() + self.config.message_interval);
            }
        }
    }

    #[instrument(skip_all, level = "debug")]
    async fn heartbeat_fire(&mut self) {
        self.heartbeat_deadline = None;

        self.history.purge_expired(Instant::now());
        let status = self.evaluate();
        self.dispatch(status).await;
        self.recent_ok_seen = false;

        // Next period measured from completion, not the previous deadline.
        self.heartbeat_deadline = Some(Instant::now() + self.config.message_interval);
    }

    #[instrument(skip_all)]
    async fn recovery_fire(&mut self) {
        self.recovery_deadline = None;

        info!("Auto-recovery timeout elapsed, clearing alert state");
        self.history.clear();
        let message = format!(
            "no further bad events within {} seconds, back to healthy",
            self.config.auto_recovery_timeout.as_secs()
        );
        self.dispatch(Status {
            severity: Severity::Ok,
            message,
        })
        .await;

        // The recovery report replaces this cycle's heartbeat report.
        self.heartbeat_deadline = Some(Instant::now() + self.config.message_interval);
    }

    fn evaluate(&self) -> Status {
        reduce(
            &self.history,
            self.recent_ok_seen,
            self.config.no_event_severity,
            self.config.message_interval,
            self.config.status_message.as_deref(),
        )
    }

    /// Delivers one report through the sink under the configured timeout.
    ///
    /// Delivery failures never reach timer scheduling or alert state; a
    /// missed report is covered by the next heartbeat.
    async fn dispatch(&mut self, status: Status) {
        let report = StatusReport {
            severity: status.severity,
            target: self.config.target.clone(),
            message: status.message,
        };
        debug!(severity = %report.severity, message = %report.message, "Dispatching status report");

        let started = std::time::Instant::now();
        match time::timeout(self.config.sink_timeout, self.sink.send(&report)).await {
            Ok(Ok(())) => {
                self.metrics.reports_sent.inc();
            }
            Ok(Err(e)) => {
                warn!("Report delivery failed: {e}");
                self.metrics.sink_failures.inc();
            }
            Err(_) => {
                warn!(
                    "Report delivery timed out after {} seconds",
                    self.config.sink_timeout.as_secs()
                );
                self.metrics.sink_failures.inc();
            }
        }
        self.metrics
            .dispatch_latency
            .observe(started.elapsed().as_nanos() as f64);

        *self.last_report.lock() = Some(report);
    }
}
