//! Timer-driven accumulation of query results into a flow graph.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use nt_query::QueryParams;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::PollResult;
use crate::executor::QueryExecutor;
use crate::session::{ParamChange, PollOutcome, PollPhase, Session};
use crate::snapshot::GraphSnapshot;

struct Shared<E> {
    executor: E,
    session: Mutex<Session>,
    snapshots: watch::Sender<GraphSnapshot>,
}

impl<E: QueryExecutor> Shared<E> {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self) {
        let snapshot = self.session().snapshot();
        self.snapshots.send_replace(snapshot);
    }

    async fn poll_once(&self) -> PollOutcome {
        let Some(ticket) = self.session().begin_poll() else {
            tracing::debug!("poll skipped");
            return PollOutcome::Skipped;
        };
        self.publish();

        tracing::debug!(generation = ticket.generation(), "executing poll");
        let result = self
            .executor
            .execute(ticket.account_id(), ticket.query())
            .await;

        let outcome = self.session().complete_poll(&ticket, result);
        if outcome != PollOutcome::Stale {
            self.publish();
        }
        outcome
    }
}

struct PollTimer {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns one polling session and the timer that feeds it.
///
/// Must be used from within a tokio runtime. Dropping the accumulator tears
/// the timer down.
pub struct Accumulator<E: QueryExecutor> {
    shared: Arc<Shared<E>>,
    timer: Option<PollTimer>,
}

impl<E: QueryExecutor> Accumulator<E> {
    pub fn new(executor: E) -> Self {
        let (snapshots, _) = watch::channel(GraphSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                executor,
                session: Mutex::new(Session::new()),
                snapshots,
            }),
            timer: None,
        }
    }

    /// Configure and arm. Polls once immediately, then every
    /// `interval_seconds` (never again when the interval is 0). Starting
    /// again with unchanged parameters keeps the running timer.
    ///
    /// Invalid parameters (including a missing account) leave the
    /// accumulator untouched.
    pub fn start(&mut self, params: QueryParams) -> PollResult<ParamChange> {
        let interval_seconds = params.interval_seconds;
        let change = {
            let mut session = self.shared.session();
            let change = session.configure(params)?;
            session.arm();
            change
        };

        self.shared.publish();
        if change == ParamChange::Unchanged && self.timer_running() {
            tracing::debug!("already polling with these parameters");
            return Ok(change);
        }

        tracing::info!(?change, interval_seconds, "polling armed");
        self.arm_timer(interval_seconds);
        Ok(change)
    }

    /// Apply new parameters.
    ///
    /// Query-affecting changes reset the graph; query and interval changes
    /// re-arm the timer if polling is running. Before the first `start` this
    /// behaves like `start`.
    pub fn update_params(&mut self, params: QueryParams) -> PollResult<ParamChange> {
        if self.phase() == PollPhase::Idle {
            return self.start(params);
        }

        let interval_seconds = params.interval_seconds;
        let (change, running) = {
            let mut session = self.shared.session();
            let change = session.configure(params)?;
            (change, session.phase().is_running())
        };

        self.shared.publish();
        if change.rearms() && running {
            tracing::info!(?change, interval_seconds, "re-arming poll timer");
            self.arm_timer(interval_seconds);
        }
        Ok(change)
    }

    /// Stop polling. The last graph stays available; a result still in
    /// flight is discarded when it lands.
    pub fn stop(&mut self) {
        self.cancel_timer();
        self.shared.session().disarm();
        self.shared.publish();
        tracing::info!("polling stopped");
    }

    /// Clear the graph without changing parameters or the timer.
    pub fn reset(&self) {
        self.shared.session().reset();
        self.shared.publish();
    }

    /// Run one execution now, outside the timer.
    pub async fn poll(&self) -> PollOutcome {
        self.shared.poll_once().await
    }

    pub fn subscribe(&self) -> watch::Receiver<GraphSnapshot> {
        self.shared.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    pub fn phase(&self) -> PollPhase {
        self.shared.session().phase()
    }

    pub fn params(&self) -> Option<QueryParams> {
        self.shared.session().params().cloned()
    }

    pub fn executor(&self) -> &E {
        &self.shared.executor
    }

    fn arm_timer(&mut self, interval_seconds: u32) {
        self.cancel_timer();

        let shared = Arc::clone(&self.shared);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            if interval_seconds == 0 {
                if !token.is_cancelled() {
                    let outcome = shared.poll_once().await;
                    tracing::debug!(?outcome, "single poll finished");
                }
                return;
            }

            let period = Duration::from_secs(u64::from(interval_seconds));
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                let outcome = shared.poll_once().await;
                tracing::trace!(?outcome, "poll cycle finished");
            }
        });

        self.timer = Some(PollTimer { cancel, task });
    }

    fn timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.task.is_finished())
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel.cancel();
        }
    }
}

impl<E: QueryExecutor> Drop for Accumulator<E> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel.cancel();
            timer.task.abort();
        }
    }
}
