//! Synchronous polling session state.
//!
//! A `Session` knows nothing about timers or async execution. The
//! accumulator asks it for a ticket before each execution and hands the
//! result back with the same ticket; a ticket from an older generation is
//! dropped on the floor.

use chrono::{DateTime, Utc};
use nt_graph::{build_graph, FlowGraph, Row};
use nt_query::{build_query, params_fingerprint, AccountId, QueryError, QueryParams};
use serde::Serialize;

use crate::error::PollResult;
use crate::snapshot::GraphSnapshot;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PollPhase {
    /// Never configured with a usable account.
    Idle,
    /// Configured and accepting polls.
    Armed,
    /// One execution is outstanding.
    Fetching,
    /// Stopped by the consumer; the last graph is kept.
    Disarmed,
}

impl PollPhase {
    pub fn is_running(self) -> bool {
        matches!(self, PollPhase::Armed | PollPhase::Fetching)
    }
}

/// How a new parameter set relates to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamChange {
    Unchanged,
    /// Display-only fields differ.
    Cosmetic,
    /// Same query, different poll interval.
    Schedule,
    /// The executed query or the account differs.
    Query,
}

impl ParamChange {
    /// Whether the timer has to be re-armed.
    pub fn rearms(self) -> bool {
        matches!(self, ParamChange::Schedule | ParamChange::Query)
    }
}

/// Permission to run one execution, tied to the generation that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTicket {
    generation: u64,
    account_id: AccountId,
    query: String,
}

impl PollTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What happened to one execution's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollOutcome {
    /// Rows were folded into the graph.
    Updated,
    /// The query returned nothing; the graph is untouched.
    Empty,
    /// The execution failed; the graph is untouched.
    Failed,
    /// The session moved on while the execution was outstanding.
    Stale,
    /// No ticket was issued (not armed, or an execution is outstanding).
    Skipped,
}

#[derive(Debug, Clone)]
struct ActiveQuery {
    params: QueryParams,
    account_id: AccountId,
    fingerprint: String,
    query: String,
}

impl ActiveQuery {
    fn new(params: QueryParams) -> PollResult<Self> {
        let account_id = params.validate()?;
        Ok(Self {
            account_id,
            fingerprint: params_fingerprint(&params),
            query: build_query(&params),
            params,
        })
    }

    fn classify(&self, next: &ActiveQuery) -> ParamChange {
        if self.fingerprint != next.fingerprint {
            ParamChange::Query
        } else if self.params.interval_seconds != next.params.interval_seconds {
            ParamChange::Schedule
        } else if self.params != next.params {
            ParamChange::Cosmetic
        } else {
            ParamChange::Unchanged
        }
    }
}

/// One polling session: parameters, accumulated graph and bookkeeping.
#[derive(Debug)]
pub struct Session {
    active: Option<ActiveQuery>,
    graph: FlowGraph,
    phase: PollPhase,
    generation: u64,
    pending_reset: bool,
    in_flight: Option<u64>,
    is_loading: bool,
    polls_completed: u64,
    last_updated: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            active: None,
            graph: FlowGraph::new(),
            phase: PollPhase::Idle,
            generation: 0,
            pending_reset: false,
            in_flight: None,
            is_loading: false,
            polls_completed: 0,
            last_updated: None,
        }
    }

    /// Install a parameter set.
    ///
    /// A query-affecting change clears the graph, invalidates any outstanding
    /// execution and makes the next successful poll rebuild from scratch. A
    /// schedule change lets an outstanding execution land normally. Invalid
    /// parameters leave the session exactly as it was.
    pub fn configure(&mut self, params: QueryParams) -> PollResult<ParamChange> {
        let next = ActiveQuery::new(params)?;
        let change = match &self.active {
            Some(current) => current.classify(&next),
            None => ParamChange::Query,
        };

        if change == ParamChange::Query {
            self.graph.clear();
            self.pending_reset = true;
            self.is_loading = self.phase != PollPhase::Disarmed;
            self.polls_completed = 0;
            self.last_updated = None;
            self.invalidate();
            if self.phase == PollPhase::Fetching {
                self.phase = PollPhase::Armed;
            }
        }

        tracing::debug!(?change, generation = self.generation, "parameters configured");
        self.active = Some(next);
        Ok(change)
    }

    /// Start accepting polls. Returns false when nothing is configured.
    pub fn arm(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.phase.is_running() {
            self.phase = PollPhase::Armed;
        }
        true
    }

    /// Stop accepting polls. The graph is kept; any outstanding result will
    /// be discarded.
    pub fn disarm(&mut self) {
        if self.phase == PollPhase::Idle {
            return;
        }
        self.invalidate();
        self.phase = PollPhase::Disarmed;
    }

    /// Drop the graph and rebuild from scratch on the next good poll.
    pub fn reset(&mut self) {
        self.invalidate();
        self.graph.clear();
        self.pending_reset = true;
        self.is_loading = self.phase.is_running();
        self.polls_completed = 0;
        self.last_updated = None;
        if self.phase == PollPhase::Fetching {
            self.phase = PollPhase::Armed;
        }
    }

    /// Request a ticket for one execution.
    ///
    /// Refused unless armed, which also keeps executions from overlapping.
    pub fn begin_poll(&mut self) -> Option<PollTicket> {
        if self.phase != PollPhase::Armed {
            return None;
        }
        let active = self.active.as_ref()?;

        self.phase = PollPhase::Fetching;
        self.in_flight = Some(self.generation);
        Some(PollTicket {
            generation: self.generation,
            account_id: active.account_id,
            query: active.query.clone(),
        })
    }

    /// Hand back the result of the execution `ticket` allowed.
    pub fn complete_poll(
        &mut self,
        ticket: &PollTicket,
        result: Result<Vec<Row>, QueryError>,
    ) -> PollOutcome {
        if ticket.generation != self.generation || self.in_flight != Some(ticket.generation) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale poll result"
            );
            return PollOutcome::Stale;
        }

        self.in_flight = None;
        if self.phase == PollPhase::Fetching {
            self.phase = PollPhase::Armed;
        }

        let rows = match result {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, generation = self.generation, "poll failed, keeping last graph");
                return PollOutcome::Failed;
            }
        };

        if rows.is_empty() {
            tracing::debug!(generation = self.generation, "poll returned no rows");
            self.is_loading = false;
            return PollOutcome::Empty;
        }

        let prior = std::mem::take(&mut self.graph);
        self.graph = build_graph(&rows, prior, self.pending_reset);
        self.pending_reset = false;
        self.is_loading = false;
        self.polls_completed += 1;
        self.last_updated = Some(Utc::now());

        tracing::debug!(
            rows = rows.len(),
            nodes = self.graph.nodes().len(),
            edges = self.graph.edges().len(),
            "poll merged"
        );
        PollOutcome::Updated
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn params(&self) -> Option<&QueryParams> {
        self.active.as_ref().map(|a| &a.params)
    }

    /// The query text polls currently execute.
    pub fn query(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.query.as_str())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn polls_completed(&self) -> u64 {
        self.polls_completed
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        let params = self.params();
        GraphSnapshot {
            nodes: self.graph.nodes().to_vec(),
            edges: self.graph.edges().to_vec(),
            is_loading: self.is_loading,
            phase: self.phase,
            generation: self.generation,
            polls_completed: self.polls_completed,
            last_updated: self.last_updated,
            attribute: params.map(|p| p.attribute).unwrap_or_default(),
            hide_labels: params.is_some_and(|p| p.hide_labels),
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = None;
    }
}
