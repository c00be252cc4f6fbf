//! Chart polling state machine — app-owned, crate-provided update logic.
//!
//! ```text
//!            issue                 commit(Ok)
//!   Idle ──────────────► Loading ─────────────► Idle
//!   Error ─────────────►         ─────────────► Error
//!                                 commit(Err)
//! ```
//!
//! Every issued fetch gets a [`FetchTicket`] carrying a sequence number and a
//! liveness flag. Issuing a new ticket, changing the query or tearing down
//! invalidates the previous flag, so only the most recently issued request
//! can commit. Ordering is by issuance, never by arrival.
//!
//! The controller does no I/O and never reads the clock: callers pass `now`.

use super::{window_bars, ChartQuery, ChartSnapshot, PollConfig};
use crate::domain::bar::{Bar, BarRequest};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Visible load status of the chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error(String),
}

/// Cooperative cancellation token for one issued fetch.
#[derive(Debug, Clone)]
pub struct LivenessFlag(Arc<AtomicBool>);

impl LivenessFlag {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn invalidate(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Handle for one issued bar fetch. Pass it back to
/// [`PollingController::commit`] with the result.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    request: BarRequest,
    liveness: LivenessFlag,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &BarRequest {
        &self.request
    }

    /// `false` once a newer request, a query change or teardown superseded it.
    pub fn is_live(&self) -> bool {
        self.liveness.is_live()
    }
}

#[derive(Debug)]
pub struct PollingController {
    query: ChartQuery,
    config: PollConfig,
    state: LoadState,
    bars: Vec<Bar>,
    last_seq: u64,
    in_flight: Option<(u64, LivenessFlag)>,
    generation: u64,
    torn_down: bool,
}

impl PollingController {
    pub fn new(query: ChartQuery, config: PollConfig) -> Self {
        Self {
            query,
            config,
            state: LoadState::Idle,
            bars: Vec::new(),
            last_seq: 0,
            in_flight: None,
            generation: 0,
            torn_down: false,
        }
    }

    /// Enter the initial mode: issue the first fetch for the current query.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<FetchTicket> {
        self.generation += 1;
        self.issue(now)
    }

    /// Replace the query. Any change cancels the pending fetch and issues a
    /// new one; an identical query is a no-op.
    pub fn set_query(&mut self, query: ChartQuery, now: DateTime<Utc>) -> Option<FetchTicket> {
        if query == self.query {
            return None;
        }
        self.query = query;
        self.generation += 1;
        self.issue(now)
    }

    /// Live-mode timer tick: re-run the same fetch. No-op otherwise.
    pub fn on_timer(&mut self, now: DateTime<Utc>) -> Option<FetchTicket> {
        self.poll_interval()?;
        self.issue(now)
    }

    fn cancel_in_flight(&mut self) {
        if let Some((seq, liveness)) = self.in_flight.take() {
            tracing::debug!(seq, "cancelling in-flight bar fetch");
            liveness.invalidate();
        }
    }

    fn issue(&mut self, now: DateTime<Utc>) -> Option<FetchTicket> {
        self.cancel_in_flight();
        if self.torn_down {
            return None;
        }

        let Some(request) = self.query.bar_request(now) else {
            tracing::debug!(
                symbol = %self.query.symbol,
                "historical chart has no range start; not fetching"
            );
            self.state = LoadState::Idle;
            return None;
        };

        self.last_seq += 1;
        let liveness = LivenessFlag::new();
        self.in_flight = Some((self.last_seq, liveness.clone()));
        self.state = LoadState::Loading;

        tracing::debug!(
            seq = self.last_seq,
            symbol = %request.symbol,
            timeframe = %request.timeframe,
            "issuing bar fetch"
        );

        Some(FetchTicket {
            seq: self.last_seq,
            request,
            liveness,
        })
    }

    /// Apply a fetch result. Returns `false` and leaves state untouched when
    /// the ticket was superseded or already committed.
    pub fn commit<E: Display>(&mut self, ticket: &FetchTicket, result: Result<Vec<Bar>, E>) -> bool {
        let is_current = matches!(&self.in_flight, Some((seq, _)) if *seq == ticket.seq);
        if !ticket.is_live() || !is_current {
            tracing::debug!(
                seq = ticket.seq,
                symbol = %ticket.request.symbol,
                "discarding stale bar response"
            );
            return false;
        }

        self.cancel_in_flight();
        match result {
            Ok(bars) => {
                self.bars = bars;
                self.state = LoadState::Idle;
            }
            Err(err) => {
                tracing::warn!(
                    seq = ticket.seq,
                    symbol = %ticket.request.symbol,
                    error = %err,
                    "bar fetch failed"
                );
                self.state = LoadState::Error(err.to_string());
            }
        }
        true
    }

    /// Stop polling and drop whatever is in flight.
    pub fn teardown(&mut self) {
        self.cancel_in_flight();
        self.torn_down = true;
    }

    /// The repeat interval, present only while live and not torn down.
    pub fn poll_interval(&self) -> Option<Duration> {
        (!self.torn_down && self.query.mode == super::ChartMode::Live).then_some(self.config.interval)
    }

    /// Bumped on every query change; lets timers notice they were reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn query(&self) -> &ChartQuery {
        &self.query
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn visible_bars(&self) -> &[Bar] {
        window_bars(&self.bars, self.query.mode, self.config.live_bar_limit)
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            query: self.query.clone(),
            state: self.state.clone(),
            bars: self.bars.clone(),
            live_bar_limit: self.config.live_bar_limit,
        }
    }
}
