//! Async driver around [`PollingController`].
//!
//! The controller decides *what* to fetch and *whether* a result may land;
//! the session performs the fetch through a [`BarSource`] and commits the
//! outcome. The lock is never held across a fetch, so a query change made
//! while a request is outstanding supersedes it.

use super::state::{FetchTicket, PollingController};
use super::{ChartGeometry, ChartLayout, ChartQuery, ChartSnapshot, PollConfig};
use crate::domain::bar::{Bar, BarRequest};
use crate::error::MarketError;

use async_lock::RwLock;
use chrono::Utc;
use futures_util::Stream;
use std::future::Future;
use std::sync::Arc;

/// Where a chart session gets its bars from.
pub trait BarSource: Send + Sync {
    fn fetch_bars(
        &self,
        request: &BarRequest,
    ) -> impl Future<Output = Result<Vec<Bar>, MarketError>> + Send;
}

/// One chart panel: a query, its polling state and a bar source.
pub struct ChartSession<S> {
    source: Arc<S>,
    controller: Arc<RwLock<PollingController>>,
}

impl<S: BarSource> ChartSession<S> {
    /// Create an idle session. Nothing is fetched until [`start`](Self::start).
    pub fn new(source: S, query: ChartQuery, config: PollConfig) -> Self {
        Self {
            source: Arc::new(source),
            controller: Arc::new(RwLock::new(PollingController::new(query, config))),
        }
    }

    /// Issue the initial fetch. Returns `true` if its result was committed.
    pub async fn start(&self) -> bool {
        let ticket = self.controller.write().await.start(Utc::now());
        self.run(ticket).await
    }

    /// Change the chart parameters and fetch for them.
    ///
    /// Returns `false` when the query was unchanged, no fetch was needed, or a
    /// later change superseded this one before it landed.
    pub async fn update_query(&self, query: ChartQuery) -> bool {
        let ticket = self.controller.write().await.set_query(query, Utc::now());
        self.run(ticket).await
    }

    /// Live-timer tick. No-op outside live mode.
    pub async fn refresh(&self) -> bool {
        let ticket = self.controller.write().await.on_timer(Utc::now());
        self.run(ticket).await
    }

    async fn run(&self, ticket: Option<FetchTicket>) -> bool {
        let Some(ticket) = ticket else {
            return false;
        };
        let result = self.source.fetch_bars(ticket.request()).await;
        self.controller.write().await.commit(&ticket, result)
    }

    /// Snapshots produced by the live timer.
    ///
    /// Waits one poll interval, then refreshes and yields when the chart is
    /// live. A query change during the wait restarts it. Historical charts
    /// keep the stream open without fetching. Ends after [`teardown`](Self::teardown).
    pub fn live_updates(&self) -> impl Stream<Item = ChartSnapshot> + '_ {
        async_stream::stream! {
            loop {
                let (interval, generation) = {
                    let ctl = self.controller.read().await;
                    if ctl.is_torn_down() {
                        break;
                    }
                    (ctl.config().interval, ctl.generation())
                };

                futures_timer::Delay::new(interval).await;

                let ticket = {
                    let mut ctl = self.controller.write().await;
                    if ctl.is_torn_down() {
                        break;
                    }
                    if ctl.generation() != generation {
                        continue;
                    }
                    ctl.on_timer(Utc::now())
                };

                if ticket.is_some() {
                    self.run(ticket).await;
                    yield self.snapshot().await;
                }
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Stop the timer and cancel whatever is in flight.
    pub async fn teardown(&self) {
        self.controller.write().await.teardown();
    }

    pub async fn snapshot(&self) -> ChartSnapshot {
        self.controller.read().await.snapshot()
    }

    pub async fn geometry(&self, layout: &ChartLayout) -> ChartGeometry {
        self.snapshot().await.geometry(layout)
    }
}

impl<S> Clone for ChartSession<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            controller: self.controller.clone(),
        }
    }
}
