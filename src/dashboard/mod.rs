//! Owned state containers, one per dashboard context.
//!
//! ```text
//! selection event ──► context.set_*() ──► project() ──► summarize() ──► renderer
//!                                            ▲
//! refresh trigger ──► begin_refresh() ─ latency ─► complete_refresh() (swap snapshot)
//! ```
//!
//! Each context owns its collections outright. Every mutation goes through a
//! method on the owner; nothing is shared or global. A refresh is a two-step
//! round trip: `begin_refresh` marks the context as refreshing and hands out a
//! ticket, `complete_refresh` installs the new snapshot and clears the flag.

pub mod analytics;
pub mod home;
pub mod reports;
pub mod teams;

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

use crate::logging::{log_audit, log_digest_failure, log_refresh_completed, log_refresh_started};
use crate::refresh::{refresh, refresh_after, snapshot_digest, Perturb};

pub use analytics::{AnalyticsDashboard, AnalyticsOverview, FeedRow, TrendSeries, Window};
pub use home::{HomeDashboard, RevenuePanel};
pub use reports::ReportsDashboard;
pub use teams::{TeamsDashboard, TeamsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshError {
    /// A refresh is outstanding; the trigger should have been disabled.
    AlreadyRefreshing { outstanding: u64 },
    /// Completion presented a ticket that is not the outstanding one.
    StaleTicket { outstanding: Option<u64>, presented: u64 },
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshError::AlreadyRefreshing { outstanding } => {
                write!(f, "refresh {} is still outstanding", outstanding)
            }
            RefreshError::StaleTicket { outstanding: Some(o), presented } => {
                write!(f, "ticket {} does not match outstanding refresh {}", presented, o)
            }
            RefreshError::StaleTicket { outstanding: None, presented } => {
                write!(f, "ticket {} presented with no refresh outstanding", presented)
            }
        }
    }
}

impl std::error::Error for RefreshError {}

/// Proof that a refresh was started. Consumed on completion.
#[derive(Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    id: u64,
}

impl RefreshTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, Copy)]
enum RefreshState {
    Idle,
    Refreshing { ticket: u64, started: Instant },
}

/// A snapshot plus its refresh lifecycle.
#[derive(Debug, Clone)]
pub struct LiveDataset<T> {
    context: &'static str,
    current: T,
    state: RefreshState,
    next_ticket: u64,
}

impl<T> LiveDataset<T>
where
    T: Perturb + Serialize,
{
    pub fn new(context: &'static str, initial: T) -> Self {
        Self { context, current: initial, state: RefreshState::Idle, next_ticket: 1 }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self.state, RefreshState::Refreshing { .. })
    }

    pub fn begin_refresh(&mut self) -> Result<RefreshTicket, RefreshError> {
        if let RefreshState::Refreshing { ticket, .. } = self.state {
            return Err(RefreshError::AlreadyRefreshing { outstanding: ticket });
        }
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.state = RefreshState::Refreshing { ticket: id, started: Instant::now() };
        log_refresh_started(self.context, id);
        Ok(RefreshTicket { id })
    }

    /// Swap in `snapshot` and leave the refreshing state.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, snapshot: T) -> Result<(), RefreshError> {
        let started = match self.state {
            RefreshState::Refreshing { ticket: outstanding, started } if outstanding == ticket.id => started,
            RefreshState::Refreshing { ticket: outstanding, .. } => {
                return Err(RefreshError::StaleTicket { outstanding: Some(outstanding), presented: ticket.id })
            }
            RefreshState::Idle => return Err(RefreshError::StaleTicket { outstanding: None, presented: ticket.id }),
        };
        let before = snapshot_digest(&self.current);
        self.current = snapshot;
        self.state = RefreshState::Idle;
        match (before, snapshot_digest(&self.current)) {
            (Ok(before), Ok(after)) => log_audit(self.context, &before, &after),
            (Err(err), _) | (_, Err(err)) => log_digest_failure(self.context, &err.to_string()),
        }
        log_refresh_completed(self.context, ticket.id, started.elapsed().as_secs_f64() * 1000.0);
        Ok(())
    }

    /// Start and finish a refresh with no latency.
    pub fn refresh_now<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RefreshError> {
        let ticket = self.begin_refresh()?;
        let next = refresh(&self.current, rng);
        self.complete_refresh(ticket, next)
    }

    /// Full round trip with the simulated latency. Once started it always
    /// completes; there is no abort path.
    pub async fn refresh_with_latency<R: Rng + ?Sized>(&mut self, latency: Duration, rng: &mut R) -> Result<(), RefreshError> {
        let ticket = self.begin_refresh()?;
        let next = refresh_after(latency, &self.current, rng).await;
        self.complete_refresh(ticket, next)
    }
}
