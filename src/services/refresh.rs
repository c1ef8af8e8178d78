//! Refresh cycle
//!
//! A refresh loads budgets, categories and income settings from the budget
//! store, then runs the allocation calculator and the savings tracker
//! concurrently against the ledger. Each refresh takes a token from a
//! monotonically increasing counter; a result is published only while its
//! token is the newest one issued, so a slow refresh can never overwrite the
//! output of a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDateTime;

use crate::error::BudgetlineResult;
use crate::services::allocation::{self, AllocationSummary};
use crate::services::clock::Clock;
use crate::services::savings::{self, SavingsSummary};
use crate::storage::{BudgetStore, Ledger};

/// Derived figures from one completed refresh
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub token: u64,
    /// The instant every period in this snapshot was resolved against
    pub computed_at: NaiveDateTime,
    pub allocation: AllocationSummary,
    pub savings: SavingsSummary,
}

#[derive(Debug)]
pub enum RefreshOutcome {
    Applied(Arc<Snapshot>),
    /// A newer refresh was started before this one finished
    Superseded,
}

#[derive(Default)]
struct RefreshState {
    snapshot: Option<Arc<Snapshot>>,
    last_error: Option<String>,
}

pub struct RefreshEngine {
    store: Arc<dyn BudgetStore>,
    ledger: Arc<dyn Ledger>,
    clock: Arc<dyn Clock>,
    issued: AtomicU64,
    state: RwLock<RefreshState>,
}

impl RefreshEngine {
    pub fn new(store: Arc<dyn BudgetStore>, ledger: Arc<dyn Ledger>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            ledger,
            clock,
            issued: AtomicU64::new(0),
            state: RwLock::new(RefreshState::default()),
        }
    }

    /// The last published snapshot, if any refresh has succeeded
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    /// Message of the most recent failed refresh, cleared by the next success
    pub fn last_error(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_error
            .clone()
    }

    fn is_current(&self, token: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == token
    }

    /// Recompute every derived figure and publish the result if still current
    ///
    /// # Errors
    ///
    /// Returns the first collaborator failure. The previous snapshot stays
    /// in place.
    pub async fn refresh(&self) -> BudgetlineResult<RefreshOutcome> {
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let now = self.clock.now();
        log::debug!("refresh #{} started at {}", token, now);

        match self.compute(token, now).await {
            Ok(snapshot) => Ok(self.publish(snapshot)),
            Err(err) => {
                if self.is_current(token) {
                    log::warn!("refresh #{} failed: {}", token, err);
                    let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                    state.last_error = Some(err.to_string());
                } else {
                    log::warn!("superseded refresh #{} failed: {}", token, err);
                }
                Err(err)
            }
        }
    }

    async fn compute(&self, token: u64, now: NaiveDateTime) -> BudgetlineResult<Snapshot> {
        let (budgets, categories, income_settings) = tokio::try_join!(
            self.store.load_budgets(),
            self.store.load_categories(),
            self.store.load_income_settings()
        )?;

        let ledger = self.ledger.as_ref();
        let (allocation, savings) = tokio::try_join!(
            allocation::calculate(ledger, &budgets, &categories, &income_settings, now),
            savings::track(ledger, &income_settings, now)
        )?;

        Ok(Snapshot {
            token,
            computed_at: now,
            allocation,
            savings,
        })
    }

    fn publish(&self, snapshot: Snapshot) -> RefreshOutcome {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        // checked under the lock so two finishing refreshes cannot interleave
        if !self.is_current(snapshot.token) {
            log::warn!("discarding stale refresh #{}", snapshot.token);
            return RefreshOutcome::Superseded;
        }

        log::info!(
            "applied refresh #{}: {} budgets, {} spent",
            snapshot.token,
            snapshot.allocation.budgets.len(),
            snapshot.allocation.total_spent
        );
        let snapshot = Arc::new(snapshot);
        state.snapshot = Some(Arc::clone(&snapshot));
        state.last_error = None;
        RefreshOutcome::Applied(snapshot)
    }
}
