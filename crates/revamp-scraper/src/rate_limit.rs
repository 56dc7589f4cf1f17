//! Rolling-window ceiling on profile fetches.
//!
//! [`FetchBudget`] tracks the start time of recent fetches per remote host.
//! Once `limit` fetches fall inside the trailing `window`, further fetches to
//! that host are rejected with [`FetchError::BudgetExhausted`] until the
//! oldest one ages out. The budget never sleeps; callers decide whether to
//! wait for `retry_after_secs` or give up.
//!
//! Cache hits never consume budget.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::error::FetchError;

#[derive(Debug)]
pub struct FetchBudget {
    limit: usize,
    window: Duration,
    slots: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl FetchBudget {
    /// A `limit` of zero disables the ceiling.
    #[must_use]
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Claims one fetch slot for `host`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::BudgetExhausted`] naming `target` when `limit`
    /// fetches to `host` already fall inside the trailing window.
    pub fn try_acquire(&self, host: &str, target: &str) -> Result<(), FetchError> {
        self.try_acquire_at(host, target, Instant::now())
    }

    pub(crate) fn try_acquire_at(
        &self,
        host: &str,
        target: &str,
        now: Instant,
    ) -> Result<(), FetchError> {
        if self.limit == 0 {
            return Ok(());
        }

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let recent = slots.entry(host.to_owned()).or_default();
        while recent
            .front()
            .is_some_and(|&t| now.saturating_duration_since(t) >= self.window)
        {
            recent.pop_front();
        }

        if recent.len() >= self.limit {
            let oldest = recent.front().copied().unwrap_or(now);
            let wait = self
                .window
                .saturating_sub(now.saturating_duration_since(oldest));
            let retry_after_secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
            tracing::warn!(
                host,
                target,
                limit = self.limit,
                retry_after_secs,
                "profile fetch budget exhausted"
            );
            return Err(FetchError::BudgetExhausted {
                target: target.to_owned(),
                limit: self.limit,
                window_secs: self.window.as_secs(),
                retry_after_secs,
            });
        }

        recent.push_back(now);
        Ok(())
    }

    /// Number of fetches to `host` currently counted against the window.
    #[must_use]
    pub fn in_window(&self, host: &str) -> usize {
        self.in_window_at(host, Instant::now())
    }

    pub(crate) fn in_window_at(&self, host: &str, now: Instant) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(host).map_or(0, |recent| {
            recent
                .iter()
                .filter(|&&t| now.saturating_duration_since(t) < self.window)
                .count()
        })
    }
}
