// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Brew Accrual Engine

//! Time-based accrual of BEANS while a brew is running.
//!
//! Accrual is recomputed lazily from elapsed wall-clock time, so the outcome
//! depends only on how long the session was active, never on how often the
//! host happened to call [`AccrualSession::tick`]. Elapsed time is kept as an
//! integer millisecond count at the current rate and converted to BEANS on
//! read, which keeps any split of the same interval bit-for-bit identical.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CafeError, Result};
use crate::types::{BrewStatus, Timestamp, MS_PER_HOUR};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualSession {
    active: bool,
    rate_per_hour: f64,
    /// Accrual carried over from an earlier rate.
    carried: f64,
    /// Active milliseconds at `rate_per_hour` not yet collected.
    pending_ms: u64,
    last_update: Option<Timestamp>,
    /// Lifetime amount handed out by `collect`.
    collected_total: f64,
}

impl AccrualSession {
    pub fn new(rate_per_hour: f64) -> Self {
        Self {
            active: false,
            rate_per_hour: sanitize_rate(rate_per_hour),
            carried: 0.0,
            pending_ms: 0,
            last_update: None,
            collected_total: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> BrewStatus {
        if self.active { BrewStatus::Brewing } else { BrewStatus::Idle }
    }

    pub fn rate_per_hour(&self) -> f64 {
        self.rate_per_hour
    }

    pub fn last_update(&self) -> Option<Timestamp> {
        self.last_update
    }

    /// BEANS owed as of the last tick.
    pub fn accumulated(&self) -> f64 {
        self.carried + self.rate_per_hour * self.pending_ms as f64 / MS_PER_HOUR as f64
    }

    /// Everything ever brewed: collected plus still in the cup.
    pub fn total_brewed(&self) -> f64 {
        self.collected_total + self.accumulated()
    }

    /// Change the rate. Only allowed while idle; pending accrual is frozen at
    /// the old rate first.
    pub fn set_rate(&mut self, rate_per_hour: f64) -> Result<()> {
        if self.active {
            return Err(CafeError::AlreadyActive);
        }
        if !rate_per_hour.is_finite() || rate_per_hour < 0.0 {
            return Err(CafeError::InvalidAmount(rate_per_hour));
        }
        self.carried = self.accumulated();
        self.pending_ms = 0;
        self.rate_per_hour = rate_per_hour;
        Ok(())
    }

    pub fn start(&mut self, now: Timestamp) -> Result<()> {
        if self.active {
            return Err(CafeError::AlreadyActive);
        }
        self.active = true;
        self.last_update = Some(now);
        info!(rate = self.rate_per_hour, at = now.as_millis(), "brew started");
        Ok(())
    }

    /// Flush accrual up to `now` and return the current accumulated amount.
    ///
    /// A clock that moved backwards accrues nothing and leaves the baseline
    /// where it was, so the regressed span is not counted twice later.
    pub fn tick(&mut self, now: Timestamp) -> f64 {
        if !self.active {
            return self.accumulated();
        }
        if let Some(last) = self.last_update {
            let elapsed = now.saturating_since(last);
            self.pending_ms = self.pending_ms.saturating_add(elapsed);
            self.last_update = Some(last.max(now));
            debug!(elapsed_ms = elapsed, accumulated = self.accumulated(), "brew tick");
        }
        self.accumulated()
    }

    /// Flush, then hand out everything accumulated. Returns 0 when the cup is
    /// empty; the caller decides whether that deserves a message.
    pub fn collect(&mut self, now: Timestamp) -> f64 {
        self.tick(now);
        let collected = self.accumulated();
        if collected <= 0.0 {
            return 0.0;
        }
        self.carried = 0.0;
        self.pending_ms = 0;
        self.collected_total += collected;
        info!(collected, "brew collected");
        collected
    }

    pub fn stop(&mut self, now: Timestamp) {
        self.tick(now);
        self.active = false;
        self.last_update = None;
        info!(accumulated = self.accumulated(), "brew stopped");
    }

    /// Height of the liquid in the brew cup, in percent.
    pub fn fill_percent(&self) -> f64 {
        const MAX_HEIGHT: f64 = 80.0;
        const MIN_HEIGHT: f64 = 10.0;
        const FULL_AT: f64 = 100.0;

        let accumulated = self.accumulated();
        if accumulated <= 0.0 {
            return 0.0;
        }
        let ratio = (accumulated / FULL_AT).min(1.0);
        (ratio * MAX_HEIGHT).max(MIN_HEIGHT)
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate >= 0.0 { rate } else { 0.0 }
}
