// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Configuration

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::adapter::try_to_decimal;
use crate::error::{CafeError, Result};
use crate::feed::DEFAULT_FEED_CAPACITY;

/// One entry of the quest catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestSpec {
    pub id: u32,
    pub title: String,
    /// BEANS credited on claim.
    pub reward: f64,
}

impl QuestSpec {
    pub fn new(id: u32, title: &str, reward: f64) -> Self {
        Self { id, title: title.to_string(), reward }
    }
}

/// Every tunable constant of the demo. Missing JSON fields fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CafeConfig {
    pub wallet_address: String,
    pub initial_lady: f64,
    pub initial_beans: f64,

    // Brew
    pub brew_rate_per_hour: f64,
    pub brew_refresh_interval_ms: u32,

    // Bar
    pub beans_per_lady: f64,

    // Feed
    pub feed_capacity: usize,
    pub feed_min_delay_ms: u32,
    pub feed_max_delay_ms: u32,

    // Graph
    pub graph_nodes: u32,
    pub graph_extra_edges: u32,
    pub graph_radius: f32,
    pub jitter_interval_ms: u32,
    pub jitter_amplitude: f32,

    pub quests: Vec<QuestSpec>,
}

impl Default for CafeConfig {
    fn default() -> Self {
        Self {
            wallet_address: "0xC0FFEE...BEANS".to_string(),
            initial_lady: 2.5,
            initial_beans: 0.0,
            brew_rate_per_hour: 24.0,
            brew_refresh_interval_ms: 1500,
            beans_per_lady: 95.0,
            feed_capacity: DEFAULT_FEED_CAPACITY,
            feed_min_delay_ms: 2200,
            feed_max_delay_ms: 3600,
            graph_nodes: 48,
            graph_extra_edges: 24,
            graph_radius: 6.0,
            jitter_interval_ms: 1300,
            jitter_amplitude: 0.15,
            quests: vec![
                QuestSpec::new(1, "Take a seat at the bar", 5.0),
                QuestSpec::new(2, "Order your first BEANS", 10.0),
                QuestSpec::new(3, "Collect a fresh brew", 15.0),
                QuestSpec::new(4, "Tip the barista", 25.0),
            ],
        }
    }
}

impl CafeConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CafeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("initial_lady", self.initial_lady),
            ("initial_beans", self.initial_beans),
            ("brew_rate_per_hour", self.brew_rate_per_hour),
            ("beans_per_lady", self.beans_per_lady),
        ];
        for (name, value) in amounts {
            check_amount(name, value)?;
        }
        if self.feed_capacity == 0 {
            return Err(CafeError::Config("feed_capacity must be at least 1".to_string()));
        }
        if self.feed_min_delay_ms > self.feed_max_delay_ms {
            return Err(CafeError::Config(format!(
                "feed delay range is empty: {}..{}",
                self.feed_min_delay_ms, self.feed_max_delay_ms
            )));
        }
        if !self.graph_radius.is_finite() || self.graph_radius <= 0.0 {
            return Err(CafeError::Config("graph_radius must be positive".to_string()));
        }
        let mut seen = HashSet::new();
        for quest in &self.quests {
            if !seen.insert(quest.id) {
                return Err(CafeError::Config(format!("duplicate quest id {}", quest.id)));
            }
            check_amount(&format!("quest {} reward", quest.id), quest.reward)?;
        }
        Ok(())
    }
}

/// Amounts must be non-negative and fit the ledger's `Decimal` range.
fn check_amount(name: &str, value: f64) -> Result<()> {
    match try_to_decimal(value) {
        Some(_) if value >= 0.0 => Ok(()),
        _ => Err(CafeError::Config(format!(
            "{name} must be a non-negative number the ledger can hold, got {value}"
        ))),
    }
}
