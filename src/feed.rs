// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Synthetic Live Feed

//! Fake "on-chain" activity for the live feed panel. Purely decorative: events
//! are drawn from a fixed template set and kept in a bounded log.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

use crate::adapter::to_fixed;
use crate::random::RandomSource;
use crate::types::Timestamp;

pub const DEFAULT_FEED_CAPACITY: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    Swap,
    BrewCollect,
    QuestClaim,
    WalletJoin,
    Tip,
}

struct Template {
    kind: FeedKind,
    /// Amount range; `None` for events without an amount.
    amount: Option<(f64, f64)>,
}

static TEMPLATES: [Template; 5] = [
    Template { kind: FeedKind::Swap, amount: Some((0.05, 4.0)) },
    Template { kind: FeedKind::BrewCollect, amount: Some((1.0, 60.0)) },
    Template { kind: FeedKind::QuestClaim, amount: Some((5.0, 25.0)) },
    Template { kind: FeedKind::WalletJoin, amount: None },
    Template { kind: FeedKind::Tip, amount: Some((0.5, 12.0)) },
];

impl FeedKind {
    fn render(&self, actor: &str, amount: f64) -> String {
        match self {
            Self::Swap => format!("{actor} swapped {} LADY for BEANS", to_fixed(amount, 3)),
            Self::BrewCollect => format!("{actor} collected {} BEANS from a brew", to_fixed(amount, 2)),
            Self::QuestClaim => format!("{actor} claimed a quest reward of {} BEANS", to_fixed(amount, 2)),
            Self::WalletJoin => format!("{actor} took a seat at the café"),
            Self::Tip => format!("{actor} tipped the barista {} BEANS", to_fixed(amount, 2)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub seq: u64,
    pub at: Timestamp,
    pub kind: FeedKind,
    pub actor: String,
    pub amount: f64,
    pub message: String,
}

/// Insertion-ordered log that drops its oldest entry past `capacity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedLog {
    capacity: usize,
    entries: VecDeque<FeedEvent>,
}

impl FeedLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, entries: VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, event: FeedEvent) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &FeedEvent> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&FeedEvent> {
        self.entries.back()
    }
}

pub struct FeedGenerator<R: RandomSource> {
    rng: R,
    log: FeedLog,
    next_seq: u64,
    min_delay_ms: u32,
    max_delay_ms: u32,
}

impl<R: RandomSource> FeedGenerator<R> {
    pub fn new(rng: R, capacity: usize, min_delay_ms: u32, max_delay_ms: u32) -> Self {
        Self {
            rng,
            log: FeedLog::new(capacity),
            next_seq: 0,
            min_delay_ms: min_delay_ms.min(max_delay_ms),
            max_delay_ms: max_delay_ms.max(min_delay_ms),
        }
    }

    pub fn log(&self) -> &FeedLog {
        &self.log
    }

    /// Delay before the host should ask for the next event.
    pub fn next_delay_ms(&mut self) -> u32 {
        self.rng.range_u32_inclusive(self.min_delay_ms, self.max_delay_ms)
    }

    /// Draw one event, append it, and return it.
    pub fn generate(&mut self, now: Timestamp) -> &FeedEvent {
        let template = &TEMPLATES[self.rng.index(TEMPLATES.len())];
        let actor = random_actor(&mut self.rng);
        let amount = match template.amount {
            Some((lo, hi)) => self.rng.range_f64(lo, hi),
            None => 0.0,
        };
        let event = FeedEvent {
            seq: self.next_seq,
            at: now,
            kind: template.kind,
            message: template.kind.render(&actor, amount),
            actor,
            amount,
        };
        self.next_seq += 1;
        debug!(seq = event.seq, kind = ?event.kind, "feed event");
        self.log.push(event);
        // Just pushed, so the log is non-empty.
        &self.log.entries[self.log.entries.len() - 1]
    }
}

/// Shortened fake address, e.g. `0x3fa1...9c0d`.
fn random_actor<R: RandomSource>(rng: &mut R) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut hex = |n: usize| -> String {
        (0..n).map(|_| HEX[rng.index(HEX.len())] as char).collect()
    };
    let head = hex(4);
    let tail = hex(4);
    format!("0x{head}...{tail}")
}
