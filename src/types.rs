// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Type Definitions

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MS_PER_HOUR: u64 = 3_600_000;

// ─── Timestamp ───────────────────────────────────────────────────────────────

/// Wall-clock milliseconds as reported by the host (`Date.now()` in the browser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Host clocks arrive as f64; negative and NaN values collapse to the epoch.
    pub fn from_js(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Self(ms as u64)
        } else {
            Self(0)
        }
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if the clock went backwards.
    pub fn saturating_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn plus_millis(&self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ─── Currency ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Lady = 0,
    Beans = 1,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Lady => "LADY",
            Self::Beans => "BEANS",
        }
    }

    /// Decimal places shown in the profile card.
    pub fn display_decimals(&self) -> usize {
        match self {
            Self::Lady => 3,
            Self::Beans => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ─── WalletAddress ───────────────────────────────────────────────────────────

/// Display-only wallet address. Never validated, never hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletAddress(pub String);

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        WalletAddress(s.to_string())
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        WalletAddress(s)
    }
}

// ─── Quest State ─────────────────────────────────────────────────────────────

/// Quest row lifecycle. `Claimed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuestState {
    #[default]
    Idle = 0,
    Completed = 1,
    Claimed = 2,
}

impl QuestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Claimed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Completed => "completed",
            Self::Claimed => "claimed",
        }
    }
}

impl fmt::Display for QuestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Brew Status ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrewStatus {
    Idle = 0,
    Brewing = 1,
}

impl BrewStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Brewing => "Brewing",
        }
    }
}

// ─── Effects ─────────────────────────────────────────────────────────────────

/// Outbound side effects for the presentation layer, drained once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Blocking user notification (`alert()` in the browser).
    Notice { message: String },
    /// One-shot confetti burst after a quest claim.
    Confetti { quest_id: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_saturates_when_clock_goes_backwards() {
        let later = Timestamp(5_000);
        let earlier = Timestamp(2_000);
        assert_eq!(later.saturating_since(earlier), 3_000);
        assert_eq!(earlier.saturating_since(later), 0);
    }

    #[test]
    fn timestamp_from_js_rejects_garbage() {
        assert_eq!(Timestamp::from_js(f64::NAN), Timestamp(0));
        assert_eq!(Timestamp::from_js(-12.0), Timestamp(0));
        assert_eq!(Timestamp::from_js(1_700_000_000_123.0), Timestamp(1_700_000_000_123));
    }

    #[test]
    fn effect_serializes_with_tag() {
        let json = serde_json::to_string(&Effect::Confetti { quest_id: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"confetti","quest_id":3}"#);
    }
}
