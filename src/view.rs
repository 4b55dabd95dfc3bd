// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Display Snapshot

use serde::{Deserialize, Serialize};

use crate::adapter::to_fixed;
use crate::cafe::Cafe;
use crate::types::{Currency, QuestState};

/// Scroll offset at which the next section counts as "current".
pub const NAV_SCROLL_OFFSET: f64 = 120.0;
pub const DEFAULT_SECTION: &str = "hero";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRowView {
    pub id: u32,
    pub title: String,
    pub reward: String,
    pub state: QuestState,
    pub can_start: bool,
    pub can_claim: bool,
}

/// Everything the page renders as text, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeView {
    pub wallet_connected: bool,
    pub connect_button: String,
    pub hero_status: String,
    pub profile_wallet: String,
    pub lady_balance: String,
    pub beans_balance: String,

    pub brew_status: String,
    pub brew_rate: String,
    pub orbit_rate: String,
    pub brew_accumulated: String,
    pub brew_fill_percent: f64,
    pub total_brewed: String,
    pub coffee_level: u32,

    pub swap_output: String,
    pub price_info: String,

    pub quests: Vec<QuestRowView>,
}

impl CafeView {
    pub fn from_cafe(cafe: &Cafe) -> Self {
        let connected = cafe.wallet().is_connected();
        let brew = cafe.brew();
        let quote = cafe.quote();

        // Disconnecting blanks the profile card; the ledger itself is untouched.
        let balance = |currency: Currency| {
            if connected {
                to_fixed(cafe.balances().get(currency), currency.display_decimals())
            } else {
                "0.0".to_string()
            }
        };

        let (brew_rate, orbit_rate) = if brew.is_active() {
            let rate = to_fixed(brew.rate_per_hour(), 1);
            (format!("{rate} BEANS / hour"), format!("{rate} BEANS / hour"))
        } else {
            ("0 BEANS / hour".to_string(), "0 BEANS / h".to_string())
        };

        Self {
            wallet_connected: connected,
            connect_button: if connected { "Wallet Connected" } else { "Connect Wallet" }.to_string(),
            hero_status: if connected {
                "You’re seated in the café"
            } else {
                "Wallet not connected"
            }
            .to_string(),
            profile_wallet: cafe
                .wallet()
                .address()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "Not connected".to_string()),
            lady_balance: balance(Currency::Lady),
            beans_balance: balance(Currency::Beans),

            brew_status: brew.status().label().to_string(),
            brew_rate,
            orbit_rate,
            brew_accumulated: format!("{} BEANS", to_fixed(brew.accumulated(), 2)),
            brew_fill_percent: brew.fill_percent(),
            total_brewed: to_fixed(brew.total_brewed(), 2),
            coffee_level: cafe.coffee_level(),

            swap_output: quote.output_text(),
            price_info: quote.info,

            quests: cafe
                .quests()
                .rows()
                .iter()
                .map(|row| QuestRowView {
                    id: row.id,
                    title: row.title.clone(),
                    reward: format!("{} BEANS", to_fixed(row.reward, 0)),
                    state: row.state,
                    can_start: connected && row.state == QuestState::Idle,
                    can_claim: connected && row.state == QuestState::Completed,
                })
                .collect(),
        }
    }
}

/// Nav highlighting: the last section whose top has scrolled past
/// `scroll_y + NAV_SCROLL_OFFSET`. `sections` are `(id, offset_top)` in page order.
pub fn active_section<'a>(scroll_y: f64, sections: &'a [(String, f64)]) -> &'a str {
    sections
        .iter()
        .filter(|(_, top)| scroll_y + NAV_SCROLL_OFFSET >= *top)
        .last()
        .map(|(id, _)| id.as_str())
        .unwrap_or(DEFAULT_SECTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CafeConfig;
    use crate::types::{Timestamp, MS_PER_HOUR};

    fn sections() -> Vec<(String, f64)> {
        [("hero", 0.0), ("bar", 800.0), ("brew", 1600.0), ("quests", 2400.0)]
            .into_iter()
            .map(|(id, top)| (id.to_string(), top))
            .collect()
    }

    #[test]
    fn nav_highlight_follows_scroll() {
        let s = sections();
        assert_eq!(active_section(0.0, &s), "hero");
        assert_eq!(active_section(679.0, &s), "hero");
        assert_eq!(active_section(680.0, &s), "bar");
        assert_eq!(active_section(5000.0, &s), "quests");
        assert_eq!(active_section(0.0, &[]), "hero");
    }

    #[test]
    fn disconnected_view_blanks_balances() {
        let mut cafe = Cafe::new(CafeConfig::default()).unwrap();
        let v = cafe.view();
        assert_eq!(v.connect_button, "Connect Wallet");
        assert_eq!(v.profile_wallet, "Not connected");
        assert_eq!(v.lady_balance, "0.0");
        assert_eq!(v.brew_status, "Idle");
        assert_eq!(v.brew_rate, "0 BEANS / hour");
        assert_eq!(v.orbit_rate, "0 BEANS / h");
        assert_eq!(v.swap_output, "0.0");

        cafe.toggle_wallet();
        let v = cafe.view();
        assert_eq!(v.hero_status, "You’re seated in the café");
        assert_eq!(v.profile_wallet, "0xC0FFEE...BEANS");
        assert_eq!(v.lady_balance, "2.500");
        assert_eq!(v.beans_balance, "0.00");
        assert!(v.quests.iter().all(|q| q.can_start && !q.can_claim));
    }

    #[test]
    fn brewing_view() {
        let mut cafe = Cafe::new(CafeConfig::default()).unwrap();
        cafe.toggle_wallet();
        cafe.start_brew(Timestamp(0)).unwrap();
        cafe.refresh(Timestamp(MS_PER_HOUR / 2));
        let v = cafe.view();
        assert_eq!(v.brew_status, "Brewing");
        assert_eq!(v.brew_rate, "24.0 BEANS / hour");
        assert_eq!(v.brew_accumulated, "12.00 BEANS");
        assert_eq!(v.total_brewed, "12.00");
        assert!((v.brew_fill_percent - 10.0).abs() < 1e-9);
        assert_eq!(v.coffee_level, 1);
    }
}
