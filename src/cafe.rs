// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Session Core

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::accrual::AccrualSession;
use crate::adapter::to_fixed;
use crate::config::CafeConfig;
use crate::error::{CafeError, Result};
use crate::ledger::{Balances, Transfer};
use crate::quest::QuestBoard;
use crate::swap::{self, Quote};
use crate::types::{Currency, Effect, Timestamp};
use crate::view::CafeView;
use crate::wallet::Wallet;

pub const DEX_NOTICE: &str =
    "In the real dApp, this would open the full DEX UI or an external link to the DEX.";

/// Result of a successful brew collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub amount: f64,
    pub coffee_level: u32,
}

/// One visitor's café session: wallet gate, balances, brew, bar and quests.
///
/// Owned by whatever wires the UI; every inbound trigger is a method call and
/// every outbound effect is either the [`CafeView`] snapshot or an [`Effect`]
/// left in the outbox. Failed operations change nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cafe {
    pub(crate) config: CafeConfig,
    pub(crate) wallet: Wallet,
    pub(crate) balances: Balances,
    pub(crate) brew: AccrualSession,
    pub(crate) quests: QuestBoard,
    pub(crate) coffee_level: u32,
    pub(crate) swap_input: f64,
    pub(crate) effects: Vec<Effect>,
}

impl Cafe {
    pub fn new(config: CafeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            wallet: Wallet::new(config.wallet_address.as_str()),
            balances: Balances::new(config.initial_lady, config.initial_beans),
            brew: AccrualSession::new(config.brew_rate_per_hour),
            quests: QuestBoard::new(&config.quests),
            coffee_level: 1,
            swap_input: 0.0,
            effects: Vec::new(),
            config,
        })
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &CafeConfig {
        &self.config
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn brew(&self) -> &AccrualSession {
        &self.brew
    }

    pub fn quests(&self) -> &QuestBoard {
        &self.quests
    }

    pub fn coffee_level(&self) -> u32 {
        self.coffee_level
    }

    pub fn view(&self) -> CafeView {
        CafeView::from_cafe(self)
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn notify(&mut self, message: String) {
        self.effects.push(Effect::Notice { message });
    }

    // ─── Wallet ──────────────────────────────────────────────────────────────

    /// Connect button. Balances survive a disconnect; only the display resets.
    pub fn toggle_wallet(&mut self) -> bool {
        self.wallet.toggle()
    }

    // ─── Bar ─────────────────────────────────────────────────────────────────

    /// Input-change trigger for the swap field.
    pub fn set_swap_input(&mut self, raw: &str) -> Result<Quote> {
        let value = swap::parse_input(raw)?;
        self.swap_input = value;
        Ok(self.quote())
    }

    pub fn quote(&self) -> Quote {
        Quote::new(self.swap_input, self.config.beans_per_lady)
    }

    /// Buy button: spend `lady` LADY for BEANS at the configured rate.
    pub fn buy_beans(&mut self, lady: f64) -> Result<Transfer> {
        self.wallet.require_connected()?;
        if !lady.is_finite() || lady <= 0.0 {
            return Err(CafeError::InvalidAmount(lady));
        }
        let beans = swap::estimate(lady, self.config.beans_per_lady)?;
        let transfer = self.balances.transfer(Currency::Lady, lady, Currency::Beans, beans)?;

        info!(lady, beans, "swap committed");
        self.notify(format!(
            "Demo swap complete.\nYou spent {} LADY and received ≈ {} BEANS.",
            to_fixed(lady, 4),
            to_fixed(beans, 2)
        ));
        self.swap_input = 0.0;
        Ok(transfer)
    }

    /// Buy with whatever is typed in the swap field.
    pub fn buy_from_input(&mut self) -> Result<Transfer> {
        self.buy_beans(self.swap_input)
    }

    pub fn open_dex(&mut self) {
        self.notify(DEX_NOTICE.to_string());
    }

    // ─── Brew ────────────────────────────────────────────────────────────────

    pub fn start_brew(&mut self, now: Timestamp) -> Result<()> {
        self.wallet.require_connected()?;
        self.brew.start(now)
    }

    /// Display refresh. Correctness never depends on this being called.
    pub fn refresh(&mut self, now: Timestamp) -> f64 {
        self.brew.tick(now)
    }

    pub fn collect_brew(&mut self, now: Timestamp) -> Result<Collection> {
        self.wallet.require_connected()?;
        let amount = self.brew.tick(now);
        if amount <= 0.0 {
            warn!("collect with an empty cup");
            return Err(CafeError::NothingToCollect);
        }
        // Credit before emptying the cup so a rejected credit keeps the brew.
        self.balances.credit(Currency::Beans, amount)?;
        self.brew.collect(now);
        self.coffee_level += 1;
        self.notify(format!("You collected {} BEANS from your Brew.", to_fixed(amount, 2)));
        Ok(Collection { amount, coffee_level: self.coffee_level })
    }

    pub fn stop_brew(&mut self, now: Timestamp) {
        self.brew.stop(now);
    }

    /// Whether the host's periodic brew refresh timer should be running.
    pub fn brew_timer_active(&self) -> bool {
        self.brew.is_active()
    }

    pub fn set_brew_rate(&mut self, rate_per_hour: f64) -> Result<()> {
        self.brew.set_rate(rate_per_hour)
    }

    // ─── Quests ──────────────────────────────────────────────────────────────

    pub fn start_quest(&mut self, id: u32) -> Result<()> {
        self.wallet.require_connected()?;
        self.quests.start(id)
    }

    /// Claim a completed quest: credits the reward once and fires confetti.
    pub fn claim_quest(&mut self, id: u32) -> Result<f64> {
        self.wallet.require_connected()?;
        let reward = self.quests.claimable(id)?;
        self.balances.credit(Currency::Beans, reward)?;
        self.quests.claim(id)?;
        self.effects.push(Effect::Confetti { quest_id: id });
        self.notify(format!("Quest reward claimed: {} BEANS.", to_fixed(reward, 2)));
        Ok(reward)
    }
}
