// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Balances

//! Per-currency demo balances.
//!
//! Amounts are held as `Decimal` so repeated swaps never drift below zero
//! through float rounding. Every mutation validates first and applies after,
//! so a rejected transfer leaves both balances exactly as they were.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adapter::{from_decimal, to_decimal, try_to_decimal};
use crate::error::{CafeError, Result};
use crate::types::Currency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    lady: Decimal,
    beans: Decimal,
}

/// Outcome of a committed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Currency,
    pub debited: f64,
    pub to: Currency,
    pub credited: f64,
}

impl Balances {
    pub fn new(lady: f64, beans: f64) -> Self {
        Self {
            lady: to_decimal(lady).max(Decimal::ZERO),
            beans: to_decimal(beans).max(Decimal::ZERO),
        }
    }

    pub fn get(&self, currency: Currency) -> f64 {
        from_decimal(*self.slot(currency))
    }

    pub fn get_decimal(&self, currency: Currency) -> Decimal {
        *self.slot(currency)
    }

    fn slot(&self, currency: Currency) -> &Decimal {
        match currency {
            Currency::Lady => &self.lady,
            Currency::Beans => &self.beans,
        }
    }

    fn slot_mut(&mut self, currency: Currency) -> &mut Decimal {
        match currency {
            Currency::Lady => &mut self.lady,
            Currency::Beans => &mut self.beans,
        }
    }

    /// Add `amount` to one currency.
    pub fn credit(&mut self, currency: Currency, amount: f64) -> Result<()> {
        let amount_dec = checked_amount(amount)?;
        let slot = self.slot_mut(currency);
        *slot = slot.checked_add(amount_dec).ok_or_else(|| {
            warn!(%currency, amount, "credit overflows the balance");
            CafeError::InvalidAmount(amount)
        })?;
        debug!(%currency, amount, "credit");
        Ok(())
    }

    /// Move `debit` out of `from` and `credit` into `to` as a single step.
    pub fn transfer(&mut self, from: Currency, debit: f64, to: Currency, credit: f64) -> Result<Transfer> {
        let debit_dec = checked_amount(debit)?;
        let credit_dec = checked_amount(credit)?;

        let available = *self.slot(from);
        if debit_dec > available {
            warn!(%from, requested = debit, available = from_decimal(available), "transfer rejected");
            return Err(CafeError::InsufficientBalance {
                currency: from,
                requested: debit,
                available: from_decimal(available),
            });
        }

        // Both sides computed before either is written.
        let new_from = available - debit_dec;
        let base_to = if from == to { new_from } else { *self.slot(to) };
        let new_to = base_to.checked_add(credit_dec).ok_or(CafeError::InvalidAmount(credit))?;
        *self.slot_mut(from) = new_from;
        *self.slot_mut(to) = new_to;

        debug!(%from, debit, %to, credit, "transfer committed");
        Ok(Transfer { from, debited: debit, to, credited: credit })
    }
}

fn checked_amount(amount: f64) -> Result<Decimal> {
    match try_to_decimal(amount) {
        Some(d) if d >= Decimal::ZERO => Ok(d),
        _ => Err(CafeError::InvalidAmount(amount)),
    }
}
