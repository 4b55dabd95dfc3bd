// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Bar / Swap Estimator

use serde::{Deserialize, Serialize};

use crate::adapter::to_fixed;
use crate::error::{CafeError, Result};

pub const DEFAULT_PRICE_INFO: &str =
    "Live estimate based on a simulated AMM curve. In production this reads from the LADY/BEANS pool.";

/// Estimated output for `input` at a fixed `rate`. No curve, no slippage.
pub fn estimate(input: f64, rate: f64) -> Result<f64> {
    if !input.is_finite() || input < 0.0 {
        return Err(CafeError::InvalidAmount(input));
    }
    Ok(input * rate)
}

/// Live quote shown under the swap input while the user types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub input: f64,
    pub output: f64,
    pub rate: f64,
    pub info: String,
}

impl Quote {
    /// Non-positive or malformed input quotes zero with the default blurb.
    pub fn new(input: f64, rate: f64) -> Self {
        match estimate(input, rate) {
            Ok(output) if input > 0.0 => Self {
                input,
                output,
                rate,
                info: format!(
                    "Estimated rate ~ 1 LADY ≈ {} BEANS (demo only, real app calls the DEX router).",
                    to_fixed(rate, 2)
                ),
            },
            _ => Self {
                input: 0.0,
                output: 0.0,
                rate,
                info: DEFAULT_PRICE_INFO.to_string(),
            },
        }
    }

    pub fn output_text(&self) -> String {
        if self.output > 0.0 {
            to_fixed(self.output, 2)
        } else {
            "0.0".to_string()
        }
    }
}

/// Parse the raw text of the swap input the way the page does: empty means 0,
/// garbage is rejected.
pub fn parse_input(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(CafeError::InvalidAmount(f64::NAN))
}
