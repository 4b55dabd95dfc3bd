// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Fake Wallet

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CafeError, Result};
use crate::types::WalletAddress;

/// Pretend wallet connection. Connecting never fails and never asks anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    demo_address: WalletAddress,
    address: Option<WalletAddress>,
}

impl Wallet {
    pub fn new(demo_address: impl Into<WalletAddress>) -> Self {
        Self { demo_address: demo_address.into(), address: None }
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<&WalletAddress> {
        self.address.as_ref()
    }

    pub fn connect(&mut self) {
        if self.address.is_none() {
            self.address = Some(self.demo_address.clone());
            info!(address = %self.demo_address, "wallet connected");
        }
    }

    pub fn disconnect(&mut self) {
        if self.address.take().is_some() {
            info!("wallet disconnected");
        }
    }

    /// Connect button behaviour: flips the state and returns the new one.
    pub fn toggle(&mut self) -> bool {
        if self.is_connected() {
            self.disconnect();
        } else {
            self.connect();
        }
        self.is_connected()
    }

    /// Gate for every action that needs a seat at the café.
    pub fn require_connected(&self) -> Result<&WalletAddress> {
        self.address.as_ref().ok_or(CafeError::NotConnected)
    }
}
