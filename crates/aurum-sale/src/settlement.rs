//! Contribution settlement accounting.
//!
//! Contributions from unverified investors stay held by the sale until the
//! investor clears verification (then forwarded to the wallet) or reclaims
//! them after close. Verified investors' contributions forward immediately.

use serde::{Deserialize, Serialize};

use aurum_types::Amount;

/// Held vs. forwarded contribution counters.
///
/// `held_balance` equals the sum of all unverified investors' recorded
/// investments at all times; the controller maintains that invariant.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settlement {
    held: Amount,
    forwarded: Amount,
}

impl Settlement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain an unverified investor's contribution.
    pub(crate) fn hold(&mut self, value: Amount) {
        self.held = self.held.saturating_add(value);
    }

    /// Forward a previously held contribution to the wallet.
    pub(crate) fn forward_held(&mut self, value: Amount) {
        debug_assert!(value <= self.held, "forwarding more than is held");
        self.held = self.held.saturating_sub(value);
        self.forwarded = self.forwarded.saturating_add(value);
    }

    /// Forward a verified investor's contribution straight to the wallet.
    pub(crate) fn forward_direct(&mut self, value: Amount) {
        self.forwarded = self.forwarded.saturating_add(value);
    }

    /// Return a held contribution to its investor.
    pub(crate) fn refund(&mut self, value: Amount) {
        debug_assert!(value <= self.held, "refunding more than is held");
        self.held = self.held.saturating_sub(value);
    }

    /// Contributions currently retained for unverified investors.
    pub fn held_balance(&self) -> Amount {
        self.held
    }

    /// Cumulative contributions forwarded to the sale wallet.
    pub fn wallet_balance(&self) -> Amount {
        self.forwarded
    }
}
