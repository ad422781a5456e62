//! Per-address investor records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use aurum_types::{AccountId, Amount};

/// Verification status of an investor.
///
/// The transition is one-way: once `Verified`, an investor never returns to
/// `Pending`. Escrowed token intent only exists on the `Pending` side, so a
/// verified investor structurally cannot carry pending tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestorStatus {
    Pending {
        /// Tokens owed but not yet minted; delivered on verification.
        pending_tokens: Amount,
    },
    Verified,
}

impl Default for InvestorStatus {
    fn default() -> Self {
        Self::Pending {
            pending_tokens: Amount::zero(),
        }
    }
}

/// One investor's cumulative state, created lazily on first interaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorRecord {
    /// Cumulative contribution in the smallest currency unit.
    pub investment: Amount,
    pub status: InvestorStatus,
}

impl InvestorRecord {
    pub fn is_verified(&self) -> bool {
        matches!(self.status, InvestorStatus::Verified)
    }

    pub fn pending_tokens(&self) -> Amount {
        match self.status {
            InvestorStatus::Pending { pending_tokens } => pending_tokens,
            InvestorStatus::Verified => Amount::zero(),
        }
    }
}

/// Flattened read view of an investor record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorView {
    pub verified: bool,
    pub investment: Amount,
    pub pending_tokens: Amount,
}

/// All investor records of one sale.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InvestorLedger {
    records: HashMap<AccountId, InvestorRecord>,
}

impl InvestorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, investor: &AccountId) -> Option<&InvestorRecord> {
        self.records.get(investor)
    }

    /// The record for `investor`, created with zeroed defaults if absent.
    pub(crate) fn entry(&mut self, investor: &AccountId) -> &mut InvestorRecord {
        self.records.entry(investor.clone()).or_default()
    }

    /// Read view of `investor`, zeroed if the address never interacted.
    pub fn view(&self, investor: &AccountId) -> InvestorView {
        let record = self.records.get(investor).cloned().unwrap_or_default();
        InvestorView {
            verified: record.is_verified(),
            investment: record.investment,
            pending_tokens: record.pending_tokens(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
