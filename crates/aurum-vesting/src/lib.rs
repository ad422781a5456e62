//! Aurum Vesting Vault
//!
//! Holds a pre-funded token balance on behalf of insiders and releases it
//! after a fixed unlock instant. Allocations are owner-set and overwrite
//! semantics: repeated allocation replaces, never adds. One year after the
//! unlock instant the owner may decommission the vault, sweeping whatever
//! balance remains back to the owner account and leaving the vault
//! permanently inert.
//!
//! The vault never mints; it only moves its own balance through the injected
//! [`ResourceLedger`].

#![deny(unsafe_code)]

mod error;

pub use error::{VaultError, VaultResult};

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use aurum_ledger::ResourceLedger;
use aurum_types::{AccountId, Amount, EventLog, EventRecord, SaleEvent};

/// Unique identifier of a vault instance. Binds admin capabilities to the
/// instance they were issued for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaultId(String);

impl VaultId {
    fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for VaultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unforgeable administrative capability for one vault instance, issued once
/// at construction. Owner-gated operations require it.
#[derive(Clone, Debug)]
pub struct VaultAdminCap {
    vault: VaultId,
}

/// Whether the vault is still serviceable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultStatus {
    Active,
    /// Permanently inert; set by `destruct` and never left again.
    Decommissioned,
}

/// A time-locked distribution vault over a pre-funded token balance.
#[derive(Clone, Debug)]
pub struct VestingVault {
    id: VaultId,
    /// The vault's own token account on the resource ledger.
    account: AccountId,
    /// Destination of the residual sweep at decommission time.
    owner_account: AccountId,
    unlock_time: DateTime<Utc>,
    destructible_at: DateTime<Utc>,
    allocations: HashMap<AccountId, Amount>,
    total_allocation: Amount,
    status: VaultStatus,
    events: EventLog,
}

impl VestingVault {
    /// Grace period between the unlock instant and earliest decommission.
    fn destruction_grace() -> Duration {
        Duration::days(365)
    }

    /// Create a vault over `account`'s balance, unlocking at `unlock_time`.
    ///
    /// Returns the vault together with its admin capability.
    pub fn new(
        account: AccountId,
        owner_account: AccountId,
        unlock_time: DateTime<Utc>,
    ) -> (Self, VaultAdminCap) {
        let id = VaultId::generate();
        let cap = VaultAdminCap { vault: id.clone() };
        info!(vault = %id, account = %account, %unlock_time, "vesting vault created");
        let vault = Self {
            id,
            account,
            owner_account,
            unlock_time,
            destructible_at: unlock_time + Self::destruction_grace(),
            allocations: HashMap::new(),
            total_allocation: Amount::zero(),
            status: VaultStatus::Active,
            events: EventLog::new(),
        };
        (vault, cap)
    }

    fn authorize(&self, cap: &VaultAdminCap) -> VaultResult<()> {
        if cap.vault != self.id {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    fn ensure_active(&self) -> VaultResult<()> {
        match self.status {
            VaultStatus::Active => Ok(()),
            VaultStatus::Decommissioned => Err(VaultError::Decommissioned),
        }
    }

    /// Set (overwrite) the allocations of the given beneficiaries.
    ///
    /// Entries are applied in sequence order, so a beneficiary repeated
    /// within one call ends up with the last amount. Fails without any state
    /// change if the sequences differ in length or the resulting total
    /// allocation would exceed the vault's token balance. Permitted at any
    /// time, before and after the unlock instant.
    pub fn allocate(
        &mut self,
        cap: &VaultAdminCap,
        beneficiaries: &[AccountId],
        amounts: &[Amount],
        now: DateTime<Utc>,
        ledger: &dyn ResourceLedger,
    ) -> VaultResult<()> {
        self.authorize(cap)?;
        self.ensure_active()?;
        if beneficiaries.len() != amounts.len() {
            return Err(VaultError::LengthMismatch);
        }

        // Stage the whole batch before committing anything.
        let mut new_allocations = self.allocations.clone();
        let mut new_total = self.total_allocation;
        for (beneficiary, amount) in beneficiaries.iter().zip(amounts) {
            let old = new_allocations
                .get(beneficiary)
                .copied()
                .unwrap_or_default();
            new_total = new_total
                .saturating_sub(old)
                .checked_add(*amount)
                .ok_or(VaultError::AmountOverflow)?;
            if amount.is_zero() {
                new_allocations.remove(beneficiary);
            } else {
                new_allocations.insert(beneficiary.clone(), *amount);
            }
        }

        if new_total > ledger.balance_of(&self.account) {
            return Err(VaultError::AllocationExceedsBalance);
        }

        self.allocations = new_allocations;
        self.total_allocation = new_total;
        for (beneficiary, amount) in beneficiaries.iter().zip(amounts) {
            self.events.emit(
                SaleEvent::Allocation {
                    beneficiary: beneficiary.clone(),
                    amount: *amount,
                },
                now,
            );
        }
        info!(
            vault = %self.id,
            entries = beneficiaries.len(),
            total_allocation = %new_total,
            "allocations updated"
        );
        Ok(())
    }

    /// Withdraw the caller's allocation once the unlock instant has passed.
    ///
    /// A zero allocation is a silent no-op. Returns the amount transferred.
    pub fn withdraw(
        &mut self,
        caller: &AccountId,
        now: DateTime<Utc>,
        ledger: &mut dyn ResourceLedger,
    ) -> VaultResult<Amount> {
        self.ensure_active()?;
        if now < self.unlock_time {
            return Err(VaultError::TokensStillLocked);
        }
        self.release(caller, now, ledger)
    }

    /// Owner batch variant of [`withdraw`](Self::withdraw), applying the
    /// same per-beneficiary logic to each address in turn. Beneficiaries
    /// with zero allocation produce no event while the rest of the batch
    /// still processes. Returns the total amount transferred.
    pub fn withdraw_for(
        &mut self,
        cap: &VaultAdminCap,
        beneficiaries: &[AccountId],
        now: DateTime<Utc>,
        ledger: &mut dyn ResourceLedger,
    ) -> VaultResult<Amount> {
        self.authorize(cap)?;
        self.ensure_active()?;
        if now < self.unlock_time {
            return Err(VaultError::TokensStillLocked);
        }

        let mut total = Amount::zero();
        for beneficiary in beneficiaries {
            total = total.saturating_add(self.release(beneficiary, now, ledger)?);
        }
        Ok(total)
    }

    fn release(
        &mut self,
        beneficiary: &AccountId,
        now: DateTime<Utc>,
        ledger: &mut dyn ResourceLedger,
    ) -> VaultResult<Amount> {
        let amount = match self.allocations.get(beneficiary) {
            Some(amount) => *amount,
            None => return Ok(Amount::zero()),
        };

        ledger.transfer(&self.account, beneficiary, amount)?;
        self.allocations.remove(beneficiary);
        self.total_allocation = self.total_allocation.saturating_sub(amount);
        self.events.emit(
            SaleEvent::Withdrawal {
                beneficiary: beneficiary.clone(),
                amount,
            },
            now,
        );
        info!(vault = %self.id, beneficiary = %beneficiary, %amount, "vested tokens withdrawn");
        Ok(amount)
    }

    /// Decommission the vault, one year or later after the unlock instant.
    ///
    /// Sweeps the entire remaining balance to the owner account and leaves
    /// the vault permanently inert. Returns the swept amount.
    pub fn destruct(
        &mut self,
        cap: &VaultAdminCap,
        now: DateTime<Utc>,
        ledger: &mut dyn ResourceLedger,
    ) -> VaultResult<Amount> {
        self.authorize(cap)?;
        self.ensure_active()?;
        if now < self.destructible_at {
            return Err(VaultError::DestructionNotYetPossible);
        }

        let remaining = ledger.balance_of(&self.account);
        if !remaining.is_zero() {
            ledger.transfer(&self.account, &self.owner_account, remaining)?;
        }
        self.allocations.clear();
        self.total_allocation = Amount::zero();
        self.status = VaultStatus::Decommissioned;
        info!(vault = %self.id, swept = %remaining, "vault decommissioned");
        Ok(remaining)
    }

    // --- Read accessors ---

    pub fn allocations(&self, beneficiary: &AccountId) -> Amount {
        self.allocations
            .get(beneficiary)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_allocation(&self) -> Amount {
        self.total_allocation
    }

    pub fn end_of_vesting_period(&self) -> DateTime<Utc> {
        self.unlock_time
    }

    pub fn destructible_at(&self) -> DateTime<Utc> {
        self.destructible_at
    }

    /// The vault's own token account on the resource ledger.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn status(&self) -> VaultStatus {
        self.status
    }

    pub fn is_decommissioned(&self) -> bool {
        self.status == VaultStatus::Decommissioned
    }

    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }
}
