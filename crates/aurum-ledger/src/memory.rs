use std::collections::HashMap;

use aurum_types::{AccountId, Amount};

use crate::error::LedgerError;
use crate::traits::ResourceLedger;

/// In-memory resource ledger used for tests, local demos, and embedding.
///
/// Starts paused with minting open, mirroring a capped token deployed in its
/// pre-distribution state.
#[derive(Clone, Debug)]
pub struct InMemoryLedger {
    owner: AccountId,
    cap: Amount,
    balances: HashMap<AccountId, Amount>,
    total_supply: Amount,
    minting_finished: bool,
    paused: bool,
}

impl InMemoryLedger {
    pub fn new(owner: AccountId, cap: Amount) -> Self {
        Self {
            owner,
            cap,
            balances: HashMap::new(),
            total_supply: Amount::zero(),
            minting_finished: false,
            paused: true,
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn cap(&self) -> Amount {
        self.cap
    }

    pub fn minting_finished(&self) -> bool {
        self.minting_finished
    }
}

impl ResourceLedger for InMemoryLedger {
    fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        if self.minting_finished {
            return Err(LedgerError::MintingFinished);
        }
        let remaining = self.cap.saturating_sub(self.total_supply);
        if amount > remaining {
            return Err(LedgerError::CapExceeded {
                requested: amount,
                remaining,
            });
        }

        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        self.balances.insert(to.clone(), balance);
        self.total_supply = self.total_supply.saturating_add(amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::TransfersPaused);
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        // Stage both sides before writing so a failed call changes nothing;
        // a self-transfer nets out to no change.
        let debited = available.saturating_sub(amount);
        let credited_base = if from == to {
            debited
        } else {
            self.balance_of(to)
        };
        let credited = credited_base
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        self.balances.insert(from.clone(), debited);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }

    fn balance_of(&self, addr: &AccountId) -> Amount {
        self.balances.get(addr).copied().unwrap_or_default()
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn finish_minting(&mut self) -> Result<(), LedgerError> {
        if self.minting_finished {
            return Err(LedgerError::MintingFinished);
        }
        self.minting_finished = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::AlreadyPaused);
        }
        self.paused = true;
        Ok(())
    }

    fn unpause(&mut self) -> Result<(), LedgerError> {
        if !self.paused {
            return Err(LedgerError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn transfer_ownership(&mut self, new_owner: &AccountId) -> Result<(), LedgerError> {
        self.owner = new_owner.clone();
        Ok(())
    }
}
