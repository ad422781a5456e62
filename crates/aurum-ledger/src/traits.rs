use aurum_types::{AccountId, Amount};

use crate::error::LedgerError;

/// The token ledger collaborator the sale core depends on.
///
/// Covers both the issuer surface (mint, cap, pause, ownership) used by the
/// sale controller and the holder surface (transfer) used by the vesting
/// vault to move its own balance. Implementations must keep each call
/// atomic: a returned error means no state changed.
pub trait ResourceLedger {
    /// Create `amount` new tokens on `to`'s balance.
    ///
    /// Fails with [`LedgerError::MintingFinished`] once minting is finished
    /// and with [`LedgerError::CapExceeded`] if the supply cap would be
    /// breached.
    fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<(), LedgerError>;

    /// Move `amount` tokens from `from` to `to`.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    fn balance_of(&self, addr: &AccountId) -> Amount;

    fn total_supply(&self) -> Amount;

    /// Permanently close minting. One-way.
    fn finish_minting(&mut self) -> Result<(), LedgerError>;

    /// Halt transfers.
    fn pause(&mut self) -> Result<(), LedgerError>;

    /// Re-enable transfers.
    fn unpause(&mut self) -> Result<(), LedgerError>;

    fn is_paused(&self) -> bool;

    /// Hand administrative control of the ledger to `new_owner`.
    fn transfer_ownership(&mut self, new_owner: &AccountId) -> Result<(), LedgerError>;
}
