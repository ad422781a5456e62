use thiserror::Error;

use aurum_ledger::LedgerError;

/// Errors returned by vesting vault operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// The presented capability was not issued for this vault. Carries no
    /// further detail.
    #[error("caller is not authorized")]
    Unauthorized,

    #[error("given array lengths differ")]
    LengthMismatch,

    #[error("allocation exceeds balance")]
    AllocationExceedsBalance,

    #[error("tokens are still locked")]
    TokensStillLocked,

    #[error("destruction not possible yet")]
    DestructionNotYetPossible,

    #[error("vault was decommissioned")]
    Decommissioned,

    #[error("amount overflow")]
    AmountOverflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type VaultResult<T> = Result<T, VaultError>;
