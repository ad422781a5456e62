use serde::{Deserialize, Serialize};
use thiserror::Error;

use aurum_types::Amount;

/// Errors returned by resource ledger implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("minting has finished")]
    MintingFinished,

    #[error("mint exceeds the supply cap: requested {requested}, remaining {remaining}")]
    CapExceeded { requested: Amount, remaining: Amount },

    #[error("transfers are paused")]
    TransfersPaused,

    #[error("transfers are already paused")]
    AlreadyPaused,

    #[error("transfers are not paused")]
    NotPaused,

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("amount overflow")]
    AmountOverflow,
}
