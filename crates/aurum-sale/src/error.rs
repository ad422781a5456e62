use thiserror::Error;

use aurum_ledger::LedgerError;

/// Errors returned by sale operations.
///
/// Authorization failures carry no detail; precondition failures carry a
/// stable, human-readable cause so callers and tests can assert on it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleError {
    #[error("caller is not authorized")]
    Unauthorized,

    #[error("sale opening time must precede closing time")]
    InvalidSchedule,

    #[error("rate change too big")]
    RateChangeTooBig,

    #[error("beneficiary does not match payer")]
    BeneficiaryMismatch,

    #[error("sale is not ongoing")]
    SaleNotOngoing,

    #[error("not enough tokens available")]
    InsufficientRemainingSupply,

    #[error("sale has not closed yet")]
    SaleNotClosed,

    #[error("investor was already verified")]
    InvestorAlreadyVerified,

    #[error("no investment to withdraw")]
    ZeroInvestment,

    #[error("sale was already finalized")]
    AlreadyFinalized,

    #[error("amount overflow")]
    AmountOverflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type SaleResult<T> = Result<T, SaleError>;
