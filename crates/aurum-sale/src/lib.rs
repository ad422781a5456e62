//! Aurum Sale Core
//!
//! A time-gated token sale with identity-gated settlement and a one-shot
//! finalizer:
//!
//! - [`SaleSchedule`] — pure phase oracle over the fixed opening/closing
//!   instants
//! - [`RateGovernor`] — owner-controlled exchange rate with a bounded
//!   change-per-update policy
//! - [`InvestorLedger`] — per-address verification status, cumulative
//!   contribution, and escrowed token intent
//! - [`Settlement`] — held vs. forwarded contribution accounting
//! - [`TokenSale`] — the controller orchestrating purchases, verification,
//!   post-close refunds, and finalization into the vesting vault
//!
//! The controller owns no wall clock and no token ledger; callers pass
//! `now` into every gated operation and inject a
//! [`ResourceLedger`](aurum_ledger::ResourceLedger) implementation.

#![deny(unsafe_code)]

mod config;
mod controller;
mod error;
mod investors;
mod rate;
mod schedule;
mod settlement;

pub use config::SaleConfig;
pub use controller::{AdminCap, SaleId, SaleStage, TokenSale};
pub use error::{SaleError, SaleResult};
pub use investors::{InvestorLedger, InvestorRecord, InvestorStatus, InvestorView};
pub use rate::{RateGovernor, RateUpdate};
pub use schedule::{SalePhase, SaleSchedule};
pub use settlement::Settlement;
