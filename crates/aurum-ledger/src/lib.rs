//! Resource ledger boundary for the Aurum sale core.
//!
//! This crate provides:
//! - the [`ResourceLedger`] trait the sale controller and vesting vault
//!   depend on, with every method returning an explicit result instead of
//!   aborting the caller
//! - [`InMemoryLedger`], a complete in-process implementation for tests,
//!   demos, and embedding
//!
//! The sale core never assumes a concrete ledger; callers inject a
//! conforming implementation.

#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use traits::ResourceLedger;
