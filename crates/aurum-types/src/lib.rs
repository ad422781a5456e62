//! Aurum Domain Types
//!
//! This crate defines the domain types shared by the sale core and the
//! vesting vault:
//!
//! - **Amount**: unsigned quantities in the smallest indivisible unit of
//!   currency or token. No floating point anywhere in the model.
//! - **AccountId**: opaque address of an external party (investor, wallet,
//!   vault, beneficiary).
//! - **AllocationPlan**: the fixed token distribution quantities, with the
//!   genesis balance invariant.
//! - **SaleEvent / EventLog**: the append-only audit trail emitted by the
//!   sale controller and the vesting vault.
//!
//! This is a pure types crate with no runtime dependencies. All types
//! implement `Clone`, `Debug`, `Serialize`, `Deserialize`. IDs use the
//! newtype pattern and implement `Display`, `generate()`, and `new()`.

#![deny(unsafe_code)]

mod account;
mod amount;
mod events;
mod plan;

pub use account::*;
pub use amount::*;
pub use events::*;
pub use plan::*;
