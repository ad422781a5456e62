//! The append-only event log.
//!
//! Every observable state change of the sale controller and the vesting
//! vault lands here. The log is the durable audit trail; there is no other
//! user-visible side channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount};

/// An observable event emitted by the sale core or the vesting vault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleEvent {
    /// The exchange rate was updated by the owner.
    RateChanged { new_rate: u128 },
    /// An investor cleared verification.
    InvestorVerified { investor: AccountId },
    /// Tokens were minted to an investor, either immediately on purchase or
    /// on verification of escrowed intent.
    TokensDelivered { investor: AccountId, amount: Amount },
    /// A never-verified investor reclaimed their held contribution after the
    /// sale closed.
    InvestmentWithdrawn { investor: AccountId, value: Amount },
    /// The sale was irreversibly finalized.
    Finalized,
    /// A vesting allocation was set (overwritten) for a beneficiary.
    Allocation { beneficiary: AccountId, amount: Amount },
    /// A beneficiary withdrew their vested allocation.
    Withdrawal { beneficiary: AccountId, amount: Amount },
}

/// A logged event with its identity and timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique record identifier.
    pub event_id: String,
    /// What happened.
    pub event: SaleEvent,
    /// When the emitting operation ran.
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of [`EventRecord`]s.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event stamped with the emitting operation's clock.
    pub fn emit(&mut self, event: SaleEvent, now: DateTime<Utc>) {
        self.records.push(EventRecord {
            event_id: uuid::Uuid::new_v4().to_string(),
            event,
            timestamp: now,
        });
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest record matching the predicate, if any.
    pub fn find_last(&self, pred: impl Fn(&SaleEvent) -> bool) -> Option<&EventRecord> {
        self.records.iter().rev().find(|r| pred(&r.event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_appends_in_order() {
        let mut log = EventLog::new();
        let now = Utc::now();
        assert!(log.is_empty());

        log.emit(SaleEvent::RateChanged { new_rate: 100 }, now);
        log.emit(SaleEvent::Finalized, now);

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].event, SaleEvent::RateChanged { new_rate: 100 });
        assert_eq!(log.records()[1].event, SaleEvent::Finalized);
        assert_eq!(log.records()[0].timestamp, now);
    }

    #[test]
    fn test_find_last() {
        let mut log = EventLog::new();
        let now = Utc::now();
        log.emit(SaleEvent::RateChanged { new_rate: 100 }, now);
        log.emit(SaleEvent::RateChanged { new_rate: 200 }, now);

        let found = log
            .find_last(|e| matches!(e, SaleEvent::RateChanged { .. }))
            .unwrap();
        assert_eq!(found.event, SaleEvent::RateChanged { new_rate: 200 });
        assert!(log.find_last(|e| matches!(e, SaleEvent::Finalized)).is_none());
    }
}
