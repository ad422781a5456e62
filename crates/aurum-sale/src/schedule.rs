use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SaleError, SaleResult};

/// Sale phase as a pure function of the current time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalePhase {
    BeforeOpening,
    Ongoing,
    Closed,
}

/// The fixed opening/closing instants of the sale.
///
/// No stored state beyond the two timestamps; every query recomputes the
/// phase from the `now` it is given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSchedule {
    opening_time: DateTime<Utc>,
    closing_time: DateTime<Utc>,
}

impl SaleSchedule {
    pub fn new(opening_time: DateTime<Utc>, closing_time: DateTime<Utc>) -> SaleResult<Self> {
        if opening_time >= closing_time {
            return Err(SaleError::InvalidSchedule);
        }
        Ok(Self {
            opening_time,
            closing_time,
        })
    }

    /// `opening_time <= now < closing_time`
    pub fn is_ongoing(&self, now: DateTime<Utc>) -> bool {
        self.opening_time <= now && now < self.closing_time
    }

    pub fn has_closed(&self, now: DateTime<Utc>) -> bool {
        now >= self.closing_time
    }

    pub fn phase(&self, now: DateTime<Utc>) -> SalePhase {
        if now < self.opening_time {
            SalePhase::BeforeOpening
        } else if now < self.closing_time {
            SalePhase::Ongoing
        } else {
            SalePhase::Closed
        }
    }

    pub fn opening_time(&self) -> DateTime<Utc> {
        self.opening_time
    }

    pub fn closing_time(&self) -> DateTime<Utc> {
        self.closing_time
    }
}
