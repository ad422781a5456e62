use serde::{Deserialize, Serialize};

use crate::error::{SaleError, SaleResult};

/// Outcome of a rate update request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateUpdate {
    Changed,
    /// The proposed rate equals the current rate; nothing was written and
    /// nothing should be logged.
    Unchanged,
}

/// The exchange rate (tokens granted per unit of contribution), bounded to
/// one order of magnitude of change per update.
///
/// Successive bounded steps give observers time to react to a repricing; a
/// single update can never move the rate by more than 10x in either
/// direction, and never to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateGovernor {
    rate: u128,
}

impl RateGovernor {
    pub fn new(initial_rate: u128) -> SaleResult<Self> {
        if initial_rate == 0 {
            return Err(SaleError::RateChangeTooBig);
        }
        Ok(Self { rate: initial_rate })
    }

    pub fn rate(&self) -> u128 {
        self.rate
    }

    /// Apply a bounded rate change.
    ///
    /// Rejects zero and anything outside `[rate / 10, rate * 10]` (integer
    /// division on the lower bound). An unchanged rate is accepted without a
    /// write.
    pub fn set_rate(&mut self, new_rate: u128) -> SaleResult<RateUpdate> {
        if new_rate == self.rate {
            return Ok(RateUpdate::Unchanged);
        }
        if new_rate == 0
            || new_rate > self.rate.saturating_mul(10)
            || new_rate < self.rate / 10
        {
            return Err(SaleError::RateChangeTooBig);
        }
        self.rate = new_rate;
        Ok(RateUpdate::Changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_rejects_zero_initial_rate() {
        assert_eq!(RateGovernor::new(0), Err(SaleError::RateChangeTooBig));
    }

    #[test]
    fn test_rejects_zero_and_out_of_band() {
        let mut governor = RateGovernor::new(100).unwrap();
        assert_eq!(governor.set_rate(0), Err(SaleError::RateChangeTooBig));
        assert_eq!(governor.set_rate(1001), Err(SaleError::RateChangeTooBig));
        assert_eq!(governor.set_rate(9), Err(SaleError::RateChangeTooBig));
        assert_eq!(governor.rate(), 100);
    }

    #[test]
    fn test_accepts_boundary_values() {
        let mut governor = RateGovernor::new(100).unwrap();
        assert_eq!(governor.set_rate(1000), Ok(RateUpdate::Changed));
        assert_eq!(governor.rate(), 1000);
        assert_eq!(governor.set_rate(100), Ok(RateUpdate::Changed));
        assert_eq!(governor.set_rate(10), Ok(RateUpdate::Changed));
        assert_eq!(governor.rate(), 10);
    }

    #[test]
    fn test_equal_rate_is_silent_noop() {
        let mut governor = RateGovernor::new(100).unwrap();
        assert_eq!(governor.set_rate(100), Ok(RateUpdate::Unchanged));
        assert_eq!(governor.rate(), 100);
    }

    #[test]
    fn test_low_rate_floor() {
        // With rate < 10 the lower bound floors to zero, so everything down
        // to 1 is in band; zero itself is still rejected.
        let mut governor = RateGovernor::new(5).unwrap();
        assert_eq!(governor.set_rate(1), Ok(RateUpdate::Changed));
        assert_eq!(governor.set_rate(0), Err(SaleError::RateChangeTooBig));
    }

    proptest! {
        #[test]
        fn property_rate_change_law(current in 1u128..u64::MAX as u128, proposed in 0u128..u64::MAX as u128) {
            let mut governor = RateGovernor::new(current).unwrap();
            let result = governor.set_rate(proposed);
            let in_band = proposed != 0
                && proposed >= current / 10
                && proposed <= current.saturating_mul(10);

            if proposed == current {
                prop_assert_eq!(result, Ok(RateUpdate::Unchanged));
                prop_assert_eq!(governor.rate(), current);
            } else if in_band {
                prop_assert_eq!(result, Ok(RateUpdate::Changed));
                prop_assert_eq!(governor.rate(), proposed);
            } else {
                prop_assert_eq!(result, Err(SaleError::RateChangeTooBig));
                prop_assert_eq!(governor.rate(), current);
            }
        }
    }
}
