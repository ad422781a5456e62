use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aurum_types::AccountId;

/// Immutable sale parameters, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleConfig {
    /// First instant at which purchases are accepted.
    pub opening_time: DateTime<Utc>,
    /// First instant at which purchases are no longer accepted.
    pub closing_time: DateTime<Utc>,
    /// Destination of forwarded contributions and of the non-vested token
    /// shares minted at finalization.
    pub wallet: AccountId,
    /// Unlock instant handed to the vesting vault at finalization.
    pub vesting_unlock_time: DateTime<Utc>,
}
