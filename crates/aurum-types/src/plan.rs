//! The fixed token distribution plan.

use serde::{Deserialize, Serialize};

use crate::Amount;

/// Base units per whole token (18 decimals).
const BASE_UNIT: u128 = 1_000_000_000_000_000_000;

/// The seven fixed quantities governing token distribution.
///
/// Immutable after construction. The balance invariant — the six shares sum
/// exactly to `total_cap` — is a genesis-time property checked by tests, not
/// enforced at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Hard cap on total supply, enforced by the resource ledger.
    pub total_cap: Amount,
    /// Portion sellable through the public sale.
    pub sale_cap: Amount,
    /// Share sold in the earlier private presale.
    pub presale_share: Amount,
    /// Share reserved for the team (split 75/25 vault/wallet at finalization).
    pub team_share: Amount,
    /// Share reserved for advisors (vested).
    pub advisors_share: Amount,
    /// Share retained by the company.
    pub company_share: Amount,
    /// Share reserved for bounty programs.
    pub bounty_share: Amount,
}

impl AllocationPlan {
    /// Whether the six shares sum exactly to the total cap.
    pub fn is_balanced(&self) -> bool {
        let sum = self
            .sale_cap
            .saturating_add(self.presale_share)
            .saturating_add(self.team_share)
            .saturating_add(self.advisors_share)
            .saturating_add(self.company_share)
            .saturating_add(self.bounty_share);
        sum == self.total_cap
    }

    /// 75% of the team share, floor division. Computed first; any rounding
    /// remainder of the split stays unminted.
    pub fn team_vault_share(&self) -> Amount {
        Amount(self.team_share.0 * 75 / 100)
    }

    /// 25% of the team share, floor division, computed independently of the
    /// 75% side.
    pub fn team_wallet_share(&self) -> Amount {
        Amount(self.team_share.0 * 25 / 100)
    }

    /// Total minted into the vesting vault at finalization.
    pub fn vault_mint(&self) -> Amount {
        self.advisors_share.saturating_add(self.team_vault_share())
    }

    /// Total minted to the sale wallet at finalization.
    pub fn wallet_mint(&self) -> Amount {
        self.presale_share
            .saturating_add(self.company_share)
            .saturating_add(self.bounty_share)
            .saturating_add(self.team_wallet_share())
    }
}

impl Default for AllocationPlan {
    /// The production plan, in base units.
    fn default() -> Self {
        Self {
            total_cap: Amount(12_500_000_000 * BASE_UNIT),
            sale_cap: Amount(1_250_000_000 * BASE_UNIT),
            presale_share: Amount(5_511_842_425 * BASE_UNIT),
            team_share: Amount(1_100_000_000 * BASE_UNIT),
            advisors_share: Amount(1_087_500_000 * BASE_UNIT),
            company_share: Amount(3_369_407_575 * BASE_UNIT),
            bounty_share: Amount(181_250_000 * BASE_UNIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_plan_is_balanced() {
        assert!(AllocationPlan::default().is_balanced());
    }

    #[test]
    fn test_team_split_is_exact_for_production_plan() {
        let plan = AllocationPlan::default();
        assert_eq!(
            plan.team_vault_share() + plan.team_wallet_share(),
            plan.team_share
        );
        assert_eq!(plan.team_vault_share(), Amount(825_000_000 * BASE_UNIT));
        assert_eq!(plan.team_wallet_share(), Amount(275_000_000 * BASE_UNIT));
    }

    #[test]
    fn test_finalization_mints_cover_non_sale_shares() {
        let plan = AllocationPlan::default();
        assert_eq!(
            plan.vault_mint() + plan.wallet_mint(),
            plan.total_cap - plan.sale_cap
        );
    }

    #[test]
    fn test_team_split_floors_independently() {
        // A team share not divisible by 4 under-counts by the rounding
        // remainder; both sides floor on their own.
        let plan = AllocationPlan {
            team_share: Amount(103),
            ..AllocationPlan::default()
        };
        assert_eq!(plan.team_vault_share(), Amount(77));
        assert_eq!(plan.team_wallet_share(), Amount(25));
        assert_eq!(
            plan.team_vault_share() + plan.team_wallet_share(),
            Amount(102)
        );
    }
}
