//! The sale controller.
//!
//! Orchestrates purchase intake, investor verification, post-close refunds,
//! and the one-shot finalization that seeds the vesting vault and closes
//! minting for good. All checks run before any collaborator call, and the
//! controller's own state commits only after every collaborator call has
//! succeeded, so a failed operation applies nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use aurum_ledger::ResourceLedger;
use aurum_types::{AccountId, AllocationPlan, Amount, EventLog, EventRecord, SaleEvent};
use aurum_vesting::{VaultAdminCap, VestingVault};

use crate::config::SaleConfig;
use crate::error::{SaleError, SaleResult};
use crate::investors::{InvestorLedger, InvestorStatus, InvestorView};
use crate::rate::{RateGovernor, RateUpdate};
use crate::schedule::{SalePhase, SaleSchedule};
use crate::settlement::Settlement;

/// Unique identifier of a sale instance. Binds admin capabilities to the
/// instance they were issued for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleId(String);

impl SaleId {
    fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unforgeable administrative capability for one sale instance, issued once
/// at construction. Owner-gated operations require it.
#[derive(Clone, Debug)]
pub struct AdminCap {
    sale: SaleId,
}

/// Finalization latch. The vault reference only exists once finalized, and
/// the transition is one-way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleStage {
    Active,
    Finalized { vault_account: AccountId },
}

/// The sale controller.
pub struct TokenSale {
    id: SaleId,
    config: SaleConfig,
    schedule: SaleSchedule,
    plan: AllocationPlan,
    rate: RateGovernor,
    investors: InvestorLedger,
    settlement: Settlement,
    tokens_sold: Amount,
    stage: SaleStage,
    events: EventLog,
}

impl TokenSale {
    /// Create a sale over the given configuration and allocation plan.
    ///
    /// Returns the controller together with its admin capability. Fails if
    /// the schedule is inverted or the initial rate is zero.
    pub fn new(
        config: SaleConfig,
        plan: AllocationPlan,
        initial_rate: u128,
    ) -> SaleResult<(Self, AdminCap)> {
        let schedule = SaleSchedule::new(config.opening_time, config.closing_time)?;
        let rate = RateGovernor::new(initial_rate)?;
        let id = SaleId::generate();
        let cap = AdminCap { sale: id.clone() };
        info!(
            sale = %id,
            opening = %config.opening_time,
            closing = %config.closing_time,
            initial_rate,
            "token sale created"
        );
        let sale = Self {
            id,
            config,
            schedule,
            plan,
            rate,
            investors: InvestorLedger::new(),
            settlement: Settlement::new(),
            tokens_sold: Amount::zero(),
            stage: SaleStage::Active,
            events: EventLog::new(),
        };
        Ok((sale, cap))
    }

    fn authorize(&self, cap: &AdminCap) -> SaleResult<()> {
        if cap.sale != self.id {
            return Err(SaleError::Unauthorized);
        }
        Ok(())
    }

    /// Update the exchange rate within the bounded-change policy.
    ///
    /// An unchanged rate is a silent no-op: no state write, no event.
    pub fn set_rate(&mut self, cap: &AdminCap, new_rate: u128, now: DateTime<Utc>) -> SaleResult<()> {
        self.authorize(cap)?;
        match self.rate.set_rate(new_rate)? {
            RateUpdate::Changed => {
                self.events.emit(SaleEvent::RateChanged { new_rate }, now);
                info!(sale = %self.id, new_rate, "exchange rate changed");
            }
            RateUpdate::Unchanged => {}
        }
        Ok(())
    }

    /// Accept a contribution of `value` and grant `value * rate` tokens.
    ///
    /// Third-party purchases are rejected: the beneficiary must be the
    /// payer. While the investor is unverified, the granted tokens and the
    /// contribution both stay in escrow and sale capacity is not consumed;
    /// once verified, tokens mint immediately and the contribution forwards
    /// to the wallet. Returns the granted token amount.
    pub fn buy_tokens(
        &mut self,
        beneficiary: &AccountId,
        payer: &AccountId,
        value: Amount,
        now: DateTime<Utc>,
        ledger: &mut dyn ResourceLedger,
    ) -> SaleResult<Amount> {
        if beneficiary != payer {
            return Err(SaleError::BeneficiaryMismatch);
        }
        if !self.schedule.is_ongoing(now) {
            return Err(SaleError::SaleNotOngoing);
        }

        let amount = value
            .checked_mul(self.rate.rate())
            .ok_or(SaleError::AmountOverflow)?;
        if amount > self.remaining_tokens_for_sale() {
            return Err(SaleError::InsufficientRemainingSupply);
        }

        let record = self.investors.view(beneficiary);
        let new_investment = record
            .investment
            .checked_add(value)
            .ok_or(SaleError::AmountOverflow)?;

        if record.verified {
            let new_sold = self
                .tokens_sold
                .checked_add(amount)
                .ok_or(SaleError::AmountOverflow)?;

            ledger.mint(beneficiary, amount)?;

            self.investors.entry(beneficiary).investment = new_investment;
            self.tokens_sold = new_sold;
            self.settlement.forward_direct(value);
            self.events.emit(
                SaleEvent::TokensDelivered {
                    investor: beneficiary.clone(),
                    amount,
                },
                now,
            );
            info!(
                sale = %self.id,
                investor = %beneficiary,
                %value,
                %amount,
                "tokens delivered to verified investor"
            );
        } else {
            let new_pending = record
                .pending_tokens
                .checked_add(amount)
                .ok_or(SaleError::AmountOverflow)?;

            let entry = self.investors.entry(beneficiary);
            entry.investment = new_investment;
            entry.status = InvestorStatus::Pending {
                pending_tokens: new_pending,
            };
            self.settlement.hold(value);
            info!(
                sale = %self.id,
                investor = %beneficiary,
                %value,
                %amount,
                "contribution held pending verification"
            );
        }
        Ok(amount)
    }

    /// Mark the given investors as verified, delivering escrowed tokens and
    /// forwarding held contributions.
    ///
    /// Already-verified addresses are silent no-ops. Capacity contention is
    /// resolved in call order: the whole call fails without any state change
    /// if some newly verified investor's escrowed tokens no longer fit the
    /// remaining sale capacity at their turn.
    pub fn verify_investors(
        &mut self,
        cap: &AdminCap,
        investors: &[AccountId],
        now: DateTime<Utc>,
        ledger: &mut dyn ResourceLedger,
    ) -> SaleResult<()> {
        self.authorize(cap)?;

        // Plan the whole batch first: first-verified-first-served capacity,
        // duplicates collapse onto their first occurrence.
        let mut planned: Vec<(AccountId, Amount, Amount)> = Vec::new();
        let mut simulated_sold = self.tokens_sold;
        for investor in investors {
            let already_planned = planned.iter().any(|(addr, _, _)| addr == investor);
            let record = self.investors.view(investor);
            if record.verified || already_planned {
                continue;
            }
            let pending = record.pending_tokens;
            if pending > self.plan.sale_cap.saturating_sub(simulated_sold) {
                return Err(SaleError::InsufficientRemainingSupply);
            }
            simulated_sold = simulated_sold.saturating_add(pending);
            planned.push((investor.clone(), pending, record.investment));
        }

        // All mints precede any bookkeeping commit.
        for (investor, pending, _) in &planned {
            if !pending.is_zero() {
                ledger.mint(investor, *pending)?;
            }
        }

        for (investor, pending, investment) in planned {
            self.investors.entry(&investor).status = InvestorStatus::Verified;
            if !pending.is_zero() {
                self.tokens_sold = self.tokens_sold.saturating_add(pending);
                self.events.emit(
                    SaleEvent::TokensDelivered {
                        investor: investor.clone(),
                        amount: pending,
                    },
                    now,
                );
            }
            if !investment.is_zero() {
                self.settlement.forward_held(investment);
            }
            self.events.emit(
                SaleEvent::InvestorVerified {
                    investor: investor.clone(),
                },
                now,
            );
            info!(
                sale = %self.id,
                investor = %investor,
                delivered = %pending,
                forwarded = %investment,
                "investor verified"
            );
        }
        Ok(())
    }

    /// Return a never-verified investor's held contribution after the sale
    /// has closed, zeroing their record. Returns the refunded value.
    pub fn withdraw_investment(
        &mut self,
        caller: &AccountId,
        now: DateTime<Utc>,
    ) -> SaleResult<Amount> {
        if !self.schedule.has_closed(now) {
            return Err(SaleError::SaleNotClosed);
        }
        let record = self.investors.view(caller);
        if record.verified {
            return Err(SaleError::InvestorAlreadyVerified);
        }
        if record.investment.is_zero() {
            return Err(SaleError::ZeroInvestment);
        }

        let value = record.investment;
        let entry = self.investors.entry(caller);
        entry.investment = Amount::zero();
        entry.status = InvestorStatus::Pending {
            pending_tokens: Amount::zero(),
        };
        self.settlement.refund(value);
        self.events.emit(
            SaleEvent::InvestmentWithdrawn {
                investor: caller.clone(),
                value,
            },
            now,
        );
        warn!(
            sale = %self.id,
            investor = %caller,
            %value,
            "held investment withdrawn by unverified investor"
        );
        Ok(value)
    }

    /// Finalize the sale, exactly once, after it has closed.
    ///
    /// Mints the advisors share plus 75% of the team share into a newly
    /// created vesting vault, mints the presale/company/bounty shares plus
    /// the remaining 25% of the team share to the wallet, permanently closes
    /// minting, re-enables transfers, and hands ledger control to the
    /// wallet. Returns the vault together with its admin capability.
    pub fn finalize(
        &mut self,
        cap: &AdminCap,
        now: DateTime<Utc>,
        ledger: &mut dyn ResourceLedger,
    ) -> SaleResult<(VestingVault, VaultAdminCap)> {
        self.authorize(cap)?;
        if !self.schedule.has_closed(now) {
            return Err(SaleError::SaleNotClosed);
        }
        if matches!(self.stage, SaleStage::Finalized { .. }) {
            return Err(SaleError::AlreadyFinalized);
        }

        // The 75% side is computed first; with a team share not divisible by
        // four the rounding remainder stays unminted.
        let vault_amount = self.plan.vault_mint();
        let wallet_amount = self.plan.wallet_mint();
        let vault_account = AccountId::generate();

        ledger.mint(&vault_account, vault_amount)?;
        ledger.mint(&self.config.wallet, wallet_amount)?;
        ledger.finish_minting()?;
        ledger.unpause()?;
        ledger.transfer_ownership(&self.config.wallet)?;

        let (vault, vault_cap) = VestingVault::new(
            vault_account.clone(),
            self.config.wallet.clone(),
            self.config.vesting_unlock_time,
        );
        self.stage = SaleStage::Finalized {
            vault_account: vault_account.clone(),
        };
        self.events.emit(SaleEvent::Finalized, now);
        info!(
            sale = %self.id,
            vault = %vault_account,
            %vault_amount,
            %wallet_amount,
            "sale finalized"
        );
        Ok((vault, vault_cap))
    }

    // --- Read accessors ---

    pub fn rate(&self) -> u128 {
        self.rate.rate()
    }

    pub fn wallet(&self) -> &AccountId {
        &self.config.wallet
    }

    pub fn opening_time(&self) -> DateTime<Utc> {
        self.schedule.opening_time()
    }

    pub fn closing_time(&self) -> DateTime<Utc> {
        self.schedule.closing_time()
    }

    pub fn phase(&self, now: DateTime<Utc>) -> SalePhase {
        self.schedule.phase(now)
    }

    pub fn plan(&self) -> &AllocationPlan {
        &self.plan
    }

    pub fn remaining_tokens_for_sale(&self) -> Amount {
        self.plan.sale_cap.saturating_sub(self.tokens_sold)
    }

    pub fn tokens_sold(&self) -> Amount {
        self.tokens_sold
    }

    pub fn investments(&self, investor: &AccountId) -> InvestorView {
        self.investors.view(investor)
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.stage, SaleStage::Finalized { .. })
    }

    /// Token account of the vesting vault, once finalized.
    pub fn vesting_vault(&self) -> Option<&AccountId> {
        match &self.stage {
            SaleStage::Active => None,
            SaleStage::Finalized { vault_account } => Some(vault_account),
        }
    }

    /// Contributions currently held for unverified investors.
    pub fn held_balance(&self) -> Amount {
        self.settlement.held_balance()
    }

    /// Cumulative contributions forwarded to the wallet.
    pub fn wallet_balance(&self) -> Amount {
        self.settlement.wallet_balance()
    }

    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};

    use aurum_ledger::InMemoryLedger;

    // Balanced small-scale plan: shares sum to the cap, team divisible by 4.
    fn plan() -> AllocationPlan {
        AllocationPlan {
            total_cap: Amount::new(10_000),
            sale_cap: Amount::new(1_000),
            presale_share: Amount::new(4_000),
            team_share: Amount::new(1_000),
            advisors_share: Amount::new(2_000),
            company_share: Amount::new(1_900),
            bounty_share: Amount::new(100),
        }
    }

    fn opening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2029, 3, 1, 12, 0, 0).unwrap()
    }

    fn closing() -> DateTime<Utc> {
        opening() + Duration::days(30)
    }

    fn during_sale() -> DateTime<Utc> {
        opening() + Duration::days(1)
    }

    fn after_close() -> DateTime<Utc> {
        closing() + Duration::hours(1)
    }

    fn config() -> SaleConfig {
        SaleConfig {
            opening_time: opening(),
            closing_time: closing(),
            wallet: AccountId::new("wallet"),
            vesting_unlock_time: closing() + Duration::days(180),
        }
    }

    fn setup() -> (TokenSale, AdminCap, InMemoryLedger) {
        setup_with_rate(100)
    }

    fn setup_with_rate(rate: u128) -> (TokenSale, AdminCap, InMemoryLedger) {
        let (sale, cap) = TokenSale::new(config(), plan(), rate).unwrap();
        let ledger = InMemoryLedger::new(AccountId::new("issuer"), plan().total_cap);
        (sale, cap, ledger)
    }

    /// Production-scale plan, for scenarios whose token amounts exceed the
    /// small test cap.
    fn setup_production(rate: u128) -> (TokenSale, AdminCap, InMemoryLedger) {
        let production = AllocationPlan::default();
        let (sale, cap) = TokenSale::new(config(), production, rate).unwrap();
        let ledger = InMemoryLedger::new(AccountId::new("issuer"), production.total_cap);
        (sale, cap, ledger)
    }

    fn foreign_cap() -> AdminCap {
        let (_, cap) = TokenSale::new(config(), plan(), 1).unwrap();
        cap
    }

    #[test]
    fn test_new_validates_schedule_and_rate() {
        let mut bad = config();
        bad.closing_time = bad.opening_time;
        assert!(matches!(
            TokenSale::new(bad, plan(), 100),
            Err(SaleError::InvalidSchedule)
        ));
        assert!(matches!(
            TokenSale::new(config(), plan(), 0),
            Err(SaleError::RateChangeTooBig)
        ));
    }

    #[test]
    fn test_set_rate_requires_cap_for_this_sale() {
        let (mut sale, _cap, _) = setup();
        let result = sale.set_rate(&foreign_cap(), 200, during_sale());
        assert_eq!(result, Err(SaleError::Unauthorized));
        assert_eq!(sale.rate(), 100);
    }

    #[test]
    fn test_set_rate_emits_event_on_change_only() {
        let (mut sale, cap, _) = setup();
        let now = during_sale();

        sale.set_rate(&cap, 200, now).unwrap();
        assert_eq!(sale.rate(), 200);
        assert_eq!(sale.events().len(), 1);
        assert_eq!(
            sale.events()[0].event,
            SaleEvent::RateChanged { new_rate: 200 }
        );

        // Same rate again: silent no-op
        sale.set_rate(&cap, 200, now).unwrap();
        assert_eq!(sale.events().len(), 1);

        // Out of band: rejected, no event
        let result = sale.set_rate(&cap, 2001, now);
        assert_eq!(result, Err(SaleError::RateChangeTooBig));
        assert_eq!(sale.events().len(), 1);
    }

    #[test]
    fn test_buy_rejects_third_party_beneficiary() {
        let (mut sale, _cap, mut ledger) = setup();
        let result = sale.buy_tokens(
            &AccountId::new("alice"),
            &AccountId::new("bob"),
            Amount::new(1),
            during_sale(),
            &mut ledger,
        );
        assert_eq!(result, Err(SaleError::BeneficiaryMismatch));
    }

    #[test]
    fn test_buy_gated_on_phase() {
        let (mut sale, _cap, mut ledger) = setup();
        let alice = AccountId::new("alice");

        let result = sale.buy_tokens(
            &alice,
            &alice,
            Amount::new(1),
            opening() - Duration::seconds(1),
            &mut ledger,
        );
        assert_eq!(result, Err(SaleError::SaleNotOngoing));

        let result = sale.buy_tokens(&alice, &alice, Amount::new(1), closing(), &mut ledger);
        assert_eq!(result, Err(SaleError::SaleNotOngoing));
    }

    #[test]
    fn test_unverified_purchase_escrows_intent() {
        let (mut sale, _cap, mut ledger) = setup_production(12345);
        let alice = AccountId::new("alice");

        let amount = sale
            .buy_tokens(&alice, &alice, Amount::new(1), during_sale(), &mut ledger)
            .unwrap();

        assert_eq!(amount, Amount::new(12345));
        let view = sale.investments(&alice);
        assert!(!view.verified);
        assert_eq!(view.investment, Amount::new(1));
        assert_eq!(view.pending_tokens, Amount::new(12345));
        // Capacity is not reserved for undelivered intent
        assert_eq!(sale.tokens_sold(), Amount::zero());
        // Funds stay held, nothing minted, no event yet
        assert_eq!(sale.held_balance(), Amount::new(1));
        assert_eq!(sale.wallet_balance(), Amount::zero());
        assert_eq!(ledger.balance_of(&alice), Amount::zero());
        assert!(sale.events().is_empty());
    }

    #[test]
    fn test_verified_purchase_settles_immediately() {
        let (mut sale, cap, mut ledger) = setup();
        let alice = AccountId::new("alice");
        let now = during_sale();

        sale.verify_investors(&cap, &[alice.clone()], now, &mut ledger)
            .unwrap();
        sale.buy_tokens(&alice, &alice, Amount::new(3), now, &mut ledger)
            .unwrap();

        let view = sale.investments(&alice);
        assert!(view.verified);
        assert_eq!(view.investment, Amount::new(3));
        assert_eq!(view.pending_tokens, Amount::zero());
        assert_eq!(sale.tokens_sold(), Amount::new(300));
        assert_eq!(sale.remaining_tokens_for_sale(), Amount::new(700));
        assert_eq!(ledger.balance_of(&alice), Amount::new(300));
        assert_eq!(sale.held_balance(), Amount::zero());
        assert_eq!(sale.wallet_balance(), Amount::new(3));
        assert_eq!(
            sale.events().last().unwrap().event,
            SaleEvent::TokensDelivered {
                investor: alice,
                amount: Amount::new(300)
            }
        );
    }

    #[test]
    fn test_buy_rejects_amount_over_remaining_capacity() {
        let (mut sale, cap, mut ledger) = setup();
        let alice = AccountId::new("alice");
        let now = during_sale();

        sale.verify_investors(&cap, &[alice.clone()], now, &mut ledger)
            .unwrap();
        // 11 * 100 = 1100 > 1000
        let result = sale.buy_tokens(&alice, &alice, Amount::new(11), now, &mut ledger);
        assert_eq!(result, Err(SaleError::InsufficientRemainingSupply));

        sale.buy_tokens(&alice, &alice, Amount::new(10), now, &mut ledger)
            .unwrap();
        assert_eq!(sale.remaining_tokens_for_sale(), Amount::zero());
        let result = sale.buy_tokens(&alice, &alice, Amount::new(1), now, &mut ledger);
        assert_eq!(result, Err(SaleError::InsufficientRemainingSupply));
    }

    #[test]
    fn test_verification_delivers_escrowed_tokens() {
        let (mut sale, cap, mut ledger) = setup_production(12345);
        let alice = AccountId::new("alice");
        let now = during_sale();

        sale.buy_tokens(&alice, &alice, Amount::new(1), now, &mut ledger)
            .unwrap();
        sale.verify_investors(&cap, &[alice.clone()], now, &mut ledger)
            .unwrap();

        let view = sale.investments(&alice);
        assert!(view.verified);
        assert_eq!(view.pending_tokens, Amount::zero());
        assert_eq!(view.investment, Amount::new(1));
        assert_eq!(ledger.balance_of(&alice), Amount::new(12345));
        assert_eq!(sale.tokens_sold(), Amount::new(12345));
        assert_eq!(sale.held_balance(), Amount::zero());
        assert_eq!(sale.wallet_balance(), Amount::new(1));

        // TokensDelivered precedes InvestorVerified
        let events: Vec<_> = sale.events().iter().map(|r| &r.event).collect();
        assert_eq!(
            events,
            vec![
                &SaleEvent::TokensDelivered {
                    investor: alice.clone(),
                    amount: Amount::new(12345)
                },
                &SaleEvent::InvestorVerified { investor: alice }
            ]
        );
    }

    #[test]
    fn test_verification_without_purchase_emits_only_verified() {
        let (mut sale, cap, mut ledger) = setup();
        let alice = AccountId::new("alice");
        let now = during_sale();

        sale.verify_investors(&cap, &[alice.clone()], now, &mut ledger)
            .unwrap();
        assert!(sale.investments(&alice).verified);
        assert_eq!(sale.events().len(), 1);
        assert_eq!(
            sale.events()[0].event,
            SaleEvent::InvestorVerified { investor: alice }
        );
    }

    #[test]
    fn test_reverification_is_idempotent() {
        let (mut sale, cap, mut ledger) = setup();
        let alice = AccountId::new("alice");
        let now = during_sale();

        sale.verify_investors(&cap, &[alice.clone()], now, &mut ledger)
            .unwrap();
        let events_before = sale.events().len();

        // Second call, and a duplicate within one call: both no-ops
        sale.verify_investors(&cap, &[alice.clone(), alice.clone()], now, &mut ledger)
            .unwrap();
        assert_eq!(sale.events().len(), events_before);
    }

    #[test]
    fn test_verification_contention_fails_whole_call() {
        let (mut sale, cap, mut ledger) = setup();
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        let now = during_sale();

        // Each intends 600 of the 1000 capacity; both fit individually but
        // not together.
        sale.buy_tokens(&alice, &alice, Amount::new(6), now, &mut ledger)
            .unwrap();
        sale.buy_tokens(&bob, &bob, Amount::new(6), now, &mut ledger)
            .unwrap();

        let result =
            sale.verify_investors(&cap, &[alice.clone(), bob.clone()], now, &mut ledger);
        assert_eq!(result, Err(SaleError::InsufficientRemainingSupply));
        // Whole call applied nothing, not even the first investor
        assert!(!sale.investments(&alice).verified);
        assert_eq!(ledger.balance_of(&alice), Amount::zero());
        assert_eq!(sale.tokens_sold(), Amount::zero());

        // First-come alone succeeds
        sale.verify_investors(&cap, &[alice.clone()], now, &mut ledger)
            .unwrap();
        assert_eq!(sale.tokens_sold(), Amount::new(600));
        // Bob no longer fits
        let result = sale.verify_investors(&cap, &[bob], now, &mut ledger);
        assert_eq!(result, Err(SaleError::InsufficientRemainingSupply));
    }

    #[test]
    fn test_withdraw_gates() {
        let (mut sale, cap, mut ledger) = setup();
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        let now = during_sale();

        sale.buy_tokens(&alice, &alice, Amount::new(3), now, &mut ledger)
            .unwrap();

        // Not closed yet
        let result = sale.withdraw_investment(&alice, now);
        assert_eq!(result, Err(SaleError::SaleNotClosed));

        // Verified investors are never refundable
        sale.verify_investors(&cap, &[bob.clone()], now, &mut ledger)
            .unwrap();
        let result = sale.withdraw_investment(&bob, after_close());
        assert_eq!(result, Err(SaleError::InvestorAlreadyVerified));

        // Nothing to withdraw
        let result = sale.withdraw_investment(&AccountId::new("stranger"), after_close());
        assert_eq!(result, Err(SaleError::ZeroInvestment));
    }

    #[test]
    fn test_withdraw_returns_held_investment() {
        let (mut sale, _cap, mut ledger) = setup();
        let alice = AccountId::new("alice");
        let now = during_sale();

        sale.buy_tokens(&alice, &alice, Amount::new(3), now, &mut ledger)
            .unwrap();
        let value = sale.withdraw_investment(&alice, after_close()).unwrap();

        assert_eq!(value, Amount::new(3));
        let view = sale.investments(&alice);
        assert!(view.investment.is_zero());
        assert!(view.pending_tokens.is_zero());
        assert!(!view.verified);
        assert_eq!(sale.held_balance(), Amount::zero());
        assert_eq!(
            sale.events().last().unwrap().event,
            SaleEvent::InvestmentWithdrawn {
                investor: alice.clone(),
                value: Amount::new(3)
            }
        );

        // A second withdrawal finds nothing
        let result = sale.withdraw_investment(&alice, after_close());
        assert_eq!(result, Err(SaleError::ZeroInvestment));
    }

    #[test]
    fn test_finalize_gates() {
        let (mut sale, cap, mut ledger) = setup();

        let result = sale.finalize(&foreign_cap(), after_close(), &mut ledger);
        assert!(matches!(result, Err(SaleError::Unauthorized)));

        let result = sale.finalize(&cap, during_sale(), &mut ledger);
        assert!(matches!(result, Err(SaleError::SaleNotClosed)));

        sale.finalize(&cap, after_close(), &mut ledger).unwrap();
        let result = sale.finalize(&cap, after_close(), &mut ledger);
        assert!(matches!(result, Err(SaleError::AlreadyFinalized)));
    }

    #[test]
    fn test_finalize_mints_fixed_shares_and_closes_minting() {
        let (mut sale, cap, mut ledger) = setup();
        let wallet = AccountId::new("wallet");

        assert!(!sale.is_finalized());
        let (vault, _vault_cap) = sale.finalize(&cap, after_close(), &mut ledger).unwrap();

        assert!(sale.is_finalized());
        assert_eq!(sale.vesting_vault(), Some(vault.account()));
        // advisors 2000 + 750 team
        assert_eq!(ledger.balance_of(vault.account()), Amount::new(2_750));
        // presale 4000 + company 1900 + bounty 100 + 250 team
        assert_eq!(ledger.balance_of(&wallet), Amount::new(6_250));
        assert!(!ledger.is_paused());
        assert_eq!(ledger.owner(), &wallet);
        assert_eq!(
            ledger.mint(&wallet, Amount::new(1)),
            Err(aurum_ledger::LedgerError::MintingFinished)
        );
        assert_eq!(
            sale.events().last().unwrap().event,
            SaleEvent::Finalized
        );
        assert_eq!(vault.end_of_vesting_period(), config().vesting_unlock_time);
    }
}
