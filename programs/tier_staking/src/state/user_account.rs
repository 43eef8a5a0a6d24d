use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::math::{early_withdrawal_penalty, pending_reward, settle_exit, ExitSettlement};
use crate::state::StakePool;

/// Per-owner aggregate stake. All deposits under one tier merge into a single
/// accruing balance. The account also counts the owner's per-deposit
/// positions, so it exists for anyone who has ever staked in the pool.
#[account]
#[derive(InitSpace)]
pub struct UserAccount {
    pub owner: Pubkey,
    pub stake_pool: Pubkey,

    pub total_staked: u64,
    /// Reward settled by a merge and not yet paid out.
    pub accrued_rewards: u64,
    pub total_rewards_claimed: u64,
    /// Paid out by claims since `lock_start_time`; part of the early-exit penalty base.
    pub lock_rewards_claimed: u64,

    /// Accrual checkpoint.
    pub stake_timestamp: i64,
    pub lock_start_time: i64,

    pub position_count: u32,
    pub lock_tier: u8,
    pub is_active: bool,
    pub bump: u8,
}

/// Read-only snapshot returned by the `user_info` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserInfo {
    pub owner: Pubkey,
    pub total_staked: u64,
    pub lock_tier: u8,
    pub stake_timestamp: i64,
    pub lock_start_time: i64,
    pub maturity: i64,
    pub pending_rewards: u64,
    pub bonus_multiplier: u64,
    pub total_rewards_claimed: u64,
    pub position_count: u32,
    pub is_active: bool,
}

impl UserInfo {
    /// Snapshot for an owner who has never staked in `pool`.
    pub fn empty(owner: Pubkey, pool: &StakePool) -> Self {
        Self {
            owner,
            total_staked: 0,
            lock_tier: 0,
            stake_timestamp: 0,
            lock_start_time: 0,
            maturity: 0,
            pending_rewards: 0,
            bonus_multiplier: pool.calculate_bonus(0),
            total_rewards_claimed: 0,
            position_count: 0,
            is_active: false,
        }
    }
}

impl UserAccount {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    /// Fills in identity fields the first time the PDA is created.
    pub fn ensure_initialized(&mut self, owner: Pubkey, stake_pool: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.stake_pool = stake_pool;
            self.bump = bump;
        }
    }

    /// Reserves the next per-deposit position index.
    pub fn next_position_index(&mut self) -> Result<u32> {
        let index = self.position_count;
        self.position_count = index.checked_add(1).ok_or(StakingError::MathOverflow)?;
        Ok(index)
    }

    /// Reward accrued since the checkpoint, excluding `accrued_rewards`.
    pub fn newly_accrued(&self, pool: &StakePool, now: i64) -> Result<u64> {
        if !self.is_active || self.total_staked == 0 {
            return Ok(0);
        }
        let tier = pool.config.tier(self.lock_tier)?;
        pending_reward(
            self.total_staked,
            &tier.accrual_terms(),
            pool.calculate_bonus(self.total_staked),
            self.lock_start_time,
            self.stake_timestamp,
            now,
        )
    }

    /// Everything claimable right now; 0 once unstaked.
    pub fn pending_rewards(&self, pool: &StakePool, now: i64) -> Result<u64> {
        if !self.is_active {
            return Ok(0);
        }
        self.accrued_rewards
            .checked_add(self.newly_accrued(pool, now)?)
            .ok_or_else(|| error!(StakingError::MathOverflow))
    }

    pub fn maturity(&self, pool: &StakePool) -> Result<i64> {
        let tier = pool.config.tier(self.lock_tier)?;
        Ok(tier.penalty_terms().maturity(self.lock_start_time))
    }

    /// Opens or merges a stake of `amount` under `tier`.
    ///
    /// Unclaimed reward is rolled into `accrued_rewards`, then the checkpoint
    /// and lock start are re-based to `now`.
    ///
    /// # Returns
    /// `true` when this call opened a new aggregate stake
    pub fn record_stake(&mut self, pool: &StakePool, amount: u64, tier: u8, now: i64) -> Result<bool> {
        require!(amount > 0, StakingError::InvalidAmount);
        pool.config.tier(tier)?;

        if !self.is_active {
            self.total_staked = amount;
            self.accrued_rewards = 0;
            self.lock_rewards_claimed = 0;
            self.lock_tier = tier;
            self.stake_timestamp = now;
            self.lock_start_time = now;
            self.is_active = true;
            return Ok(true);
        }

        require!(self.lock_tier == tier, StakingError::CannotChangeTier);

        let newly_accrued = self.newly_accrued(pool, now)?;
        self.accrued_rewards = self
            .accrued_rewards
            .checked_add(newly_accrued)
            .ok_or(StakingError::MathOverflow)?;
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.stake_timestamp = now;
        self.lock_start_time = now;
        self.lock_rewards_claimed = 0;

        Ok(false)
    }

    /// Settles all pending reward and returns the amount to pay.
    ///
    /// A zero balance leaves the account untouched.
    pub fn record_claim(&mut self, pool: &StakePool, now: i64) -> Result<u64> {
        require!(self.is_active, StakingError::AlreadyUnstaked);

        let newly_accrued = self.newly_accrued(pool, now)?;
        let claimable = self
            .accrued_rewards
            .checked_add(newly_accrued)
            .ok_or(StakingError::MathOverflow)?;
        if claimable == 0 {
            return Ok(0);
        }

        if newly_accrued > 0 {
            self.stake_timestamp = now;
        }
        self.accrued_rewards = 0;
        self.total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(claimable)
            .ok_or(StakingError::MathOverflow)?;
        self.lock_rewards_claimed = self
            .lock_rewards_claimed
            .checked_add(claimable)
            .ok_or(StakingError::MathOverflow)?;

        Ok(claimable)
    }

    /// Closes the aggregate stake and computes the exit payout.
    ///
    /// Before maturity this fails with `LockNotExpired` unless the pool's
    /// force-unstake gate is open, in which case the decaying penalty applies
    /// to principal plus every reward of the current lock, claimed or not.
    pub fn record_unstake(&mut self, pool: &StakePool, now: i64) -> Result<ExitSettlement> {
        require!(self.is_active, StakingError::AlreadyUnstaked);

        let tier = pool.config.tier(self.lock_tier)?;
        let penalty_terms = tier.penalty_terms();
        let reward = self.pending_rewards(pool, now)?;
        let principal = self.total_staked;

        let fee = if penalty_terms.is_matured(self.lock_start_time, now) {
            0
        } else {
            require!(pool.force_unstake_allowed, StakingError::LockNotExpired);
            let exit_total = principal
                .checked_add(reward)
                .ok_or(StakingError::MathOverflow)?;
            let gross = exit_total
                .checked_add(self.lock_rewards_claimed)
                .ok_or(StakingError::MathOverflow)?;
            early_withdrawal_penalty(gross, &penalty_terms, self.lock_start_time, now)?
                .min(exit_total)
        };

        let settlement = settle_exit(principal, reward, fee)?;

        self.is_active = false;
        self.total_staked = 0;
        self.accrued_rewards = 0;
        self.lock_rewards_claimed = 0;
        self.stake_timestamp = now;
        self.total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(settlement.reward_paid)
            .ok_or(StakingError::MathOverflow)?;

        Ok(settlement)
    }

    pub fn info(&self, pool: &StakePool, now: i64) -> Result<UserInfo> {
        Ok(UserInfo {
            owner: self.owner,
            total_staked: self.total_staked,
            lock_tier: self.lock_tier,
            stake_timestamp: self.stake_timestamp,
            lock_start_time: self.lock_start_time,
            maturity: self.maturity(pool)?,
            pending_rewards: self.pending_rewards(pool, now)?,
            bonus_multiplier: pool.calculate_bonus(self.total_staked),
            total_rewards_claimed: self.total_rewards_claimed,
            position_count: self.position_count,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::state::PoolConfig;

    const DAY: i64 = SECONDS_PER_DAY;
    const T0: i64 = 1_700_000_000;

    fn get_fixture_pool(force_unstake_allowed: bool) -> StakePool {
        StakePool {
            authority: Pubkey::new_unique(),
            staking_mint: Pubkey::new_unique(),
            staking_vault: Pubkey::new_unique(),
            treasury_vault: Pubkey::new_unique(),
            config: PoolConfig::default(),
            force_unstake_allowed,
            next_position_id: 0,
            total_staked: 0,
            total_distributed: 0,
            total_penalties: 0,
            staker_count: 0,
            last_updated: T0,
            created_at: T0,
            vault_bump: 255,
            treasury_bump: 254,
            bump: 253,
        }
    }

    fn get_fixture_account() -> UserAccount {
        UserAccount {
            owner: Pubkey::new_unique(),
            stake_pool: Pubkey::new_unique(),
            total_staked: 0,
            accrued_rewards: 0,
            total_rewards_claimed: 0,
            lock_rewards_claimed: 0,
            stake_timestamp: 0,
            lock_start_time: 0,
            position_count: 0,
            lock_tier: 0,
            is_active: false,
            bump: 255,
        }
    }

    #[test]
    fn test_stake_rejects_zero_and_bad_tier() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        assert_eq!(
            account.record_stake(&pool, 0, tier::BASE, T0).unwrap_err(),
            StakingError::InvalidAmount.into()
        );
        assert_eq!(
            account.record_stake(&pool, 100, 4, T0).unwrap_err(),
            StakingError::InvalidTier.into()
        );
        assert!(!account.is_active);
    }

    #[test]
    fn test_pending_rewards_per_tier() {
        let pool = get_fixture_pool(false);
        let expected = [285, 357, 714, 1071];
        for (tier, want) in expected.iter().enumerate() {
            let mut account = get_fixture_account();
            account.record_stake(&pool, 100_000, tier as u8, T0).unwrap();
            assert_eq!(account.pending_rewards(&pool, T0).unwrap(), 0);
            assert_eq!(account.pending_rewards(&pool, T0 + DAY).unwrap(), *want);
        }
    }

    #[test]
    fn test_merge_rolls_reward_forward() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();

        assert!(account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap());
        let opened = account
            .record_stake(&pool, 50_000, tier::BASE, T0 + 2 * DAY)
            .unwrap();
        assert!(!opened);

        assert_eq!(account.total_staked, 150_000);
        // 2 days on 100_000 at 2%/week
        assert_eq!(account.accrued_rewards, 571);
        assert_eq!(account.stake_timestamp, T0 + 2 * DAY);
        assert_eq!(account.lock_start_time, T0 + 2 * DAY);
        assert_eq!(account.pending_rewards(&pool, T0 + 2 * DAY).unwrap(), 571);
        // one more day on the merged balance: 150_000 * 200 / 70_000
        assert_eq!(account.pending_rewards(&pool, T0 + 3 * DAY).unwrap(), 571 + 428);
    }

    #[test]
    fn test_merge_under_other_tier_fails() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100, tier::BASE, T0).unwrap();
        assert_eq!(
            account.record_stake(&pool, 100, tier::GOLD, T0).unwrap_err(),
            StakingError::CannotChangeTier.into()
        );
        assert_eq!(account.total_staked, 100);
    }

    #[test]
    fn test_claim_advances_checkpoint() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();

        let paid = account.record_claim(&pool, T0 + DAY).unwrap();
        assert_eq!(paid, 285);
        assert_eq!(account.stake_timestamp, T0 + DAY);
        assert_eq!(account.total_staked, 100_000);
        assert!(account.is_active);
        assert_eq!(account.pending_rewards(&pool, T0 + DAY).unwrap(), 0);
    }

    #[test]
    fn test_claim_nothing_is_noop() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();

        assert_eq!(account.record_claim(&pool, T0 + DAY - 1).unwrap(), 0);
        assert_eq!(account.stake_timestamp, T0);
        assert_eq!(account.pending_rewards(&pool, T0 + DAY).unwrap(), 285);
    }

    #[test]
    fn test_unstake_before_maturity_gated() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();

        assert_eq!(
            account.record_unstake(&pool, T0 + DAY).unwrap_err(),
            StakingError::LockNotExpired.into()
        );
        assert!(account.is_active);
    }

    #[test]
    fn test_forced_unstake_applies_penalty() {
        let pool = get_fixture_pool(true);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();

        let s = account.record_unstake(&pool, T0 + DAY).unwrap();
        assert_eq!(s.reward, 285);
        // 100_285 * 10% * 29/30
        assert_eq!(s.fee, 9_694);
        assert_eq!(s.payout, 100_000 + 285 - 9_694);
        assert!(s.payout < s.principal + s.reward);
        assert!(!account.is_active);
    }

    #[test]
    fn test_unstake_after_maturity_has_no_penalty() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();

        let s = account.record_unstake(&pool, T0 + 31 * DAY).unwrap();
        assert_eq!(s.reward, 8_857);
        assert_eq!(s.fee, 0);
        assert_eq!(s.payout, 108_857);
    }

    #[test]
    fn test_unstake_twice_fails() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();
        account.record_unstake(&pool, T0 + 31 * DAY).unwrap();

        assert_eq!(
            account.record_unstake(&pool, T0 + 32 * DAY).unwrap_err(),
            StakingError::AlreadyUnstaked.into()
        );
        assert_eq!(
            account.record_claim(&pool, T0 + 32 * DAY).unwrap_err(),
            StakingError::AlreadyUnstaked.into()
        );
        assert_eq!(account.pending_rewards(&pool, T0 + 5_000 * DAY).unwrap(), 0);
    }

    #[test]
    fn test_restake_after_close_starts_fresh() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();
        account.record_unstake(&pool, T0 + 31 * DAY).unwrap();

        let opened = account
            .record_stake(&pool, 10, tier::GOLD, T0 + 40 * DAY)
            .unwrap();
        assert!(opened);
        assert_eq!(account.total_staked, 10);
        assert_eq!(account.lock_tier, tier::GOLD);
        assert_eq!(account.accrued_rewards, 0);
    }

    #[test]
    fn test_claim_then_forced_unstake_conserves_payout() {
        let pool = get_fixture_pool(true);
        let now = T0 + DAY;

        let mut direct = get_fixture_account();
        direct.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();
        let s = direct.record_unstake(&pool, now).unwrap();
        assert_eq!(s.payout, 90_591);

        let mut split = get_fixture_account();
        split.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();
        let claimed = split.record_claim(&pool, now).unwrap();
        assert_eq!(claimed, 285);
        assert_eq!(split.lock_rewards_claimed, 285);
        let s = split.record_unstake(&pool, now).unwrap();
        assert_eq!(s.fee, 9_694);
        assert_eq!(s.reward_paid, 0);
        assert_eq!(s.forfeited_principal, 9_694);
        assert_eq!(claimed + s.payout, 90_591);
        assert_eq!(split.lock_rewards_claimed, 0);
    }

    #[test]
    fn test_merge_resets_lock_claims() {
        let pool = get_fixture_pool(true);
        let mut account = get_fixture_account();
        account.record_stake(&pool, 100_000, tier::BASE, T0).unwrap();
        account.record_claim(&pool, T0 + DAY).unwrap();
        assert_eq!(account.lock_rewards_claimed, 285);

        account
            .record_stake(&pool, 100_000, tier::BASE, T0 + DAY)
            .unwrap();
        assert_eq!(account.lock_rewards_claimed, 0);

        // Fresh 30-day lock on 200_000 with nothing accrued yet
        let s = account.record_unstake(&pool, T0 + DAY).unwrap();
        assert_eq!(s.fee, 20_000);
    }

    #[test]
    fn test_empty_info() {
        let pool = get_fixture_pool(false);
        let owner = Pubkey::new_unique();
        let info = UserInfo::empty(owner, &pool);
        assert_eq!(info.owner, owner);
        assert_eq!(info.pending_rewards, 0);
        assert_eq!(info.position_count, 0);
        assert_eq!(info.bonus_multiplier, BONUS_SCALE);
        assert!(!info.is_active);
    }

    #[test]
    fn test_info_snapshot() {
        let pool = get_fixture_pool(false);
        let mut account = get_fixture_account();
        account.next_position_index().unwrap();
        account.record_stake(&pool, 100_000, tier::SILVER, T0).unwrap();

        let info = account.info(&pool, T0 + DAY).unwrap();
        assert_eq!(info.total_staked, 100_000);
        assert_eq!(info.pending_rewards, 714);
        assert_eq!(info.maturity, T0 + 180 * DAY);
        assert_eq!(info.bonus_multiplier, BONUS_SCALE);
        assert_eq!(info.position_count, 1);
    }
}
