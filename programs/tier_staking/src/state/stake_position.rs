use anchor_lang::prelude::*;
use anchor_lang::prelude::borsh;

use crate::error::StakingError;
use crate::math::{early_withdrawal_penalty, pending_reward, settle_exit, ExitSettlement};
use crate::state::StakePool;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PositionStatus {
    Active,
    Closed,
}

/// A single deposit locked for `lock_days`. Owners may hold any number of
/// these, addressed by their per-owner `index`.
#[account]
#[derive(InitSpace)]
pub struct StakePosition {
    pub id: u64,
    pub owner: Pubkey,
    pub stake_pool: Pubkey,
    pub index: u32,

    pub principal: u64,
    pub lock_days: u16,
    pub start_time: i64,
    pub last_checkpoint: i64,
    pub status: PositionStatus,
    pub total_rewards_claimed: u64,
    /// Claimed before exit; counted in the early-exit penalty base.
    pub lock_rewards_claimed: u64,

    pub bump: u8,
}

/// Read-only snapshot returned by the `user_stakes` view.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PositionInfo {
    pub id: u64,
    pub owner: Pubkey,
    pub index: u32,
    pub amount: u64,
    pub lock_days: u16,
    pub start_time: i64,
    pub last_checkpoint: i64,
    pub maturity: i64,
    pub pending_rewards: u64,
    pub status: PositionStatus,
}

impl StakePosition {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    pub fn is_active(&self) -> bool {
        self.status == PositionStatus::Active
    }

    /// Initializes a freshly created position account.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        pool: &StakePool,
        id: u64,
        owner: Pubkey,
        stake_pool: Pubkey,
        index: u32,
        principal: u64,
        lock_days: u16,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(principal > 0, StakingError::InvalidAmount);
        pool.config.position_accrual_terms(lock_days)?;

        self.id = id;
        self.owner = owner;
        self.stake_pool = stake_pool;
        self.index = index;
        self.principal = principal;
        self.lock_days = lock_days;
        self.start_time = now;
        self.last_checkpoint = now;
        self.status = PositionStatus::Active;
        self.total_rewards_claimed = 0;
        self.lock_rewards_claimed = 0;
        self.bump = bump;
        Ok(())
    }

    /// Pending reward; 0 once closed no matter how much time passes.
    pub fn pending_rewards(&self, pool: &StakePool, now: i64) -> Result<u64> {
        if !self.is_active() {
            return Ok(0);
        }
        pending_reward(
            self.principal,
            &pool.config.position_accrual_terms(self.lock_days)?,
            pool.calculate_bonus(self.principal),
            self.start_time,
            self.last_checkpoint,
            now,
        )
    }

    pub fn maturity(&self, pool: &StakePool) -> Result<i64> {
        Ok(pool
            .config
            .position_penalty_terms(self.lock_days)?
            .maturity(self.start_time))
    }

    pub fn record_claim(&mut self, pool: &StakePool, now: i64) -> Result<u64> {
        require!(self.is_active(), StakingError::AlreadyUnstaked);

        let reward = self.pending_rewards(pool, now)?;
        if reward == 0 {
            return Ok(0);
        }

        self.last_checkpoint = now;
        self.total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;
        self.lock_rewards_claimed = self
            .lock_rewards_claimed
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;
        Ok(reward)
    }

    /// Moves the position to `Closed` and computes the exit payout.
    pub fn record_close(&mut self, pool: &StakePool, now: i64) -> Result<ExitSettlement> {
        require!(self.is_active(), StakingError::AlreadyUnstaked);

        let penalty_terms = pool.config.position_penalty_terms(self.lock_days)?;
        let reward = self.pending_rewards(pool, now)?;

        let fee = if penalty_terms.is_matured(self.start_time, now) {
            0
        } else {
            require!(pool.force_unstake_allowed, StakingError::LockNotExpired);
            let exit_total = self
                .principal
                .checked_add(reward)
                .ok_or(StakingError::MathOverflow)?;
            let gross = exit_total
                .checked_add(self.lock_rewards_claimed)
                .ok_or(StakingError::MathOverflow)?;
            early_withdrawal_penalty(gross, &penalty_terms, self.start_time, now)?
                .min(exit_total)
        };

        let settlement = settle_exit(self.principal, reward, fee)?;

        self.status = PositionStatus::Closed;
        self.last_checkpoint = now;
        self.total_rewards_claimed = self
            .total_rewards_claimed
            .checked_add(settlement.reward_paid)
            .ok_or(StakingError::MathOverflow)?;

        Ok(settlement)
    }

    pub fn info(&self, pool: &StakePool, now: i64) -> Result<PositionInfo> {
        Ok(PositionInfo {
            id: self.id,
            owner: self.owner,
            index: self.index,
            amount: self.principal,
            lock_days: self.lock_days,
            start_time: self.start_time,
            last_checkpoint: self.last_checkpoint,
            maturity: self.maturity(pool)?,
            pending_rewards: self.pending_rewards(pool, now)?,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::state::PoolConfig;

    const DAY: i64 = SECONDS_PER_DAY;
    const YEAR: i64 = 365 * DAY;

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
            last_updated: 0,
            created_at: 0,
            vault_bump: 255,
            treasury_bump: 254,
            bump: 253,
        }
    }

    fn get_fixture_position(pool: &StakePool, principal: u64, lock_days: u16) -> StakePosition {
        let mut position = StakePosition {
            id: 0,
            owner: Pubkey::default(),
            stake_pool: Pubkey::default(),
            index: 0,
            principal: 0,
            lock_days: 0,
            start_time: 0,
            last_checkpoint: 0,
            status: PositionStatus::Active,
            total_rewards_claimed: 0,
            lock_rewards_claimed: 0,
            bump: 0,
        };
        position
            .open(pool, 0, Pubkey::new_unique(), Pubkey::new_unique(), 0, principal, lock_days, 0, 255)
            .unwrap();
        position
    }

    #[test]
    fn test_open_validates_lock_days() {
        let pool = get_fixture_pool(false);
        let mut position = get_fixture_position(&pool, 100, 30);
        let owner = Pubkey::new_unique();
        assert_eq!(
            position
                .open(&pool, 1, owner, owner, 1, 100, 0, 0, 255)
                .unwrap_err(),
            StakingError::InvalidTier.into()
        );
        assert_eq!(
            position
                .open(&pool, 1, owner, owner, 1, 0, 30, 0, 255)
                .unwrap_err(),
            StakingError::InvalidAmount.into()
        );
    }

    #[test]
    fn test_max_lock_one_year() {
        let pool = get_fixture_pool(false);
        let mut position = get_fixture_position(&pool, 100, 365);

        assert_eq!(position.pending_rewards(&pool, YEAR).unwrap(), 120);
        let s = position.record_close(&pool, YEAR).unwrap();
        assert_eq!(s.payout, 220);
        assert_eq!(s.fee, 0);
    }

    #[test]
    fn test_claim_then_second_year() {
        let pool = get_fixture_pool(false);
        let mut position = get_fixture_position(&pool, 100, 365);

        assert_eq!(position.record_claim(&pool, YEAR).unwrap(), 120);
        assert_eq!(position.pending_rewards(&pool, 2 * YEAR).unwrap(), 120);
        let s = position.record_close(&pool, 2 * YEAR).unwrap();
        assert_eq!(s.payout, 220);
        assert_eq!(position.total_rewards_claimed, 240);
    }

    #[test]
    fn test_short_lock_rates() {
        let pool = get_fixture_pool(false);
        let hundred_days = get_fixture_position(&pool, 100, 100);
        assert_eq!(hundred_days.pending_rewards(&pool, YEAR).unwrap(), 32);

        let mut one_day = get_fixture_position(&pool, 100, 1);
        assert_eq!(one_day.pending_rewards(&pool, YEAR).unwrap(), 0);
        assert_eq!(one_day.record_close(&pool, YEAR).unwrap().payout, 100);
    }

    #[test]
    fn test_day_zero_exit_pays_quarter() {
        let pool = get_fixture_pool(true);
        let mut position = get_fixture_position(&pool, 100, 365);
        assert_eq!(position.pending_rewards(&pool, 0).unwrap(), 0);

        let s = position.record_close(&pool, 0).unwrap();
        assert_eq!(s.payout, 25);
        assert_eq!(s.forfeited_principal, 75);
    }

    #[test]
    fn test_early_exit_gated() {
        let pool = get_fixture_pool(false);
        let mut position = get_fixture_position(&pool, 100, 365);
        assert_eq!(
            position.record_close(&pool, DAY).unwrap_err(),
            StakingError::LockNotExpired.into()
        );
        assert!(position.is_active());
    }

    #[test]
    fn test_closed_position_is_terminal() {
        let pool = get_fixture_pool(false);
        let mut position = get_fixture_position(&pool, 100, 100);
        position.record_close(&pool, YEAR).unwrap();

        assert_eq!(position.status, PositionStatus::Closed);
        assert_eq!(
            position.record_close(&pool, YEAR).unwrap_err(),
            StakingError::AlreadyUnstaked.into()
        );
        assert_eq!(
            position.record_claim(&pool, YEAR).unwrap_err(),
            StakingError::AlreadyUnstaked.into()
        );
        assert_eq!(position.pending_rewards(&pool, YEAR + 10_000 * DAY).unwrap(), 0);
    }

    #[test]
    fn test_claim_and_close_same_day_conserves_payout() {
        let pool = get_fixture_pool(false);
        let mut split = get_fixture_position(&pool, 1_000_000, 200);
        let mut single = split.clone();
        let now = 250 * DAY + 3_600;

        let claimed = split.record_claim(&pool, now).unwrap();
        let closed = split.record_close(&pool, now).unwrap();
        let direct = single.record_close(&pool, now).unwrap();

        assert!(claimed > 0);
        assert_eq!(claimed + closed.payout, direct.payout);
    }

    #[test]
    fn test_claim_and_forced_close_same_day_conserves_payout() {
        let pool = get_fixture_pool(true);
        let mut split = get_fixture_position(&pool, 1_000_000, 365);
        let mut single = split.clone();
        let now = 100 * DAY;

        let direct = single.record_close(&pool, now).unwrap();
        assert_eq!(direct.reward, 328_767);
        // 1_328_767 * 75% * 265/365
        assert_eq!(direct.fee, 723_540);
        assert_eq!(direct.payout, 605_227);

        let claimed = split.record_claim(&pool, now).unwrap();
        assert_eq!(claimed, 328_767);
        let closed = split.record_close(&pool, now).unwrap();
        assert_eq!(closed.fee, 723_540);
        assert_eq!(closed.forfeited_principal, 723_540);
        assert_eq!(claimed + closed.payout, 605_227);
    }

    #[test]
    fn test_bonus_brackets_one_year() {
        let pool = get_fixture_pool(false);

        let mid = get_fixture_position(&pool, DEFAULT_BONUS_MID_THRESHOLD, 365);
        assert_eq!(
            mid.pending_rewards(&pool, YEAR).unwrap(),
            DEFAULT_BONUS_MID_THRESHOLD / 100 * 132
        );

        let high = get_fixture_position(&pool, DEFAULT_BONUS_HIGH_THRESHOLD, 365);
        assert_eq!(
            high.pending_rewards(&pool, YEAR).unwrap(),
            DEFAULT_BONUS_HIGH_THRESHOLD / 100 * 144
        );

        let below = get_fixture_position(&pool, DEFAULT_BONUS_MID_THRESHOLD - 1, 365);
        assert_eq!(
            below.pending_rewards(&pool, YEAR).unwrap(),
            119_999_999_999_998
        );
    }
}
