use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::math::{calculate_bonus, AccrualTerms, BonusSchedule, PenaltyTerms};
use crate::state::tier::{default_tiers, TierParams};

/// Admin-tunable reward and penalty configuration.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct PoolConfig {
    pub tiers: [TierParams; TIER_COUNT],
    pub bonus: BonusSchedule,
    /// Annual rate of a 365-day position; shorter locks interpolate down to 0.
    pub position_max_apy_bps: u16,
    /// Day-zero penalty of a per-deposit position.
    pub position_max_penalty_bps: u16,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            bonus: BonusSchedule::default(),
            position_max_apy_bps: DEFAULT_POSITION_MAX_APY_BPS,
            position_max_penalty_bps: DEFAULT_POSITION_MAX_PENALTY_BPS,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<()> {
        for tier in self.tiers.iter() {
            tier.validate()?;
        }
        self.bonus.validate()?;
        require!(
            self.position_max_apy_bps <= MAX_POSITION_APY_BPS,
            StakingError::RateTooHigh
        );
        require!(
            u64::from(self.position_max_penalty_bps) <= BASIS_POINTS_DENOMINATOR,
            StakingError::PenaltyTooHigh
        );
        Ok(())
    }

    pub fn tier(&self, tier: u8) -> Result<&TierParams> {
        self.tiers
            .get(tier as usize)
            .ok_or_else(|| error!(StakingError::InvalidTier))
    }

    pub fn validate_lock_days(lock_days: u16) -> Result<()> {
        require!(
            (MIN_LOCK_DAYS..=MAX_LOCK_DAYS).contains(&lock_days),
            StakingError::InvalidTier
        );
        Ok(())
    }

    /// Annual rate for a per-deposit lock, linear from 0 at one day to the maximum.
    pub fn position_apy_bps(&self, lock_days: u16) -> Result<u64> {
        Self::validate_lock_days(lock_days)?;
        let span = u64::from(MAX_LOCK_DAYS - MIN_LOCK_DAYS);
        let steps = u64::from(lock_days - MIN_LOCK_DAYS);
        Ok(u64::from(self.position_max_apy_bps) * steps / span)
    }

    pub fn position_accrual_terms(&self, lock_days: u16) -> Result<AccrualTerms> {
        Ok(AccrualTerms {
            rate_bps: self.position_apy_bps(lock_days)?,
            rate_period_days: DAYS_PER_YEAR,
            horizon_days: 0,
        })
    }

    pub fn position_penalty_terms(&self, lock_days: u16) -> Result<PenaltyTerms> {
        Self::validate_lock_days(lock_days)?;
        Ok(PenaltyTerms {
            lock_seconds: days_to_seconds(lock_days),
            max_penalty_bps: u64::from(self.position_max_penalty_bps),
        })
    }
}

#[account]
#[derive(InitSpace)]
pub struct StakePool {
    pub authority: Pubkey,
    pub staking_mint: Pubkey,
    pub staking_vault: Pubkey,
    pub treasury_vault: Pubkey,

    pub config: PoolConfig,
    pub force_unstake_allowed: bool,

    pub next_position_id: u64,
    pub total_staked: u64,
    pub total_distributed: u64,
    pub total_penalties: u64,
    pub staker_count: u64,

    pub last_updated: i64,
    pub created_at: i64,

    pub vault_bump: u8,
    pub treasury_bump: u8,
    pub bump: u8,
}

impl StakePool {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    pub fn calculate_bonus(&self, amount: u64) -> u64 {
        calculate_bonus(&self.config.bonus, amount)
    }

    /// Hands out the next global position id.
    pub fn allocate_position_id(&mut self) -> Result<u64> {
        let id = self.next_position_id;
        self.next_position_id = id.checked_add(1).ok_or(StakingError::MathOverflow)?;
        Ok(id)
    }

    pub fn record_deposit(&mut self, amount: u64, now: i64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.last_updated = now;
        Ok(())
    }

    pub fn record_reward_paid(&mut self, reward: u64, now: i64) -> Result<()> {
        self.total_distributed = self
            .total_distributed
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;
        self.last_updated = now;
        Ok(())
    }

    pub fn record_exit(&mut self, principal: u64, reward_paid: u64, fee: u64, now: i64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(principal)
            .ok_or(StakingError::MathOverflow)?;
        self.total_penalties = self
            .total_penalties
            .checked_add(fee)
            .ok_or(StakingError::MathOverflow)?;
        self.record_reward_paid(reward_paid, now)
    }

    /// Hands admin rights to `new_authority` and returns the previous admin.
    pub fn transfer_authority(&mut self, new_authority: Pubkey, now: i64) -> Result<Pubkey> {
        require!(
            new_authority != Pubkey::default(),
            StakingError::InvalidAuthority
        );
        let old_authority = self.authority;
        self.authority = new_authority;
        self.last_updated = now;
        Ok(old_authority)
    }
}
