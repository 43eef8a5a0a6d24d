use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::math::{AccrualTerms, PenaltyTerms};

/// One row of the aggregate lock-tier table.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct TierParams {
    pub lock_days: u16,
    pub weekly_rate_bps: u16,
    pub max_penalty_bps: u16,
    /// Days of accrual from the lock start; 0 means unbounded.
    pub accrual_horizon_days: u16,
}

impl TierParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.weekly_rate_bps <= MAX_WEEKLY_RATE_BPS,
            StakingError::RateTooHigh
        );
        require!(
            u64::from(self.max_penalty_bps) <= BASIS_POINTS_DENOMINATOR,
            StakingError::PenaltyTooHigh
        );
        require!(
            self.accrual_horizon_days == 0 || self.accrual_horizon_days >= self.lock_days,
            StakingError::InvalidAccrualHorizon
        );
        Ok(())
    }

    pub fn accrual_terms(&self) -> AccrualTerms {
        AccrualTerms {
            rate_bps: u64::from(self.weekly_rate_bps),
            rate_period_days: DAYS_PER_WEEK,
            horizon_days: u64::from(self.accrual_horizon_days),
        }
    }

    pub fn penalty_terms(&self) -> PenaltyTerms {
        PenaltyTerms {
            lock_seconds: days_to_seconds(self.lock_days),
            max_penalty_bps: u64::from(self.max_penalty_bps),
        }
    }
}

/// Default tier table built from [`DEFAULT_TIERS`].
pub fn default_tiers() -> [TierParams; TIER_COUNT] {
    DEFAULT_TIERS.map(
        |(lock_days, weekly_rate_bps, max_penalty_bps, accrual_horizon_days)| TierParams {
            lock_days,
            weekly_rate_bps,
            max_penalty_bps,
            accrual_horizon_days,
        },
    )
}
