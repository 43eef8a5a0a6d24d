//! Amount-tiered bonus multiplier.
//!
//! Larger stakes earn a step-up multiplier on their base accrual rate. The
//! multiplier depends on the staked amount only, never on time or tier.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;

/// Ordered bonus thresholds, multipliers scaled by [`BONUS_SCALE`].
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct BonusSchedule {
    pub mid_threshold: u64,
    pub mid_multiplier: u32,
    pub high_threshold: u64,
    pub high_multiplier: u32,
}

impl Default for BonusSchedule {
    fn default() -> Self {
        Self {
            mid_threshold: DEFAULT_BONUS_MID_THRESHOLD,
            mid_multiplier: DEFAULT_BONUS_MID_MULTIPLIER,
            high_threshold: DEFAULT_BONUS_HIGH_THRESHOLD,
            high_multiplier: DEFAULT_BONUS_HIGH_MULTIPLIER,
        }
    }
}

impl BonusSchedule {
    /// Checks the schedule is a nondecreasing step function starting at 1.0x.
    pub fn validate(&self) -> Result<()> {
        require!(self.mid_threshold > 0, StakingError::InvalidBonusSchedule);
        require!(
            self.mid_threshold <= self.high_threshold,
            StakingError::InvalidBonusSchedule
        );
        require!(
            u64::from(self.mid_multiplier) >= BONUS_SCALE,
            StakingError::InvalidBonusSchedule
        );
        require!(
            self.mid_multiplier <= self.high_multiplier,
            StakingError::InvalidBonusSchedule
        );
        require!(
            self.high_multiplier <= MAX_BONUS_MULTIPLIER,
            StakingError::InvalidBonusSchedule
        );
        Ok(())
    }
}

/// Bonus multiplier for `amount`, scaled by [`BONUS_SCALE`].
pub fn calculate_bonus(schedule: &BonusSchedule, amount: u64) -> u64 {
    if amount >= schedule.high_threshold {
        u64::from(schedule.high_multiplier)
    } else if amount >= schedule.mid_threshold {
        u64::from(schedule.mid_multiplier)
    } else {
        BONUS_SCALE
    }
}

/// Scales `value` by a bonus multiplier, rounding down.
pub fn apply_bonus(value: u64, multiplier: u64) -> Result<u64> {
    let scaled = (value as u128)
        .checked_mul(multiplier as u128)
        .ok_or(StakingError::MathOverflow)?
        / BONUS_SCALE as u128;
    u64::try_from(scaled).map_err(|_| error!(StakingError::MathOverflow))
}
