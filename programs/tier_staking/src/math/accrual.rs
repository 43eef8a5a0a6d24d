//! Time-based reward accrual.
//!
//! Rewards settle in whole days:
//! `reward = principal * rate_bps * bonus * days / (10000 * rate_period_days * BONUS_SCALE)`,
//! truncated once at the end so that partial-token drift does not compound
//! across days.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;

/// Rate and horizon governing accrual for one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccrualTerms {
    /// Rate in basis points earned per `rate_period_days`.
    pub rate_bps: u64,
    /// Length of the rate period in days (7 for weekly, 365 for annual).
    pub rate_period_days: u64,
    /// Days after the lock start during which rewards accrue; 0 is unbounded.
    pub horizon_days: u64,
}

impl AccrualTerms {
    /// Last timestamp that still accrues, if the terms are bounded.
    pub fn accrual_end(&self, start_time: i64) -> Option<i64> {
        if self.horizon_days == 0 {
            return None;
        }
        let horizon = i64::try_from(self.horizon_days)
            .ok()?
            .checked_mul(SECONDS_PER_DAY)?;
        start_time.checked_add(horizon)
    }
}

/// Whole days between `checkpoint` and `now`; 0 if `now` is not later.
pub fn elapsed_days(checkpoint: i64, now: i64) -> u64 {
    let seconds = now.saturating_sub(checkpoint).max(0);
    (seconds / SECONDS_PER_DAY) as u64
}

/// Reward owed for `days` whole days of accrual.
pub fn reward_for_days(
    principal: u64,
    terms: &AccrualTerms,
    bonus_multiplier: u64,
    days: u64,
) -> Result<u64> {
    if principal == 0 || days == 0 || terms.rate_bps == 0 {
        return Ok(0);
    }

    let numerator = (principal as u128)
        .checked_mul(terms.rate_bps as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(bonus_multiplier as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(days as u128)
        .ok_or(StakingError::MathOverflow)?;

    let denominator = (BASIS_POINTS_DENOMINATOR as u128)
        .checked_mul(terms.rate_period_days as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(BONUS_SCALE as u128)
        .ok_or(StakingError::MathOverflow)?;

    let reward = numerator
        .checked_div(denominator)
        .ok_or(StakingError::MathOverflow)?;

    u64::try_from(reward).map_err(|_| error!(StakingError::MathOverflow))
}

/// Reward accrued since `checkpoint`, clamped to the accrual horizon.
///
/// # Arguments
/// * `principal` - Staked amount
/// * `terms` - Rate, rate period and horizon for the position's lock
/// * `bonus_multiplier` - Amount bonus scaled by `BONUS_SCALE`
/// * `start_time` - Lock start, from which the horizon is measured
/// * `checkpoint` - Last settlement time
/// * `now` - Current Unix timestamp
pub fn pending_reward(
    principal: u64,
    terms: &AccrualTerms,
    bonus_multiplier: u64,
    start_time: i64,
    checkpoint: i64,
    now: i64,
) -> Result<u64> {
    let effective_now = match terms.accrual_end(start_time) {
        Some(end) => now.min(end),
        None => now,
    };

    if effective_now <= checkpoint {
        return Ok(0);
    }

    let days = elapsed_days(checkpoint, effective_now);
    reward_for_days(principal, terms, bonus_multiplier, days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    const DAY: i64 = SECONDS_PER_DAY;

    fn weekly(rate_bps: u64, horizon_days: u64) -> AccrualTerms {
        AccrualTerms {
            rate_bps,
            rate_period_days: DAYS_PER_WEEK,
            horizon_days,
        }
    }

    #[test]
    fn test_tier_rates_one_day() {
        let start = 1_700_000_000;
        let now = start + DAY;

        let rewards: Vec<u64> = [200, 250, 500, 750]
            .iter()
            .map(|rate| {
                pending_reward(100_000, &weekly(*rate, 0), BONUS_SCALE, start, start, now).unwrap()
            })
            .collect();

        assert_eq!(rewards, vec![285, 357, 714, 1071]);
    }

    #[test]
    fn test_single_truncation_over_many_days() {
        let start = 0;
        let reward = pending_reward(100_000, &weekly(200, 0), BONUS_SCALE, start, start, 31 * DAY)
            .unwrap();
        // 31 * 285 would be 8835
        assert_eq!(reward, 8857);
    }

    #[test]
    fn test_same_day_is_zero() {
        let start = 1_000;
        let reward =
            pending_reward(100_000, &weekly(750, 0), BONUS_SCALE, start, start, start + DAY - 1)
                .unwrap();
        assert_eq!(reward, 0);
    }

    #[test]
    fn test_now_before_checkpoint_is_zero() {
        let reward = pending_reward(100_000, &weekly(200, 0), BONUS_SCALE, 0, 10 * DAY, 5 * DAY)
            .unwrap();
        assert_eq!(reward, 0);
    }

    #[test]
    fn test_horizon_clamps_accrual() {
        let terms = weekly(200, 10);
        let at_horizon = pending_reward(100_000, &terms, BONUS_SCALE, 0, 0, 10 * DAY).unwrap();
        let far_past = pending_reward(100_000, &terms, BONUS_SCALE, 0, 0, 10_000 * DAY).unwrap();
        assert_eq!(at_horizon, far_past);

        // checkpoint already at the horizon: nothing left to accrue
        let consumed =
            pending_reward(100_000, &terms, BONUS_SCALE, 0, 10 * DAY, 10_000 * DAY).unwrap();
        assert_eq!(consumed, 0);
    }

    #[test]
    fn test_annual_rate_vectors() {
        let annual = |rate_bps| AccrualTerms {
            rate_bps,
            rate_period_days: DAYS_PER_YEAR,
            horizon_days: 0,
        };
        assert_eq!(reward_for_days(100, &annual(12_000), BONUS_SCALE, 365).unwrap(), 120);
        assert_eq!(reward_for_days(100, &annual(3_263), BONUS_SCALE, 365).unwrap(), 32);
        assert_eq!(reward_for_days(100, &annual(0), BONUS_SCALE, 365).unwrap(), 0);
    }

    #[test]
    fn test_bonus_scales_reward() {
        let terms = weekly(700, 0);
        let base = reward_for_days(1_000_000, &terms, BONUS_SCALE, 7).unwrap();
        let boosted = reward_for_days(1_000_000, &terms, 1_200_000, 7).unwrap();
        assert_eq!(base, 70_000);
        assert_eq!(boosted, 84_000);
    }

    #[test]
    fn test_overflow_is_reported() {
        let terms = AccrualTerms {
            rate_bps: u64::MAX,
            rate_period_days: 1,
            horizon_days: 0,
        };
        assert_eq!(
            reward_for_days(u64::MAX, &terms, u64::MAX, u64::MAX).unwrap_err(),
            StakingError::MathOverflow.into()
        );
    }

    #[quickcheck]
    fn prop_reward_nondecreasing_in_time(principal: u32, rate: u16, t1: u32, t2: u32) -> TestResult {
        if rate == 0 {
            return TestResult::discard();
        }
        let terms = weekly(u64::from(rate), 0);
        let (early, late) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        let r1 = pending_reward(principal as u64, &terms, BONUS_SCALE, 0, 0, early as i64 * 97)
            .unwrap();
        let r2 = pending_reward(principal as u64, &terms, BONUS_SCALE, 0, 0, late as i64 * 97)
            .unwrap();
        TestResult::from_bool(r1 <= r2)
    }

    #[quickcheck]
    fn prop_zero_elapsed_days_is_zero(principal: u64, offset: u16) -> bool {
        let offset = i64::from(offset) % DAY;
        pending_reward(principal, &weekly(750, 0), 1_200_000, 0, 0, offset).unwrap() == 0
    }
}
