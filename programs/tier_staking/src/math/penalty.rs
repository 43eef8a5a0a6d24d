//! Early-withdrawal penalty.
//!
//! The fee starts at a lock-specific maximum and decays linearly with the
//! time left until maturity, reaching zero once the lock has matured.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;

/// Lock length and day-zero penalty for one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenaltyTerms {
    pub lock_seconds: i64,
    pub max_penalty_bps: u64,
}

impl PenaltyTerms {
    pub fn maturity(&self, start_time: i64) -> i64 {
        start_time.saturating_add(self.lock_seconds)
    }

    pub fn is_matured(&self, start_time: i64, now: i64) -> bool {
        self.lock_seconds <= 0 || now >= self.maturity(start_time)
    }

    /// Seconds left in the lock, clamped to `[0, lock_seconds]`.
    pub fn remaining_seconds(&self, start_time: i64, now: i64) -> i64 {
        if self.is_matured(start_time, now) {
            return 0;
        }
        self.maturity(start_time)
            .saturating_sub(now)
            .min(self.lock_seconds)
    }
}

/// Fee charged on `amount` (principal plus pending reward) when exiting at `now`.
pub fn early_withdrawal_penalty(
    amount: u64,
    terms: &PenaltyTerms,
    start_time: i64,
    now: i64,
) -> Result<u64> {
    let remaining = terms.remaining_seconds(start_time, now);
    if remaining == 0 || terms.max_penalty_bps == 0 || amount == 0 {
        return Ok(0);
    }

    let fee = (amount as u128)
        .checked_mul(terms.max_penalty_bps as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(remaining as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_div(
            (terms.lock_seconds as u128)
                .checked_mul(BASIS_POINTS_DENOMINATOR as u128)
                .ok_or(StakingError::MathOverflow)?,
        )
        .ok_or(StakingError::MathOverflow)?;

    // max_penalty_bps <= 10000 keeps the fee within `amount`
    let fee = u64::try_from(fee).map_err(|_| error!(StakingError::MathOverflow))?;
    Ok(fee.min(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    const DAY: i64 = SECONDS_PER_DAY;

    fn terms(lock_days: u16, max_penalty_bps: u64) -> PenaltyTerms {
        PenaltyTerms {
            lock_seconds: days_to_seconds(lock_days),
            max_penalty_bps,
        }
    }

    #[test]
    fn test_day_zero_is_max_penalty() {
        let fee = early_withdrawal_penalty(100, &terms(365, 7_500), 0, 0).unwrap();
        assert_eq!(fee, 75);
    }

    #[test]
    fn test_tier_penalties_one_day_in() {
        let amount = 1_000_000;
        let pct: Vec<u64> = DEFAULT_TIERS
            .iter()
            .map(|(lock, _, max_bps, _)| {
                let fee =
                    early_withdrawal_penalty(amount, &terms(*lock, u64::from(*max_bps)), 0, DAY)
                        .unwrap();
                // nearest whole percent
                (fee * 100 + amount / 2) / amount
            })
            .collect();
        assert_eq!(pct, vec![10, 15, 21, 26]);
    }

    #[test]
    fn test_zero_at_and_after_maturity() {
        let t = terms(30, 1_000);
        assert_eq!(early_withdrawal_penalty(100_000, &t, 0, 30 * DAY).unwrap(), 0);
        assert_eq!(early_withdrawal_penalty(100_000, &t, 0, 31 * DAY).unwrap(), 0);
        assert!(t.is_matured(0, 30 * DAY));
        assert!(!t.is_matured(0, 30 * DAY - 1));
    }

    #[test]
    fn test_no_lock_has_no_penalty() {
        let t = PenaltyTerms {
            lock_seconds: 0,
            max_penalty_bps: 10_000,
        };
        assert!(t.is_matured(5, 5));
        assert_eq!(early_withdrawal_penalty(100, &t, 5, 5).unwrap(), 0);
    }

    #[test]
    fn test_clock_before_start_is_capped_at_max() {
        let t = terms(10, 5_000);
        assert_eq!(t.remaining_seconds(100, 0), t.lock_seconds);
        assert_eq!(early_withdrawal_penalty(1_000, &t, 100, 0).unwrap(), 500);
    }

    #[quickcheck]
    fn prop_penalty_never_exceeds_amount(amount: u64, elapsed: u32, max_bps: u16) -> bool {
        let t = terms(90, u64::from(max_bps % 10_001));
        early_withdrawal_penalty(amount, &t, 0, i64::from(elapsed)).unwrap() <= amount
    }

    #[quickcheck]
    fn prop_penalty_decays_with_time(amount: u32, a: u32, b: u32) -> bool {
        let t = terms(180, 2_100);
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let p_early = early_withdrawal_penalty(u64::from(amount), &t, 0, i64::from(early)).unwrap();
        let p_late = early_withdrawal_penalty(u64::from(amount), &t, 0, i64::from(late)).unwrap();
        p_late <= p_early
    }
}
