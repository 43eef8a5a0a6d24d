//! Program constants for the Tier Staking program.
//!
//! Seeds, time units, fixed-point scales and the default reward/penalty
//! tables. Every rate or threshold here is only a default: the live values
//! are stored in the pool's `PoolConfig` and can be replaced by the admin.

/// Seed for deriving the stake pool PDA
pub const STAKE_POOL_SEED: &[u8] = b"stake_pool";

/// Seed for deriving the per-owner aggregate account PDA
pub const USER_ACCOUNT_SEED: &[u8] = b"user_account";

/// Seed for deriving per-deposit stake position PDAs
pub const STAKE_POSITION_SEED: &[u8] = b"stake_position";

/// Seed for deriving the pool vault PDA
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed for deriving the treasury vault PDA
pub const TREASURY_VAULT_SEED: &[u8] = b"treasury_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days per week, the rate period of aggregate tiers
pub const DAYS_PER_WEEK: u64 = 7;

/// Days per year, the rate period of per-deposit positions
pub const DAYS_PER_YEAR: u64 = 365;

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Fixed-point scale of bonus multipliers (1.0x)
pub const BONUS_SCALE: u64 = 1_000_000;

/// Largest bonus multiplier accepted in a schedule (10x)
pub const MAX_BONUS_MULTIPLIER: u32 = 10_000_000;

/// Number of aggregate lock tiers
pub const TIER_COUNT: usize = 4;

/// Maximum weekly rate for an aggregate tier (20% per week)
pub const MAX_WEEKLY_RATE_BPS: u16 = 2_000;

/// Maximum annual rate for a per-deposit position (500%)
pub const MAX_POSITION_APY_BPS: u16 = 50_000;

/// Shortest lock accepted by `open_position`
pub const MIN_LOCK_DAYS: u16 = 1;

/// Longest lock accepted by `open_position`
pub const MAX_LOCK_DAYS: u16 = 365;

/// Default bonus threshold for the mid multiplier (100k tokens, 9 decimals)
pub const DEFAULT_BONUS_MID_THRESHOLD: u64 = 100_000 * 1_000_000_000;

/// Default mid bonus multiplier (1.1x)
pub const DEFAULT_BONUS_MID_MULTIPLIER: u32 = 1_100_000;

/// Default bonus threshold for the high multiplier (500k tokens, 9 decimals)
pub const DEFAULT_BONUS_HIGH_THRESHOLD: u64 = 500_000 * 1_000_000_000;

/// Default high bonus multiplier (1.2x)
pub const DEFAULT_BONUS_HIGH_MULTIPLIER: u32 = 1_200_000;

/// Default annual rate of a 365-day position (120%)
pub const DEFAULT_POSITION_MAX_APY_BPS: u16 = 12_000;

/// Default day-zero penalty of a per-deposit position (75%)
pub const DEFAULT_POSITION_MAX_PENALTY_BPS: u16 = 7_500;

/// Default aggregate tier table: (lock days, weekly rate bps, max penalty bps, accrual horizon days)
pub const DEFAULT_TIERS: [(u16, u16, u16, u16); TIER_COUNT] = [
    (30, 200, 1_000, 365),
    (90, 250, 1_500, 365),
    (180, 500, 2_100, 365),
    (365, 750, 2_600, 730),
];

/// Aggregate tier selectors
pub mod tier {
    /// Short lock, baseline rate
    pub const BASE: u8 = 0;
    /// 90 day lock
    pub const BRONZE: u8 = 1;
    /// 180 day lock, twice the bronze rate
    pub const SILVER: u8 = 2;
    /// 365 day lock, three times the bronze rate
    pub const GOLD: u8 = 3;
}

/// Seconds in `days` whole days.
pub fn days_to_seconds(days: u16) -> i64 {
    i64::from(days) * SECONDS_PER_DAY
}
