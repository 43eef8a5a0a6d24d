//! Error types for the Tier Staking program.
//!
//! Every failure aborts the whole instruction; the runtime rolls back all
//! account writes and token transfers made before the error.
//!
//! ## Error Groups
//! - 6000-6006: Input validation errors
//! - 6007-6010: State/balance errors
//! - 6011: Time/lock errors
//! - 6012: Math/overflow errors
//! - 6013: Authorization errors
//! - 6014-6018: Account validation errors
//! - 6019: Admin input errors

use anchor_lang::prelude::*;

/// Custom error codes for the Tier Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Input Validation Errors (6000-6006) ==========

    /// [6000] Stake amount is zero or otherwise unusable.
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    /// [6001] Unsupported lock selector.
    #[msg("Invalid lock selector (tier must be 0-3, lock days 1-365)")]
    InvalidTier,

    /// [6002] A configured rate exceeds its ceiling.
    #[msg("Reward rate exceeds the maximum allowed value")]
    RateTooHigh,

    /// [6003] A configured penalty exceeds 100%.
    #[msg("Penalty exceeds 10000 basis points")]
    PenaltyTooHigh,

    /// [6004] Accrual horizon shorter than the tier's lock.
    #[msg("Accrual horizon must be zero or at least the lock period")]
    InvalidAccrualHorizon,

    /// [6005] Bonus thresholds or multipliers are not ordered.
    #[msg("Bonus schedule must be ordered and at least 1.0x")]
    InvalidBonusSchedule,

    /// [6006] The position index is not the owner's next free slot.
    #[msg("Position index does not match the owner's stake count")]
    PositionIndexMismatch,

    // ========== State/Balance Errors (6007-6010) ==========

    /// [6007] The position or account has already been closed.
    #[msg("Already unstaked")]
    AlreadyUnstaked,

    /// [6008] Cannot merge a stake under a different tier.
    #[msg("Cannot change tier with active stake - unstake first")]
    CannotChangeTier,

    /// [6009] The caller cannot cover the stake amount.
    #[msg("Insufficient token balance or allowance")]
    InsufficientAllowanceOrBalance,

    /// [6010] The treasury does not have enough funds for the reward payout.
    #[msg("Insufficient treasury funds for reward payout")]
    InsufficientTreasuryFunds,

    // ========== Time/Lock Errors (6011) ==========

    /// [6011] Early withdrawal while the force-unstake gate is closed.
    #[msg("Lock period has not ended and early unstake is disabled")]
    LockNotExpired,

    // ========== Math/Overflow Errors (6012) ==========

    /// [6012] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Authorization Errors (6013) ==========

    /// [6013] Unauthorized - caller is not the admin.
    #[msg("Unauthorized: caller is not the pool admin")]
    Unauthorized,

    // ========== Account Validation Errors (6014-6018) ==========

    /// [6014] The provided mint does not match the pool's staking token.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// [6015] The provided treasury does not match the pool's treasury vault.
    #[msg("Treasury vault address mismatch")]
    TreasuryMismatch,

    /// [6016] Vault owner is not the stake pool PDA.
    #[msg("Vault owner must be the stake pool PDA")]
    InvalidVaultOwner,

    /// [6017] Treasury owner is not the stake pool PDA.
    #[msg("Treasury owner must be the stake pool PDA")]
    InvalidTreasuryOwner,

    /// [6018] Token account mint does not match expected mint.
    #[msg("Token account mint does not match pool staking mint")]
    InvalidTokenAccountMint,

    // ========== Admin Input Errors (6019) ==========

    /// [6019] New authority is the default (all-zero) address.
    #[msg("New authority must not be the default address")]
    InvalidAuthority,
}
