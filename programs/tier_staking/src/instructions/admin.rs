/// Admin instruction handlers.
///
/// Handles admin-only operations for the staking pool.
///
/// ## Security Guarantees
/// - All admin functions require signer == pool.authority
/// - PDA validation ensures correct pool
/// - Configuration validated before it replaces the live one

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{AuthorityTransferred, ForceUnstakeUpdated, PoolConfigUpdated};
use crate::state::{PoolConfig, StakePool};

/// Accounts required for admin operations.
///
/// ## Security Notes
/// - Authority must be signer
/// - Authority must match stake_pool.authority (has_one constraint)
/// - Pool PDA validated via seeds
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The admin authority.
    #[account(
        mut,
        constraint = authority.key() == stake_pool.authority @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// The stake pool to modify.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = authority @ StakingError::Unauthorized
    )]
    pub stake_pool: Account<'info, StakePool>,
}

/// Open or close the early-withdrawal gate.
///
/// While open, positions may leave before maturity and pay the decaying
/// penalty; while closed, such attempts fail with `LockNotExpired`.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `allowed` - True to permit early withdrawal
pub fn update_force_unstake_allowed_handler(
    ctx: Context<AdminControl>,
    allowed: bool,
) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    let previous = stake_pool.force_unstake_allowed;
    stake_pool.force_unstake_allowed = allowed;
    stake_pool.last_updated = clock.unix_timestamp;

    emit!(ForceUnstakeUpdated {
        authority: ctx.accounts.authority.key(),
        allowed,
    });

    msg!(
        "Force unstake {} (was {})",
        if allowed { "ENABLED" } else { "DISABLED" },
        if previous { "enabled" } else { "disabled" }
    );
    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Replace the tier table, bonus schedule and per-deposit parameters.
///
/// Pending rewards of open stakes are computed against the live config, so a
/// change applies to all unsettled accrual.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `config` - New pool configuration
pub fn update_pool_config_handler(ctx: Context<AdminControl>, config: PoolConfig) -> Result<()> {
    config.validate()?;

    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    for (index, (old, new)) in stake_pool
        .config
        .tiers
        .iter()
        .zip(config.tiers.iter())
        .enumerate()
    {
        if old != new {
            msg!(
                "Tier {}: {}bp/week -> {}bp/week, max penalty {}bp -> {}bp",
                index,
                old.weekly_rate_bps,
                new.weekly_rate_bps,
                old.max_penalty_bps,
                new.max_penalty_bps
            );
        }
    }

    stake_pool.config = config;
    stake_pool.last_updated = clock.unix_timestamp;

    emit!(PoolConfigUpdated {
        authority: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Admin: {}", ctx.accounts.authority.key());

    Ok(())
}

/// Transfer admin authority to a new address.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_authority` - New admin pubkey
pub fn transfer_authority_handler(
    ctx: Context<AdminControl>,
    new_authority: Pubkey,
) -> Result<()> {
    let clock = Clock::get()?;
    let old_authority = ctx
        .accounts
        .stake_pool
        .transfer_authority(new_authority, clock.unix_timestamp)?;

    emit!(AuthorityTransferred {
        old_authority,
        new_authority,
    });

    msg!("Authority transferred: {} -> {}", old_authority, new_authority);

    Ok(())
}
