//! Claim rewards instruction handler.
//!
//! Handles claiming accumulated rewards on the aggregate stake without unstaking.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody;
use crate::error::StakingError;
use crate::events::RewardsClaimed;
use crate::state::{StakePool, UserAccount};

/// Accounts required for claiming rewards.
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    /// The user claiming rewards.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = treasury_vault,
        has_one = staking_mint
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// User's aggregate account.
    #[account(
        mut,
        seeds = [USER_ACCOUNT_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump = user_account.bump,
        constraint = user_account.owner == user.key() @ StakingError::Unauthorized,
        constraint = user_account.stake_pool == stake_pool.key()
    )]
    pub user_account: Account<'info, UserAccount>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for receiving rewards.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's treasury vault holding rewards.
    #[account(
        mut,
        constraint = treasury_vault.key() == stake_pool.treasury_vault @ StakingError::TreasuryMismatch
    )]
    pub treasury_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Claim accumulated rewards.
///
/// Pays every reward earned so far, including reward carried forward by a
/// merge, from the treasury vault. Claiming with nothing pending succeeds
/// without touching state.
///
/// # Arguments
/// * `ctx` - ClaimRewards accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<ClaimRewards>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    // === STATE UPDATE ===

    let claimed = ctx
        .accounts
        .user_account
        .record_claim(&ctx.accounts.stake_pool, now)?;

    if claimed == 0 {
        msg!("No rewards pending");
        return Ok(());
    }

    require!(
        ctx.accounts.treasury_vault.amount >= claimed,
        StakingError::InsufficientTreasuryFunds
    );

    ctx.accounts.stake_pool.record_reward_paid(claimed, now)?;

    // === TOKEN TRANSFER ===

    let stake_pool = &ctx.accounts.stake_pool;
    custody::release(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.treasury_vault.to_account_info(),
        ctx.accounts.user_token_account.to_account_info(),
        stake_pool.to_account_info(),
        &stake_pool.staking_mint,
        stake_pool.bump,
        claimed,
    )?;

    emit!(RewardsClaimed {
        owner: ctx.accounts.user.key(),
        position_id: None,
        amount: claimed,
        timestamp: now,
    });

    msg!("Claimed {} reward tokens", claimed);
    msg!(
        "Total rewards claimed by user: {}",
        ctx.accounts.user_account.total_rewards_claimed
    );
    msg!("Total distributed from pool: {}", stake_pool.total_distributed);

    Ok(())
}
