//! Stake instruction handler.
//!
//! Opens or tops up the caller's aggregate stake under one lock tier.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody;
use crate::error::StakingError;
use crate::events::Staked;
use crate::state::{StakePool, UserAccount};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The user staking tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = staking_vault,
        has_one = staking_mint
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// User's aggregate account (created if first time staking).
    #[account(
        init_if_needed,
        payer = user,
        space = UserAccount::LEN,
        seeds = [USER_ACCOUNT_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_account: Account<'info, UserAccount>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for the staking token.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's staking vault.
    #[account(
        mut,
        constraint = staking_vault.key() == stake_pool.staking_vault
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,

    pub token_program: Program<'info, Token>,

    pub rent: Sysvar<'info, Rent>,
}

/// Stake tokens into the caller's aggregate position.
///
/// A second stake under the same tier merges: reward earned so far is
/// carried forward and the checkpoint and lock restart from now.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Amount of tokens to stake
/// * `tier` - Lock tier (0-3)
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Stake>, amount: u64, tier: u8) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);
    require!(
        ctx.accounts.user_token_account.amount >= amount,
        StakingError::InsufficientAllowanceOrBalance
    );

    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let user_key = ctx.accounts.user.key();
    let pool_key = ctx.accounts.stake_pool.key();

    // === STATE UPDATE ===

    let user_account = &mut ctx.accounts.user_account;
    user_account.ensure_initialized(user_key, pool_key, ctx.bumps.user_account);
    let opened = user_account.record_stake(&ctx.accounts.stake_pool, amount, tier, now)?;

    let stake_pool = &mut ctx.accounts.stake_pool;
    stake_pool.record_deposit(amount, now)?;
    if opened {
        stake_pool.staker_count = stake_pool.staker_count.saturating_add(1);
    }

    // === TOKEN TRANSFER ===

    custody::deposit(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.user_token_account.to_account_info(),
        ctx.accounts.staking_vault.to_account_info(),
        ctx.accounts.user.to_account_info(),
        amount,
    )?;

    let user_account = &ctx.accounts.user_account;
    emit!(Staked {
        owner: user_key,
        amount,
        tier,
        total_staked: user_account.total_staked,
        accrued_rewards: user_account.accrued_rewards,
        timestamp: now,
    });

    msg!("Staked {} tokens in tier {}", amount, tier);
    msg!("Total staked by user: {}", user_account.total_staked);

    Ok(())
}
