//! Unstake instruction handler.
//!
//! Closes the caller's aggregate stake, paying principal plus reward minus
//! any early-withdrawal penalty.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody;
use crate::error::StakingError;
use crate::events::Unstaked;
use crate::state::{StakePool, UserAccount};

/// Accounts required for unstaking.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The user unstaking tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = staking_vault,
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

    /// User's token account for receiving the payout.
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

    /// Pool's treasury vault.
    #[account(
        mut,
        constraint = treasury_vault.key() == stake_pool.treasury_vault @ StakingError::TreasuryMismatch
    )]
    pub treasury_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Unstake the whole aggregate position.
///
/// Before the tier's lock matures this fails with `LockNotExpired` unless the
/// admin has enabled force-unstake, in which case the decaying penalty is
/// deducted from the payout.
///
/// # Arguments
/// * `ctx` - Unstake accounts context
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Unstake>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    // === STATE UPDATE ===

    let settlement = ctx
        .accounts
        .user_account
        .record_unstake(&ctx.accounts.stake_pool, now)?;

    require!(
        ctx.accounts.treasury_vault.amount >= settlement.reward_paid,
        StakingError::InsufficientTreasuryFunds
    );

    let stake_pool = &mut ctx.accounts.stake_pool;
    stake_pool.record_exit(
        settlement.principal,
        settlement.reward_paid,
        settlement.fee,
        now,
    )?;
    stake_pool.staker_count = stake_pool.staker_count.saturating_sub(1);

    // === TOKEN TRANSFER ===

    let stake_pool = &ctx.accounts.stake_pool;
    custody::pay_exit(
        custody::ExitAccounts {
            token_program: ctx.accounts.token_program.to_account_info(),
            staking_vault: ctx.accounts.staking_vault.to_account_info(),
            treasury_vault: ctx.accounts.treasury_vault.to_account_info(),
            owner_token_account: ctx.accounts.user_token_account.to_account_info(),
            stake_pool: stake_pool.to_account_info(),
        },
        &stake_pool.staking_mint,
        stake_pool.bump,
        &settlement,
    )?;

    emit!(Unstaked {
        owner: ctx.accounts.user.key(),
        position_id: None,
        principal: settlement.principal,
        reward: settlement.reward,
        penalty: settlement.fee,
        payout: settlement.payout,
        timestamp: now,
    });

    msg!("Unstaked {} tokens", settlement.principal);
    msg!(
        "Reward: {}, penalty: {}, payout: {}",
        settlement.reward,
        settlement.fee,
        settlement.payout
    );

    Ok(())
}
