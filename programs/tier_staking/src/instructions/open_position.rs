//! Open position instruction handler.
//!
//! Stakes a discrete deposit locked for a chosen number of days. Unlike the
//! aggregate stake, every call creates a new position.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody;
use crate::error::StakingError;
use crate::events::PositionOpened;
use crate::state::{StakePool, StakePosition, UserAccount};

/// Accounts required for opening a position.
///
/// `index` must be the owner's current `position_count`; it is part of the
/// position PDA seeds so clients can derive `user_stakes(owner, index)`.
#[derive(Accounts)]
#[instruction(amount: u64, lock_days: u16, index: u32)]
pub struct OpenPosition<'info> {
    /// The user opening the position.
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

    /// Owner's aggregate account, used here as the position counter.
    #[account(
        init_if_needed,
        payer = user,
        space = UserAccount::LEN,
        seeds = [USER_ACCOUNT_SEED, stake_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_account: Account<'info, UserAccount>,

    /// The new position, addressed by `index`.
    #[account(
        init,
        payer = user,
        space = StakePosition::LEN,
        seeds = [
            STAKE_POSITION_SEED,
            stake_pool.key().as_ref(),
            user.key().as_ref(),
            &index.to_le_bytes()
        ],
        bump
    )]
    pub position: Account<'info, StakePosition>,

    /// The staking token mint.
    pub staking_mint: Account<'info, Mint>,

    /// User's token account for the staking token.
    #[account(
        mut,
        constraint = user_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = user_token_account.owner == user.key()
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Pool's staking vault, receives the deposit.
    #[account(
        mut,
        constraint = staking_vault.key() == stake_pool.staking_vault
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,

    /// Token program for transfers.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar.
    pub rent: Sysvar<'info, Rent>,
}

/// Open a new per-deposit position.
///
/// # Arguments
/// * `ctx` - OpenPosition accounts context
/// * `amount` - Amount of tokens to lock
/// * `lock_days` - Lock length in days (1-365)
/// * `index` - Expected per-owner index of the new position
///
/// # Returns
/// The global id of the new position
pub fn handler(ctx: Context<OpenPosition>, amount: u64, lock_days: u16, index: u32) -> Result<u64> {
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
    require!(
        user_account.position_count == index,
        StakingError::PositionIndexMismatch
    );
    user_account.next_position_index()?;

    let position_id = ctx.accounts.stake_pool.allocate_position_id()?;
    ctx.accounts.position.open(
        &ctx.accounts.stake_pool,
        position_id,
        user_key,
        pool_key,
        index,
        amount,
        lock_days,
        now,
        ctx.bumps.position,
    )?;
    ctx.accounts.stake_pool.record_deposit(amount, now)?;

    // === TOKEN TRANSFER ===

    custody::deposit(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.user_token_account.to_account_info(),
        ctx.accounts.staking_vault.to_account_info(),
        ctx.accounts.user.to_account_info(),
        amount,
    )?;

    emit!(PositionOpened {
        owner: user_key,
        position_id,
        index,
        amount,
        lock_days,
        timestamp: now,
    });

    msg!(
        "Opened position {} (index {}) with {} tokens locked for {} days",
        position_id,
        index,
        amount,
        lock_days
    );

    Ok(position_id)
}
