//! Close position instruction handler.
//!
//! Unstakes one per-deposit position. A closed position stays on chain as a
//! record and can never be closed or claimed again.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody;
use crate::error::StakingError;
use crate::events::Unstaked;
use crate::state::{StakePool, StakePosition};

#[derive(Accounts)]
#[instruction(index: u32)]
pub struct ClosePosition<'info> {
    /// The position owner.
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

    /// The position being closed.
    #[account(
        mut,
        seeds = [
            STAKE_POSITION_SEED,
            stake_pool.key().as_ref(),
            user.key().as_ref(),
            &index.to_le_bytes()
        ],
        bump = position.bump,
        constraint = position.owner == user.key() @ StakingError::Unauthorized,
        constraint = position.stake_pool == stake_pool.key()
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

    /// Pool's staking vault, pays out principal.
    #[account(
        mut,
        constraint = staking_vault.key() == stake_pool.staking_vault
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    /// Pool's treasury vault, pays out reward and collects the penalty.
    #[account(
        mut,
        constraint = treasury_vault.key() == stake_pool.treasury_vault @ StakingError::TreasuryMismatch
    )]
    pub treasury_vault: Account<'info, TokenAccount>,

    /// Token program for transfers.
    pub token_program: Program<'info, Token>,
}

/// Close the position at `index`, paying principal plus reward minus penalty.
///
/// # Errors
/// - `AlreadyUnstaked` if the position was closed before
/// - `LockNotExpired` before maturity while force-unstake is disabled
pub fn handler(ctx: Context<ClosePosition>, index: u32) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // === STATE UPDATE ===

    let settlement = ctx
        .accounts
        .position
        .record_close(&ctx.accounts.stake_pool, now)?;

    require!(
        ctx.accounts.treasury_vault.amount >= settlement.reward_paid,
        StakingError::InsufficientTreasuryFunds
    );

    ctx.accounts.stake_pool.record_exit(
        settlement.principal,
        settlement.reward_paid,
        settlement.fee,
        now,
    )?;

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

    let position = &ctx.accounts.position;
    emit!(Unstaked {
        owner: position.owner,
        position_id: Some(position.id),
        principal: settlement.principal,
        reward: settlement.reward,
        penalty: settlement.fee,
        payout: settlement.payout,
        timestamp: now,
    });

    msg!("Closed position {} (index {})", position.id, index);
    msg!(
        "Reward: {}, penalty: {}, payout: {}",
        settlement.reward,
        settlement.fee,
        settlement.payout
    );

    Ok(())
}
