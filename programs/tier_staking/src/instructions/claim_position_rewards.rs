//! Claim position rewards instruction handler.
//!
//! Pays out the pending reward of one per-deposit position.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody;
use crate::error::StakingError;
use crate::events::RewardsClaimed;
use crate::state::{StakePool, StakePosition};

#[derive(Accounts)]
#[instruction(index: u32)]
pub struct ClaimPositionRewards<'info> {
    /// The position owner.
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

    /// The position whose reward is claimed.
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

    /// Pool's treasury vault, pays out the reward.
    #[account(
        mut,
        constraint = treasury_vault.key() == stake_pool.treasury_vault @ StakingError::TreasuryMismatch
    )]
    pub treasury_vault: Account<'info, TokenAccount>,

    /// Token program for transfers.
    pub token_program: Program<'info, Token>,
}

/// Claim the pending reward of the position at `index`.
///
/// Principal stays locked; only the checkpoint advances.
pub fn handler(ctx: Context<ClaimPositionRewards>, index: u32) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let claimed = ctx
        .accounts
        .position
        .record_claim(&ctx.accounts.stake_pool, now)?;

    if claimed == 0 {
        msg!("No rewards pending on position index {}", index);
        return Ok(());
    }

    require!(
        ctx.accounts.treasury_vault.amount >= claimed,
        StakingError::InsufficientTreasuryFunds
    );

    ctx.accounts.stake_pool.record_reward_paid(claimed, now)?;

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

    let position = &ctx.accounts.position;
    emit!(RewardsClaimed {
        owner: position.owner,
        position_id: Some(position.id),
        amount: claimed,
        timestamp: now,
    });

    msg!("Claimed {} reward tokens from position {}", claimed, position.id);

    Ok(())
}
