//! Read-only projections.
//!
//! These instructions never write state; their results come back through
//! Anchor return data, so clients can `simulate` them.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{PositionInfo, StakePool, StakePosition, UserAccount, UserInfo};

#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,
}

#[derive(Accounts)]
pub struct UserAccountView<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// CHECK: only used as a PDA seed
    pub owner: UncheckedAccount<'info>,

    /// Omitted for an owner who has never staked in this pool.
    #[account(
        seeds = [USER_ACCOUNT_SEED, stake_pool.key().as_ref(), owner.key().as_ref()],
        bump = user_account.bump
    )]
    pub user_account: Option<Account<'info, UserAccount>>,
}

#[derive(Accounts)]
#[instruction(index: u32)]
pub struct PositionView<'info> {
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// CHECK: only used as a PDA seed
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [
            STAKE_POSITION_SEED,
            stake_pool.key().as_ref(),
            owner.key().as_ref(),
            &index.to_le_bytes()
        ],
        bump = position.bump
    )]
    pub position: Account<'info, StakePosition>,
}

pub fn calculate_bonus_handler(ctx: Context<PoolView>, amount: u64) -> Result<u64> {
    Ok(ctx.accounts.stake_pool.calculate_bonus(amount))
}

pub fn pool_owner_handler(ctx: Context<PoolView>) -> Result<Pubkey> {
    Ok(ctx.accounts.stake_pool.authority)
}

pub fn calculate_pending_rewards_handler(ctx: Context<UserAccountView>) -> Result<u64> {
    let Some(user_account) = ctx.accounts.user_account.as_ref() else {
        return Ok(0);
    };
    let now = Clock::get()?.unix_timestamp;
    user_account.pending_rewards(&ctx.accounts.stake_pool, now)
}

pub fn user_info_handler(ctx: Context<UserAccountView>) -> Result<UserInfo> {
    let Some(user_account) = ctx.accounts.user_account.as_ref() else {
        return Ok(UserInfo::empty(
            ctx.accounts.owner.key(),
            &ctx.accounts.stake_pool,
        ));
    };
    let now = Clock::get()?.unix_timestamp;
    user_account.info(&ctx.accounts.stake_pool, now)
}

pub fn user_stake_count_handler(ctx: Context<UserAccountView>) -> Result<u32> {
    Ok(ctx
        .accounts
        .user_account
        .as_ref()
        .map_or(0, |user_account| user_account.position_count))
}

pub fn calculate_position_rewards_handler(ctx: Context<PositionView>, _index: u32) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .position
        .pending_rewards(&ctx.accounts.stake_pool, now)
}

pub fn user_stakes_handler(ctx: Context<PositionView>, _index: u32) -> Result<PositionInfo> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.position.info(&ctx.accounts.stake_pool, now)
}
