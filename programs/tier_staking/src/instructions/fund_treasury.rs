/// Fund treasury instruction handler.
///
/// Handles depositing reward tokens into the treasury.
///
/// ## Security Guarantees
/// - Treasury validation ensures correct PDA
/// - Mint validation prevents wrong token deposits
/// - Anyone can fund (no admin restriction)

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody;
use crate::error::StakingError;
use crate::events::TreasuryFunded;
use crate::state::StakePool;

/// Accounts required for funding the treasury.
#[derive(Accounts)]
pub struct FundTreasury<'info> {
    /// The funder (anyone can fund - no admin restriction).
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.staking_mint.as_ref()],
        bump = stake_pool.bump,
        has_one = treasury_vault @ StakingError::TreasuryMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub stake_pool: Account<'info, StakePool>,

    pub staking_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = funder_token_account.mint == staking_mint.key() @ StakingError::MintMismatch,
        constraint = funder_token_account.owner == funder.key() @ StakingError::Unauthorized
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_vault.owner == stake_pool.key() @ StakingError::InvalidTreasuryOwner,
        constraint = treasury_vault.mint == staking_mint.key() @ StakingError::InvalidTokenAccountMint
    )]
    pub treasury_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Fund the treasury with reward tokens.
///
/// # Arguments
/// * `ctx` - FundTreasury accounts context
/// * `amount` - Amount of tokens to fund
pub fn handler(ctx: Context<FundTreasury>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);
    require!(
        ctx.accounts.funder_token_account.amount >= amount,
        StakingError::InsufficientAllowanceOrBalance
    );

    let clock = Clock::get()?;
    ctx.accounts.stake_pool.last_updated = clock.unix_timestamp;

    custody::deposit(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.funder_token_account.to_account_info(),
        ctx.accounts.treasury_vault.to_account_info(),
        ctx.accounts.funder.to_account_info(),
        amount,
    )?;

    // Reload treasury to get updated balance
    ctx.accounts.treasury_vault.reload()?;
    let treasury_balance = ctx.accounts.treasury_vault.amount;

    emit!(TreasuryFunded {
        funder: ctx.accounts.funder.key(),
        amount,
        treasury_balance,
    });

    msg!("Treasury funded with {} tokens", amount);
    msg!("New treasury balance: {}", treasury_balance);

    Ok(())
}
