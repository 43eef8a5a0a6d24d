/// Initialize instruction handler.
///
/// Creates and configures a new staking pool with security validations.
///
/// ## Security Guarantees
/// - Vault and treasury are PDAs owned by the stake pool
/// - Mint address is locked to pool state permanently
/// - Configuration validated before storage

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{PoolConfig, StakePool};

/// Accounts required for pool initialization.
///
/// ## Security Notes
/// - `staking_vault` and `treasury_vault` are PDAs with `stake_pool` as authority
/// - Seeds ensure these accounts cannot be swapped or replaced
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The admin authority that will control the pool.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The stake pool account to be created, one per staking mint.
    #[account(
        init,
        payer = authority,
        space = StakePool::LEN,
        seeds = [STAKE_POOL_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub stake_pool: Account<'info, StakePool>,

    /// The mint for the staking token.
    pub staking_mint: Account<'info, Mint>,

    /// The vault that will hold staked principal.
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, stake_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = stake_pool
    )]
    pub staking_vault: Account<'info, TokenAccount>,

    /// The treasury vault that holds the reward reserve and collected penalties.
    #[account(
        init,
        payer = authority,
        seeds = [TREASURY_VAULT_SEED, stake_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = stake_pool
    )]
    pub treasury_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,

    pub token_program: Program<'info, Token>,

    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new staking pool.
///
/// The force-unstake gate starts closed: positions cannot leave before
/// maturity until the admin opens it.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `config` - Tier table, bonus schedule and per-deposit rate/penalty
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Initialize>, config: PoolConfig) -> Result<()> {
    // === INPUT VALIDATION ===

    config.validate()?;

    // === SECURITY VERIFICATION ===

    require_keys_eq!(
        ctx.accounts.staking_vault.owner,
        ctx.accounts.stake_pool.key(),
        StakingError::InvalidVaultOwner
    );
    require_keys_eq!(
        ctx.accounts.treasury_vault.owner,
        ctx.accounts.stake_pool.key(),
        StakingError::InvalidTreasuryOwner
    );
    require_keys_eq!(
        ctx.accounts.staking_vault.mint,
        ctx.accounts.staking_mint.key(),
        StakingError::InvalidTokenAccountMint
    );
    require_keys_eq!(
        ctx.accounts.treasury_vault.mint,
        ctx.accounts.staking_mint.key(),
        StakingError::InvalidTokenAccountMint
    );

    let stake_pool = &mut ctx.accounts.stake_pool;
    let clock = Clock::get()?;

    // === STATE INITIALIZATION ===

    stake_pool.authority = ctx.accounts.authority.key();
    stake_pool.staking_mint = ctx.accounts.staking_mint.key();
    stake_pool.staking_vault = ctx.accounts.staking_vault.key();
    stake_pool.treasury_vault = ctx.accounts.treasury_vault.key();
    stake_pool.config = config;
    stake_pool.force_unstake_allowed = false;
    stake_pool.next_position_id = 0;
    stake_pool.total_staked = 0;
    stake_pool.total_distributed = 0;
    stake_pool.total_penalties = 0;
    stake_pool.staker_count = 0;
    stake_pool.created_at = clock.unix_timestamp;
    stake_pool.last_updated = clock.unix_timestamp;

    stake_pool.bump = ctx.bumps.stake_pool;
    stake_pool.vault_bump = ctx.bumps.staking_vault;
    stake_pool.treasury_bump = ctx.bumps.treasury_vault;

    msg!("Tier Staking Pool initialized");
    msg!("Admin: {}", ctx.accounts.authority.key());
    msg!("Mint: {}", ctx.accounts.staking_mint.key());
    for (index, tier) in config.tiers.iter().enumerate() {
        msg!(
            "Tier {}: lock {}d, {}bp/week, max penalty {}bp",
            index,
            tier.lock_days,
            tier.weekly_rate_bps,
            tier.max_penalty_bps
        );
    }

    Ok(())
}
