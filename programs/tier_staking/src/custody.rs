//! Token custody: the only place the program talks to the SPL Token program.
//!
//! Deposits are signed by the staker. Payouts are signed by the stake pool
//! PDA, which owns both the staking vault and the treasury vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::STAKE_POOL_SEED;
use crate::math::ExitSettlement;

/// Pulls `amount` from a staker-owned token account into a pool vault.
pub fn deposit<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let cpi_accounts = Transfer {
        from,
        to,
        authority,
    };
    token::transfer(CpiContext::new(token_program, cpi_accounts), amount)
}

/// Pays `amount` out of a pool vault, signing as the stake pool PDA.
pub fn release<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    stake_pool: AccountInfo<'info>,
    staking_mint: &Pubkey,
    pool_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let bump = [pool_bump];
    let seeds: &[&[u8]] = &[STAKE_POOL_SEED, staking_mint.as_ref(), &bump];
    let signer_seeds = &[seeds];

    let cpi_accounts = Transfer {
        from,
        to,
        authority: stake_pool,
    };
    let cpi_ctx = CpiContext::new_with_signer(token_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)
}

/// Vault accounts an exit settlement moves tokens between.
pub struct ExitAccounts<'info> {
    pub token_program: AccountInfo<'info>,
    pub staking_vault: AccountInfo<'info>,
    pub treasury_vault: AccountInfo<'info>,
    pub owner_token_account: AccountInfo<'info>,
    pub stake_pool: AccountInfo<'info>,
}

/// Pays out an exit: principal and reward to the owner, forfeited principal
/// to the treasury.
pub fn pay_exit<'info>(
    accounts: ExitAccounts<'info>,
    staking_mint: &Pubkey,
    pool_bump: u8,
    settlement: &ExitSettlement,
) -> Result<()> {
    release(
        accounts.token_program.clone(),
        accounts.staking_vault.clone(),
        accounts.owner_token_account.clone(),
        accounts.stake_pool.clone(),
        staking_mint,
        pool_bump,
        settlement.principal_paid,
    )?;
    release(
        accounts.token_program.clone(),
        accounts.staking_vault,
        accounts.treasury_vault.clone(),
        accounts.stake_pool.clone(),
        staking_mint,
        pool_bump,
        settlement.forfeited_principal,
    )?;
    release(
        accounts.token_program,
        accounts.treasury_vault,
        accounts.owner_token_account,
        accounts.stake_pool,
        staking_mint,
        pool_bump,
        settlement.reward_paid,
    )
}
