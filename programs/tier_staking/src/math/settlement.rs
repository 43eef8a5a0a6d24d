//! Exit settlement: how an unstake payout is split across the vaults.
//!
//! The penalty is taken from the reward leg first and from principal only
//! when the reward cannot cover it. Forfeited principal moves to the
//! treasury, where it funds future rewards.

use anchor_lang::prelude::*;

use crate::error::StakingError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExitSettlement {
    pub principal: u64,
    pub reward: u64,
    pub fee: u64,
    /// `principal + reward - fee`
    pub payout: u64,
    /// Paid to the owner from the staking vault.
    pub principal_paid: u64,
    /// Paid to the owner from the treasury vault.
    pub reward_paid: u64,
    /// Moved from the staking vault to the treasury vault.
    pub forfeited_principal: u64,
}

pub fn settle_exit(principal: u64, reward: u64, fee: u64) -> Result<ExitSettlement> {
    let gross = principal
        .checked_add(reward)
        .ok_or(StakingError::MathOverflow)?;
    let payout = gross.checked_sub(fee).ok_or(StakingError::MathOverflow)?;

    let fee_from_reward = fee.min(reward);
    let forfeited_principal = fee - fee_from_reward;

    Ok(ExitSettlement {
        principal,
        reward,
        fee,
        payout,
        principal_paid: principal - forfeited_principal,
        reward_paid: reward - fee_from_reward,
        forfeited_principal,
    })
}
