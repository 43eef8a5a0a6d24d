//! Events emitted by the Tier Staking program.
//!
//! Indexers reconstruct the ledger from these; `msg!` lines are for humans.

use anchor_lang::prelude::*;

#[event]
pub struct Staked {
    pub owner: Pubkey,
    pub amount: u64,
    pub tier: u8,
    pub total_staked: u64,
    pub accrued_rewards: u64,
    pub timestamp: i64,
}

#[event]
pub struct PositionOpened {
    pub owner: Pubkey,
    pub position_id: u64,
    pub index: u32,
    pub amount: u64,
    pub lock_days: u16,
    pub timestamp: i64,
}

#[event]
pub struct RewardsClaimed {
    pub owner: Pubkey,
    /// `None` for the aggregate stake.
    pub position_id: Option<u64>,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct Unstaked {
    pub owner: Pubkey,
    pub position_id: Option<u64>,
    pub principal: u64,
    pub reward: u64,
    pub penalty: u64,
    pub payout: u64,
    pub timestamp: i64,
}

#[event]
pub struct ForceUnstakeUpdated {
    pub authority: Pubkey,
    pub allowed: bool,
}

#[event]
pub struct PoolConfigUpdated {
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

#[event]
pub struct TreasuryFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub treasury_balance: u64,
}
