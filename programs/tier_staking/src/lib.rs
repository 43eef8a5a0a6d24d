//! # Tier Staking Program
//!
//! A single-token, time-locked staking program with two ledgers sharing one
//! pool, one staking vault and one reward treasury:
//!
//! - **Aggregate stake**: one account per owner. Deposits merge into it, each
//!   top-up restarts the lock, and the tier is fixed while principal remains.
//!   Four tiers (Base, Bronze, Silver, Gold) set the lock, the weekly rate, the
//!   maximum early-exit penalty and the accrual horizon.
//! - **Positions**: one account per deposit with its own lock of 1-365 days
//!   and an APY that scales with the lock length.
//!
//! ## Features
//! - Daily linear accrual with an amount-based bonus multiplier
//! - Claim rewards without unstaking
//! - Early exit behind an admin gate, with a penalty that decays to zero at
//!   maturity
//! - Treasury-funded rewards; penalties flow back into the treasury
//! - Read-only views returned through Anchor return data

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod custody;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;
use state::{PoolConfig, PositionInfo, UserInfo};

#[program]
pub mod tier_staking {
    use super::*;

    /// Initializes the staking pool with the given configuration.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `config` - Tier table, bonus schedule and per-deposit parameters
    ///
    /// # Errors
    /// Returns an error if any rate, penalty, horizon or bonus bracket is out
    /// of range, or if the vaults are not owned by the pool.
    pub fn initialize(ctx: Context<Initialize>, config: PoolConfig) -> Result<()> {
        instructions::initialize::handler(ctx, config)
    }

    /// Stakes tokens into the caller's aggregate account.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `amount` - Amount of tokens to stake
    /// * `tier` - Staking tier (0 = Base, 1 = Bronze, 2 = Silver, 3 = Gold)
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Invalid tier specified
    /// - Tier differs from the one of an existing stake
    /// - Insufficient balance
    pub fn stake(ctx: Context<Stake>, amount: u64, tier: u8) -> Result<()> {
        instructions::stake::handler(ctx, amount, tier)
    }

    /// Claims accumulated aggregate rewards without unstaking.
    ///
    /// # Errors
    /// Returns an error if the treasury cannot cover the reward.
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards::handler(ctx)
    }

    /// Withdraws the whole aggregate stake together with its rewards.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Nothing is staked
    /// - The lock has not ended and early withdrawal is disabled
    /// - The treasury cannot cover the reward
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::handler(ctx)
    }

    /// Opens a new per-deposit position and returns its id.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for the deposit
    /// * `amount` - Amount of tokens to lock
    /// * `lock_days` - Lock length in days (1-365)
    /// * `index` - The caller's next position index
    pub fn open_position(
        ctx: Context<OpenPosition>,
        amount: u64,
        lock_days: u16,
        index: u32,
    ) -> Result<u64> {
        instructions::open_position::handler(ctx, amount, lock_days, index)
    }

    /// Claims the accrued reward of one position.
    pub fn claim_position_rewards(ctx: Context<ClaimPositionRewards>, index: u32) -> Result<()> {
        instructions::claim_position_rewards::handler(ctx, index)
    }

    /// Closes one position, paying principal and reward minus any penalty.
    ///
    /// # Errors
    /// Returns `AlreadyUnstaked` if the position is already closed.
    pub fn close_position(ctx: Context<ClosePosition>, index: u32) -> Result<()> {
        instructions::close_position::handler(ctx, index)
    }

    /// Admin function to enable or disable early withdrawal.
    ///
    /// # Errors
    /// Returns an error if caller is not the admin.
    pub fn update_force_unstake_allowed(ctx: Context<AdminControl>, allowed: bool) -> Result<()> {
        instructions::admin::update_force_unstake_allowed_handler(ctx, allowed)
    }

    /// Admin function to replace the pool configuration.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - The new configuration fails validation
    pub fn update_pool_config(ctx: Context<AdminControl>, config: PoolConfig) -> Result<()> {
        instructions::admin::update_pool_config_handler(ctx, config)
    }

    /// Admin function to transfer authority to a new address.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the current admin
    /// - New authority is zero address
    pub fn transfer_authority(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::transfer_authority_handler(ctx, new_authority)
    }

    /// Funds the reward treasury.
    ///
    /// # Errors
    /// Returns an error if amount is zero or insufficient balance.
    pub fn fund_treasury(ctx: Context<FundTreasury>, amount: u64) -> Result<()> {
        instructions::fund_treasury::handler(ctx, amount)
    }

    /// Bonus multiplier (scaled by 1e6) for a stake of `amount`.
    pub fn calculate_bonus(ctx: Context<PoolView>, amount: u64) -> Result<u64> {
        instructions::views::calculate_bonus_handler(ctx, amount)
    }

    /// Current pool authority.
    pub fn pool_owner(ctx: Context<PoolView>) -> Result<Pubkey> {
        instructions::views::pool_owner_handler(ctx)
    }

    /// Claimable reward of an owner's aggregate stake.
    pub fn calculate_pending_rewards(ctx: Context<UserAccountView>) -> Result<u64> {
        instructions::views::calculate_pending_rewards_handler(ctx)
    }

    /// Snapshot of an owner's aggregate stake.
    pub fn user_info(ctx: Context<UserAccountView>) -> Result<UserInfo> {
        instructions::views::user_info_handler(ctx)
    }

    /// Number of positions an owner has opened.
    pub fn user_stake_count(ctx: Context<UserAccountView>) -> Result<u32> {
        instructions::views::user_stake_count_handler(ctx)
    }

    /// Claimable reward of one position.
    pub fn calculate_position_rewards(ctx: Context<PositionView>, index: u32) -> Result<u64> {
        instructions::views::calculate_position_rewards_handler(ctx, index)
    }

    /// Snapshot of one position.
    pub fn user_stakes(ctx: Context<PositionView>, index: u32) -> Result<PositionInfo> {
        instructions::views::user_stakes_handler(ctx, index)
    }
}
