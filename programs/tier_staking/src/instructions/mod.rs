//! Instruction handlers for the Tier Staking program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod claim_position_rewards;
pub mod claim_rewards;
pub mod close_position;
pub mod fund_treasury;
pub mod initialize;
pub mod open_position;
pub mod stake;
pub mod unstake;
pub mod views;

pub use admin::*;
pub use claim_position_rewards::*;
pub use claim_rewards::*;
pub use close_position::*;
pub use fund_treasury::*;
pub use initialize::*;
pub use open_position::*;
pub use stake::*;
pub use unstake::*;
pub use views::*;
