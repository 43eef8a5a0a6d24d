//! State structures for the Tier Staking program.
//!
//! This module defines all account structures used to store program state.

pub mod stake_pool;
pub mod stake_position;
pub mod tier;
pub mod user_account;

pub use stake_pool::*;
pub use stake_position::*;
pub use tier::*;
pub use user_account::*;
