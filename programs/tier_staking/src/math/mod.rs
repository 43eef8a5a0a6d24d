//! Pure reward arithmetic: bonus, accrual, penalty and exit settlement.
//!
//! Nothing here reads accounts or the clock; callers pass `now` in.

pub mod accrual;
pub mod bonus;
pub mod penalty;
pub mod settlement;

pub use accrual::*;
pub use bonus::*;
pub use penalty::*;
pub use settlement::*;
