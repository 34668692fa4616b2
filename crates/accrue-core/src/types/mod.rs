//! Domain types for deposit bookkeeping.
//!
//! - [`Date`]: Calendar date without time of day
//! - [`Money`]: Amount in integer minor units
//! - [`Rate`]: Annual percentage rate
//! - [`Deposit`]: The deposit record read by the interest engine

mod date;
mod deposit;
mod money;
mod rate;

pub use date::{Date, DATE_FORMAT};
pub use deposit::{Capitalization, Deposit, DepositKind};
pub use money::{Money, MINOR_PER_MAJOR};
pub use rate::Rate;
