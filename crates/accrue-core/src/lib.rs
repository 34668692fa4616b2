//! # Accrue Core
//!
//! Core types and abstractions for the Accrue deposit toolkit.
//!
//! This crate provides the foundational building blocks used by the interest
//! engine and its collaborators:
//!
//! - **Types**: `Date`, `Money` (integer minor units), `Rate`, `Deposit`
//! - **Day Count Conventions**: the ACT/365 Fixed and ACT/360 year bases used by banks
//! - **Validation**: creation-time checks for deposit records
//!
//! ## Design Philosophy
//!
//! - **Fixed-point money**: principal is never a float
//! - **Lenient reads, strict writes**: dates degrade to "absent" on read,
//!   while the validator rejects them at creation time
//!
//! ## Example
//!
//! ```rust
//! use accrue_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let principal = Money::from_minor(100_000);
//! assert_eq!(principal.to_major(), dec!(1000.00));
//! assert_eq!(Rate::from_percent(dec!(12)).as_fraction(), dec!(0.12));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod types;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::DayCountConvention;
    pub use crate::error::{AccrueError, AccrueResult};
    pub use crate::types::{Capitalization, Date, Deposit, DepositKind, Money, Rate};
    pub use crate::validation::DepositValidator;
}

// Re-export commonly used types at crate root
pub use error::{AccrueError, AccrueResult};
pub use types::{Capitalization, Date, Deposit, DepositKind, Money, Rate};
