//! # Accrue Ext File
//!
//! File-based collaborators for the Accrue deposit toolkit:
//! - JSON deposit book (`{"deposits": [...]}`)
//! - Plain-text ledger appender for deposit operations
//!
//! Paths are taken as given; `~` expansion belongs to the caller's configuration layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ledger;
mod store;

pub use error::*;
pub use ledger::*;
pub use store::*;
