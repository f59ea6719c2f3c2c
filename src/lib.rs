//! Spendlog keeps a personal expense ledger.
//!
//! Expenses are recorded with a title, amount, date, priority and author,
//! viewed sorted by several criteria, imported from and exported to CSV, and
//! summed into a running total. The whole record set lives in memory and is
//! persisted as a single JSON blob through an opaque key-value store on
//! every mutation.
//!
//! The entry point is [Ledger], loaded over a [store::KeyValueStore]
//! implementation such as [store::FileStore].

#![warn(missing_docs)]

pub mod csv;
pub mod currency;
mod error;
pub mod export;
pub mod gesture;
pub mod identity;
pub mod import;
pub mod ledger;
pub mod record;
pub mod sort;
pub mod store;

pub use error::Error;
pub use ledger::Ledger;
pub use record::{ExpenseRecord, Priority};
pub use sort::{SortOption, sorted_view};
