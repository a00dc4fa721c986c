//! Delimited-text table primitives for module exports.
//!
//! This crate models a rectangular table (one header row plus zero or more
//! data rows, all with matching arity) and renders it as RFC 4180 delimited
//! text. It is deliberately independent of backend domain types: callers
//! project their entities into plain string cells and receive text suitable
//! for download.
//!
//! # Example
//!
//! ```
//! use tabular::{Table, format};
//!
//! let mut table = Table::new(["id", "name", "amount"]).expect("non-empty header");
//! table
//!     .push_row(["1".to_owned(), "Cement".to_owned(), format::money(1250.5)])
//!     .expect("matching arity");
//!
//! let text = table.to_csv().expect("rendered");
//! assert_eq!(text, "id,name,amount\n1,Cement,1250.50\n");
//! ```

mod error;
pub mod format;
mod table;

pub use error::TabularError;
pub use table::Table;
