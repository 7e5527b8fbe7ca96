//! Convert bank, credit card and payment app CSV exports into the CSV layout
//! HomeBank imports.
//!
//! ```rust,ignore
//! use homebank_csv::{Bank, ConverterBuilder};
//!
//! let conversion = ConverterBuilder::new()
//!     .filename("umsaetze.csv")
//!     .bank(Bank::Dkb)
//!     .convert()?;
//! ```

mod builder;
mod types;

pub mod dialect;
pub mod encoding;
pub mod errors;
pub mod header;
pub mod output;
pub mod parsers;
pub mod postprocess;

pub use builder::{Bank, Conversion, ConverterBuilder};
pub use dialect::Dialect;
pub use header::HeaderLocator;
pub use parsers::prelude::*;
pub use postprocess::post_process;
pub use types::{PaymentCode, Record};
