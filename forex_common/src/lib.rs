//!
//! Common types and utilities shared by the rate pipeline and the interactive client.
//!
//! This crate aggregates:
//! - `error` — unified error type `ConverterError` and the response `ParseError`.
//! - `result` — handy `Result<T, ConverterError>` alias.
//! - `currency` — the currency directory loaded from the static JSON table.
//! - `crypto` — the cryptocurrency allow-list shared by prompt building and display.
#![warn(missing_docs)]
pub mod crypto;
pub mod currency;
pub mod error;
pub mod result;

pub use currency::{CurrencyDirectory, CurrencyRecord};
pub use error::{ConverterError, ParseError};
pub use result::Result;
