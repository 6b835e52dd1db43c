//! Data model for one interactive conversion.
//!
//! - `request` — `ConversionRequest` and parsing of the typed amount.
pub mod request;
