//! Domain models produced by the rate pipeline.
//!
//! - `quote` — `RateQuote`, the structured result of one successful acquisition.

pub mod quote;
