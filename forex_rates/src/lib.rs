//! Exchange-rate acquisition pipeline.
//!
//! A conversion round flows through four pieces:
//!
//! - `request` — builds the natural-language prompt for a currency pair and picks the
//!   nominal data source label.
//! - `generator` — the external text-generation call (`TextGenerator`) with an HTTP
//!   chat-completions client, a timeout wrapper and an offline synthetic generator.
//! - `parser` — regex extraction of the main rate, timestamp and comparison rates from
//!   the free-text reply.
//! - `fetcher` — bounded retry loop tying the three together into a `RateQuote`.
#![warn(missing_docs)]
pub mod fetcher;
pub mod generator;
pub mod model;
pub mod parser;
pub mod request;

pub use fetcher::RateFetcher;
pub use generator::TextGenerator;
pub use model::quote::{ComparisonRate, RateQuote};
pub use parser::{ParsedRates, ResponseGrammar};
pub use request::{RateRequest, RateSource};
