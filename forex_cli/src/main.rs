//! Forex converter — an interactive CLI that converts an amount between national
//! currencies and the top ten cryptocurrencies using a live rate obtained from a
//! text-generation service.
//!
//! Usage example (CLI):
//! ```bash
//! OPENAI_API_KEY=sk-... forex --data-file ./data/country_currency_dictionary.json
//! forex --offline
//! ```
//!
//! Each round asks for the source and target currency (country name, alias or ISO
//! code), the amount, and a confirmation, then prints the conversion with comparison
//! rates. A failed rate lookup aborts only that round.
#![warn(missing_docs)]
mod args;
mod console;
mod formatter;
mod model;
mod session;

use crate::args::Args;
use crate::console::Console;
use clap::Parser;
use forex_common::ConverterError;
use forex_common::CurrencyDirectory;
use forex_common::Result;
use forex_rates::RateFetcher;
use forex_rates::generator::{
    BoundedGenerator, ChatCompletionsClient, SyntheticGenerator, TextGenerator,
};
use log::{error, info, warn};
use std::io;
use std::sync::Arc;

/// Builds the generator selected by the arguments, bounded by the configured timeout.
fn build_generator(args: &Args) -> Result<BoundedGenerator> {
    let inner: Arc<dyn TextGenerator> = if args.offline {
        warn!("Offline mode: rates come from the built-in reference table, not a live service.");
        Arc::new(SyntheticGenerator::new())
    } else {
        let api_key = args.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            ConverterError::Generation(
                "No API key configured; set OPENAI_API_KEY, pass --api-key, or use --offline"
                    .to_string(),
            )
        })?;
        info!("Using model {} at {}", args.model, args.api_base);
        Arc::new(
            ChatCompletionsClient::new(api_key, &args.model, args.timeout())?
                .with_api_base(&args.api_base)
                .with_temperature(0.0),
        )
    };
    Ok(BoundedGenerator::new(inner, args.call_bound()))
}

fn main() -> Result<(), ConverterError> {
    init_logger();
    let args = Args::parse();

    let mut console = Console::new(io::stdin().lock(), io::stdout());
    console.introduction()?;

    let directory = CurrencyDirectory::load(&args.data_file).map_err(|e| {
        error!("Could not load currency data from {}: {}", args.data_file.display(), e);
        e
    })?;
    info!("International currency data loaded ({} currencies).", directory.len());

    let fetcher = RateFetcher::new(build_generator(&args)?).with_max_attempts(args.max_attempts);

    session::run_until_done(&mut console, &directory, &fetcher)?;
    console.farewell()
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
