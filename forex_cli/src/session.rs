//! The interactive conversion loop.
use std::io::{BufRead, Write};

use chrono::Local;
use forex_common::currency::CurrencyDirectory;
use forex_common::error::ConverterError;
use forex_common::result::Result;
use forex_rates::{RateFetcher, TextGenerator};
use log::{error, info};

use crate::console::Console;
use crate::formatter::ConversionReport;
use crate::model::request::ConversionRequest;

/// Fetches a quote for `request` and renders the report.
///
/// Any failure here aborts only this conversion.
pub fn convert<G: TextGenerator>(
    request: &ConversionRequest,
    directory: &CurrencyDirectory,
    fetcher: &RateFetcher<G>,
) -> Result<String> {
    let quote = fetcher.fetch(&request.rate_request())?;
    let report = ConversionReport::new(request, &quote, directory)?;
    let printed_at = Local::now().format("%B %-d, %Y %H:%M:%S").to_string();
    Ok(report.render(&printed_at))
}

/// Runs conversions until the user declines another one.
///
/// Returns `ConverterError::InputClosed` if input ends mid-dialogue.
pub fn run<R, W, G>(
    console: &mut Console<R, W>,
    directory: &CurrencyDirectory,
    fetcher: &RateFetcher<G>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    G: TextGenerator,
{
    loop {
        let source = console.ask_currency(
            "\nWhat is the name of the country/currency to convert FROM? ",
            directory,
        )?;
        let target = console.ask_currency(
            "What is the name of the country/currency to convert TO? ",
            directory,
        )?;
        let (amount, uses_comma_decimal) = console.ask_amount(&source)?;

        console.say(&format!(
            "\nTo confirm: you want to convert {} {:.2} ({}) to {}.",
            source.symbol, amount, source.iso, target.iso
        ))?;
        if !console.confirm("Is that correct? (yes/no): ")? {
            console.say("\nNo problem. Let's start over.")?;
            continue;
        }

        let request = ConversionRequest::new(source, target, amount, uses_comma_decimal);
        info!(
            "Converting {} {} to {}",
            request.amount, request.source.iso, request.target.iso
        );
        match convert(&request, directory, fetcher) {
            Ok(report) => console.say(&report)?,
            Err(e) => {
                error!("Conversion failed: {}", e);
                console.say("\nSorry, we could not complete the conversion at this time.")?;
            }
        }

        if !console.confirm("\nWould you like to perform another conversion? (yes/no): ")? {
            return Ok(());
        }
    }
}

/// Like `run`, but treats closed input as a normal end of session.
pub fn run_until_done<R, W, G>(
    console: &mut Console<R, W>,
    directory: &CurrencyDirectory,
    fetcher: &RateFetcher<G>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    G: TextGenerator,
{
    match run(console, directory, fetcher) {
        Err(ConverterError::InputClosed) => {
            info!("Input closed; ending session.");
            Ok(())
        }
        other => other,
    }
}
