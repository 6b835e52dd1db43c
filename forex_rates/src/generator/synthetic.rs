//! Offline text generator for running without a live service.
//!
//! It reads the `[main_rate]` / `[comparison]` template lines out of the prompt and
//! answers them from a table of approximate USD values. Every call moves each quoted
//! value by a small random walk so repeated conversions differ slightly, and stamps
//! the reply with the current time in CET.
//!
//! Pairs it has no value for are answered with an apology instead of a rate line,
//! which the parser reports as a missing main rate.
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use chrono::{TimeDelta, Utc};
use forex_common::error::ConverterError;
use forex_common::result::Result;
use rand::Rng;
use regex::Regex;

use crate::generator::TextGenerator;

/// Approximate USD value of one unit of each currency.
const REFERENCE_USD_VALUES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 1.08),
    ("GBP", 1.27),
    ("JPY", 0.0067),
    ("CNY", 0.138),
    ("CHF", 1.13),
    ("CAD", 0.73),
    ("AUD", 0.65),
    ("NZD", 0.60),
    ("INR", 0.012),
    ("MXN", 0.052),
    ("BRL", 0.18),
    ("KRW", 0.00073),
    ("SEK", 0.095),
    ("NOK", 0.093),
    ("DKK", 0.145),
    ("PLN", 0.25),
    ("CZK", 0.044),
    ("HUF", 0.0028),
    ("ZAR", 0.054),
    ("SGD", 0.74),
    ("HKD", 0.128),
    ("TRY", 0.026),
    ("THB", 0.028),
    ("IDR", 0.000062),
    ("MYR", 0.22),
    ("PHP", 0.0175),
    ("VND", 0.000039),
    ("ILS", 0.27),
    ("AED", 0.272),
    ("SAR", 0.267),
    ("EGP", 0.02),
    ("NGN", 0.00065),
    ("ARS", 0.00085),
    ("CLP", 0.00105),
    ("COP", 0.00024),
    ("PKR", 0.0036),
    ("BTC", 65000.0),
    ("ETH", 3500.0),
    ("USDT", 1.0),
    ("XRP", 2.2),
    ("BNB", 650.0),
    ("SOL", 150.0),
    ("USDC", 1.0),
    ("DOGE", 0.18),
    ("ADA", 0.65),
    ("TRX", 0.27),
];

/// Maximum relative move of a value per call.
const WALK: f64 = 0.01;

static TEMPLATE_RE: OnceLock<Regex> = OnceLock::new();
static SOURCE_RE: OnceLock<Regex> = OnceLock::new();

fn template_re() -> &'static Regex {
    TEMPLATE_RE.get_or_init(|| {
        Regex::new(r"\[(main_rate|comparison)\]\s+1\s+([A-Z]{3,5})\s+=\s+X\s+([A-Z]{3,5})")
            .expect("template pattern is valid")
    })
}

fn source_re() -> &'static Regex {
    SOURCE_RE.get_or_init(|| Regex::new(r"Source:\s*(\S+)").expect("source pattern is valid"))
}

/// Next value of a random walk around `current`, kept strictly positive.
fn next_value(current: f64) -> f64 {
    let mut rng = rand::rng();
    let change: f64 = rng.random_range(-WALK..WALK);
    (current * (1.0 + change)).max(f64::MIN_POSITIVE)
}

/// Offline `TextGenerator` answering rate prompts from a reference table.
pub struct SyntheticGenerator {
    usd_values: Mutex<HashMap<String, f64>>,
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticGenerator {
    /// Generator seeded with the built-in reference values.
    pub fn new() -> Self {
        Self::with_values(REFERENCE_USD_VALUES.iter().map(|(iso, v)| (*iso, *v)))
    }

    /// Generator seeded with custom `(iso, usd_value)` pairs.
    pub fn with_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let usd_values = values
            .into_iter()
            .map(|(iso, value)| (iso.to_uppercase(), value))
            .collect();
        Self {
            usd_values: Mutex::new(usd_values),
        }
    }
}

impl TextGenerator for SyntheticGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        let mut values = self
            .usd_values
            .lock()
            .map_err(|e| ConverterError::Generation(format!("Rate table lock poisoned: {}", e)))?;

        for (iso, value) in values.iter_mut() {
            if iso != "USD" {
                *value = next_value(*value);
            }
        }

        let mut reply = String::new();
        for caps in template_re().captures_iter(prompt) {
            let (tag, quoted, base) = (&caps[1], &caps[2], &caps[3]);
            match (values.get(quoted), values.get(base)) {
                (Some(quoted_usd), Some(base_usd)) => {
                    reply.push_str(&format!(
                        "[{}] 1 {} = {} {}\n",
                        tag,
                        quoted,
                        quoted_usd / base_usd,
                        base
                    ));
                }
                _ if tag == "main_rate" => {
                    reply.push_str(&format!(
                        "I'm sorry, I don't have a reliable rate for {} in {}.\n",
                        quoted, base
                    ));
                }
                _ => {}
            }
        }

        if let Some(caps) = source_re().captures(prompt) {
            reply.push_str(&format!("Source: {}\n", &caps[1]));
        }
        let cet = Utc::now() + TimeDelta::hours(1);
        reply.push_str(&format!(
            "Date and time of the rate: {}",
            cet.format("%B %-d, %Y %H:%M CET")
        ));
        Ok(reply)
    }
}
