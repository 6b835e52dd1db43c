//! Structured result of one rate acquisition.
//!
//! A `RateQuote` lives for a single conversion round: it is produced by the fetcher,
//! rendered by the client and dropped. Rates are "units of source currency per 1 unit
//! of the quoted currency".
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::request::RateSource;

/// Auxiliary rate of a reference currency against the source currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRate<'a> {
    /// Reference currency ISO code.
    pub iso: &'a str,
    /// Units of source currency per 1 unit of `iso`.
    pub rate: f64,
}

/// Exchange rates for one currency pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateQuote {
    /// Units of source currency per 1 unit of target currency.
    pub main_rate: f64,
    /// Timestamp text as written in the reply, e.g. `June 10, 2025 14:30 CET`.
    pub timestamp: String,
    /// Nominal data source chosen when the request was built.
    #[serde(serialize_with = "serialize_source")]
    pub source: RateSource,
    /// Comparison rates in request order.
    pub comparisons: Vec<(String, f64)>,
}

fn serialize_source<S: serde::Serializer>(source: &RateSource, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(source.label())
}

impl RateQuote {
    /// Comparison rate for `iso`, if the reply contained one.
    pub fn comparison(&self, iso: &str) -> Option<f64> {
        self.comparisons
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(iso))
            .map(|(_, rate)| *rate)
    }

    /// Iterates comparison rates in request order.
    pub fn comparison_rates(&self) -> impl Iterator<Item = ComparisonRate<'_>> {
        self.comparisons.iter().map(|(iso, rate)| ComparisonRate {
            iso: iso.as_str(),
            rate: *rate,
        })
    }

    /// Main rate is strictly positive and finite.
    pub fn has_usable_rate(&self) -> bool {
        self.main_rate.is_finite() && self.main_rate > 0.0
    }

    /// Timestamp as a calendar value (the `CET` suffix is dropped).
    ///
    /// `None` when the text matches the grammar but names an impossible date, e.g.
    /// `February 30`.
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        let text = self.timestamp.trim_end_matches("CET").trim();
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        NaiveDateTime::parse_from_str(&text, "%B %d, %Y %H:%M").ok()
    }
}
