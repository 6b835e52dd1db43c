//! Extraction of structured rates from a free-text reply.
//!
//! The reply is expected to follow the template requested by `RateRequest::prompt`, but
//! nothing enforces it, so every field is located independently with a regular
//! expression anywhere in the text:
//!
//! - `[main_rate] 1 {target} = <number> {source}` — mandatory.
//! - `{Month} {day}, {year} {HH}:{MM} CET` — mandatory.
//! - `[comparison] 1 {code} = <number> {source}` — optional, one per comparison code.
//!
//! The `Source:` line is never read back; the label chosen at request time is used.
use std::sync::OnceLock;

use forex_common::ParseError;
use forex_common::error::ConverterError;
use forex_common::result::Result;
use regex::Regex;

use crate::model::quote::RateQuote;
use crate::request::{RateRequest, RateSource};

/// Decimal literal with optional sign and exponent. Thousands separators are not accepted.
const NUMBER: &str = r"(-?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)";

const TIMESTAMP: &str = r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}\s+\d{2}:\d{2}\s+CET";

static TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();

fn timestamp_re() -> &'static Regex {
    TIMESTAMP_RE.get_or_init(|| Regex::new(TIMESTAMP).expect("timestamp pattern is valid"))
}

/// Rates extracted from one reply, before the source label is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRates {
    /// Units of source per 1 target.
    pub main_rate: f64,
    /// Matched timestamp text.
    pub timestamp: String,
    /// Comparison rates found, in request order.
    pub comparisons: Vec<(String, f64)>,
}

impl ParsedRates {
    /// Attaches the nominal source label chosen when the request was built.
    pub fn into_quote(self, source: RateSource) -> RateQuote {
        RateQuote {
            main_rate: self.main_rate,
            timestamp: self.timestamp,
            source,
            comparisons: self.comparisons,
        }
    }
}

/// Compiled patterns for one currency pair and comparison basket.
#[derive(Debug, Clone)]
pub struct ResponseGrammar {
    source_iso: String,
    target_iso: String,
    main_rate: Regex,
    comparisons: Vec<(String, Regex)>,
}

fn rate_line(tag: &str, code: &str, source: &str) -> Result<Regex> {
    let pattern = format!(
        r"\[{}\]\s+1\s+{}\b\s+=\s+{}\s+{}\b",
        tag,
        regex::escape(code),
        NUMBER,
        regex::escape(source)
    );
    Regex::new(&pattern).map_err(|e| ConverterError::Pattern(e.to_string()))
}

fn capture_number(re: &Regex, text: &str) -> Option<std::result::Result<f64, ParseError>> {
    re.captures(text).and_then(|caps| caps.get(1)).map(|m| {
        m.as_str()
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber(m.as_str().to_string()))
    })
}

impl ResponseGrammar {
    /// Compiles the patterns for `request`'s pair and active comparisons.
    pub fn for_request(request: &RateRequest) -> Result<Self> {
        Self::new(
            request.source_iso(),
            request.target_iso(),
            request.active_comparisons(),
        )
    }

    /// Compiles the patterns for an explicit pair and comparison list.
    ///
    /// Comparison codes equal to the target are skipped.
    pub fn new<'a, I>(source_iso: &str, target_iso: &str, comparisons: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let main_rate = rate_line("main_rate", target_iso, source_iso)?;
        let comparisons = comparisons
            .into_iter()
            .filter(|code| *code != target_iso)
            .map(|code| -> Result<(String, Regex)> {
                Ok((code.to_string(), rate_line("comparison", code, source_iso)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source_iso: source_iso.to_string(),
            target_iso: target_iso.to_string(),
            main_rate,
            comparisons,
        })
    }

    /// Extracts the rates from `text`.
    ///
    /// Fails only when the main rate or the timestamp is absent (or the main rate literal
    /// is unusable as a float). Missing or malformed comparison lines are dropped.
    pub fn parse(&self, text: &str) -> std::result::Result<ParsedRates, ParseError> {
        let main_rate = capture_number(&self.main_rate, text).ok_or_else(|| {
            ParseError::MissingMainRate {
                target_iso: self.target_iso.clone(),
                source_iso: self.source_iso.clone(),
            }
        })??;

        let timestamp = timestamp_re()
            .find(text)
            .map(|m| m.as_str().to_string())
            .ok_or(ParseError::MissingTimestamp)?;

        let comparisons = self
            .comparisons
            .iter()
            .filter_map(|(code, re)| match capture_number(re, text)? {
                Ok(rate) => Some((code.clone(), rate)),
                Err(_) => None,
            })
            .collect();

        Ok(ParsedRates {
            main_rate,
            timestamp,
            comparisons,
        })
    }
}
