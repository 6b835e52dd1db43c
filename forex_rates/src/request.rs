//! Prompt construction for a rate request.
//!
//! The prompt pins the reply to a line-oriented template so the parser can pick the
//! values out with regular expressions:
//!
//! ```text
//! [main_rate] 1 USD = X JPY
//! [comparison] 1 GBP = X JPY
//! Source: ecb.europa.eu
//! Date and time of the rate: [Month Day, Year HH:MM CET]
//! ```
use std::fmt;

use forex_common::crypto::is_crypto;

/// Reference currencies quoted next to the main rate.
pub const DEFAULT_COMPARISONS: [&str; 5] = ["USD", "GBP", "EUR", "JPY", "CNY"];

/// Nominal data source named in the prompt and in the printed result.
///
/// Advisory only: it never changes how the reply is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Crypto market data aggregator.
    CryptoMarket,
    /// Central bank reference rates.
    CentralBank,
}

impl RateSource {
    /// Crypto source if either side of the pair is an allow-listed coin.
    pub fn for_pair(source_iso: &str, target_iso: &str) -> Self {
        if is_crypto(source_iso) || is_crypto(target_iso) {
            RateSource::CryptoMarket
        } else {
            RateSource::CentralBank
        }
    }

    /// Label written into the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            RateSource::CryptoMarket => "coinmarketcap.com",
            RateSource::CentralBank => "ecb.europa.eu",
        }
    }
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One rate request: "how many `source` units is 1 `target`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRequest {
    source_iso: String,
    target_iso: String,
    comparisons: Vec<String>,
    rate_source: RateSource,
}

impl RateRequest {
    /// Request for the pair with the default comparison basket.
    pub fn new(source_iso: &str, target_iso: &str) -> Self {
        let source_iso = source_iso.trim().to_uppercase();
        let target_iso = target_iso.trim().to_uppercase();
        let rate_source = RateSource::for_pair(&source_iso, &target_iso);
        Self {
            source_iso,
            target_iso,
            comparisons: DEFAULT_COMPARISONS.iter().map(|c| c.to_string()).collect(),
            rate_source,
        }
    }

    /// Replaces the comparison basket.
    pub fn with_comparisons<I, S>(mut self, comparisons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.comparisons = comparisons
            .into_iter()
            .map(|c| c.as_ref().trim().to_uppercase())
            .collect();
        self
    }

    /// ISO code the amount is expressed in.
    pub fn source_iso(&self) -> &str {
        &self.source_iso
    }

    /// ISO code the amount is converted to.
    pub fn target_iso(&self) -> &str {
        &self.target_iso
    }

    /// Nominal data source for this pair.
    pub fn rate_source(&self) -> RateSource {
        self.rate_source
    }

    /// Comparison codes actually requested (the basket minus the target).
    pub fn active_comparisons(&self) -> impl Iterator<Item = &str> {
        self.comparisons
            .iter()
            .map(String::as_str)
            .filter(move |code| *code != self.target_iso)
    }

    /// Renders the prompt sent to the text-generation service.
    pub fn prompt(&self) -> String {
        let mut prompt = String::from(
            "Provide real-time exchange rates in the following strict format. \
             Use 3-letter ISO 4217 codes and actual numerical values.\n\n",
        );
        prompt.push_str(&format!(
            "[main_rate] 1 {} = X {}\n",
            self.target_iso, self.source_iso
        ));
        for code in self.active_comparisons() {
            prompt.push_str(&format!("[comparison] 1 {} = X {}\n", code, self.source_iso));
        }
        prompt.push_str(&format!("Source: {}\n", self.rate_source));
        prompt.push_str("Date and time of the rate: [Month Day, Year HH:MM CET]\n\n");
        prompt.push_str(
            "Important: Replace 'X' with real numerical exchange rates. \
             Do not include brackets around the date.",
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_for_jpy_to_usd() {
        let prompt = RateRequest::new("JPY", "USD").prompt();
        assert!(prompt.contains("[main_rate] 1 USD = X JPY"));
        assert!(!prompt.contains("[comparison] 1 USD"));
        assert!(prompt.contains("[comparison] 1 GBP = X JPY"));
        assert!(prompt.contains("[comparison] 1 EUR = X JPY"));
        assert!(prompt.contains("[comparison] 1 JPY = X JPY"));
        assert!(prompt.contains("[comparison] 1 CNY = X JPY"));
        assert!(prompt.contains("Source: ecb.europa.eu"));
        assert!(prompt.contains("[Month Day, Year HH:MM CET]"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = RateRequest::new("eur", "gbp");
        let b = RateRequest::new("EUR", "GBP");
        assert_eq!(a, b);
        assert_eq!(a.prompt(), b.prompt());
    }

    #[test]
    fn test_crypto_on_either_side_selects_market_source() {
        assert_eq!(RateSource::for_pair("USD", "BTC"), RateSource::CryptoMarket);
        assert_eq!(RateSource::for_pair("SOL", "EUR"), RateSource::CryptoMarket);
        assert_eq!(RateSource::for_pair("USD", "EUR"), RateSource::CentralBank);
        assert!(RateRequest::new("USD", "ETH").prompt().contains("Source: coinmarketcap.com"));
    }

    #[test]
    fn test_active_comparisons_skip_target() {
        let request = RateRequest::new("CHF", "EUR").with_comparisons(["usd", "EUR", "jpy"]);
        let active: Vec<&str> = request.active_comparisons().collect();
        assert_eq!(active, vec!["USD", "JPY"]);
    }
}
