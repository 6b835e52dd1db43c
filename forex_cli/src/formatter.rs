//! Rendering of a finished conversion.
//!
//! Precision policy: BTC and ETH amounts get 8 fractional digits with a period decimal
//! and comma thousands grouping; every other amount gets 2 fractional digits with the
//! decimal separator the user typed. The crypto path ignores the user's separator, so a
//! comma-decimal user sees mixed separators in one report.
use std::fmt;

use forex_common::crypto::uses_high_precision;
use forex_common::currency::{CurrencyDirectory, CurrencyRecord};
use forex_common::error::ConverterError;
use forex_common::result::Result;
use forex_rates::RateQuote;

use crate::model::request::ConversionRequest;

/// Two fractional digits, with a comma decimal separator when requested.
pub fn format_number(value: f64, use_comma: bool) -> String {
    let formatted = format!("{:.2}", value);
    if use_comma {
        formatted.replace('.', ",")
    } else {
        formatted
    }
}

/// Eight fractional digits, period decimal, comma thousands grouping.
pub fn format_high_precision(value: f64) -> String {
    let formatted = format!("{:.8}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Formats `value` in `iso` according to the precision policy.
pub fn format_amount(iso: &str, value: f64, use_comma: bool) -> String {
    if uses_high_precision(iso) {
        format_high_precision(value)
    } else {
        format_number(value, use_comma)
    }
}

fn is_usable(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// A validated conversion ready for display.
pub struct ConversionReport<'a> {
    request: &'a ConversionRequest,
    quote: &'a RateQuote,
    directory: &'a CurrencyDirectory,
}

impl<'a> ConversionReport<'a> {
    /// Builds the report; fails if the main rate cannot be divided by.
    pub fn new(
        request: &'a ConversionRequest,
        quote: &'a RateQuote,
        directory: &'a CurrencyDirectory,
    ) -> Result<Self> {
        if !quote.has_usable_rate() {
            return Err(ConverterError::InvalidRate(quote.main_rate));
        }
        Ok(Self {
            request,
            quote,
            directory,
        })
    }

    /// Amount in the target currency.
    pub fn converted_amount(&self) -> f64 {
        self.request.amount / self.quote.main_rate
    }

    /// Units of target currency per 1 source currency.
    pub fn inverse_rate(&self) -> f64 {
        1.0 / self.quote.main_rate
    }

    /// Comparison currencies known to the directory, with the converted amount.
    pub fn comparison_amounts(&self) -> Vec<(&'a CurrencyRecord, f64)> {
        self.quote
            .comparison_rates()
            .filter(|c| is_usable(c.rate))
            .filter_map(|c| {
                self.directory
                    .by_iso(c.iso)
                    .map(|record| (record, self.request.amount / c.rate))
            })
            .collect()
    }

    /// Full multi-line report. `printed_at` is the local time shown in the footer.
    pub fn render(&self, printed_at: &str) -> String {
        ReportDisplay {
            report: self,
            printed_at,
        }
        .to_string()
    }
}

/// `Display` adapter carrying the footer timestamp.
struct ReportDisplay<'r, 'a> {
    report: &'r ConversionReport<'a>,
    printed_at: &'r str,
}

impl fmt::Display for ReportDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let request = report.request;
        let (source, target) = (&request.source, &request.target);
        let comma = request.uses_comma_decimal;
        let amount = format_number(request.amount, comma);

        writeln!(f, "\n--- CONVERSION RESULT ---\n")?;
        writeln!(
            f,
            "According to {} at {}:\n",
            report.quote.source, report.quote.timestamp
        )?;
        writeln!(
            f,
            "{} {} ({}) is equivalent to:",
            source.symbol, amount, source.display_name
        )?;
        writeln!(
            f,
            "➡️ {} {} ({})\n",
            target.symbol,
            format_amount(&target.iso, report.converted_amount(), comma),
            target.display_name
        )?;

        writeln!(f, "--- EXCHANGE RATES ---\n")?;
        writeln!(
            f,
            "The exchange rate is 1 {} = {} {}.",
            target.iso, report.quote.main_rate, source.iso
        )?;
        writeln!(
            f,
            "The inverse rate is 1 {} = {:.6} {}.\n",
            source.iso,
            report.inverse_rate(),
            target.iso
        )?;

        let comparisons = report.comparison_amounts();
        if !comparisons.is_empty() {
            writeln!(f, "--- FOR COMPARISON ---\n")?;
            writeln!(f, "{} {} also equals:\n", source.symbol, amount)?;
            for (record, value) in comparisons {
                writeln!(
                    f,
                    "{} {} ({})",
                    record.symbol,
                    format_amount(&record.iso, value, comma),
                    record.display_name
                )?;
            }
            writeln!(f)?;
        }

        write!(f, "Printed at {}", self.printed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forex_rates::RateSource;

    const TABLE: &str = r#"{
        "united states": { "iso": "USD", "symbol": "$", "currency": "US Dollar" },
        "japan": { "iso": "JPY", "symbol": "¥", "currency": "Japanese Yen" },
        "united kingdom": { "iso": "GBP", "symbol": "£", "currency": "British Pound" },
        "bitcoin": { "iso": "BTC", "symbol": "₿", "currency": "Bitcoin" }
    }"#;

    fn directory() -> CurrencyDirectory {
        CurrencyDirectory::from_reader(TABLE.as_bytes()).unwrap()
    }

    fn quote(main_rate: f64, comparisons: Vec<(&str, f64)>) -> RateQuote {
        RateQuote {
            main_rate,
            timestamp: "June 10, 2025 14:30 CET".to_string(),
            source: RateSource::CentralBank,
            comparisons: comparisons
                .into_iter()
                .map(|(iso, rate)| (iso.to_string(), rate))
                .collect(),
        }
    }

    fn request(dir: &CurrencyDirectory, from: &str, to: &str, amount: f64, comma: bool) -> ConversionRequest {
        ConversionRequest::new(
            dir.resolve(from).unwrap().clone(),
            dir.resolve(to).unwrap().clone(),
            amount,
            comma,
        )
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(6.6556, false), "6.66");
        assert_eq!(format_number(6.6556, true), "6,66");
        assert_eq!(format_number(1000.0, false), "1000.00");
    }

    #[test]
    fn test_format_high_precision() {
        assert_eq!(format_high_precision(0.00153846), "0.00153846");
        assert_eq!(format_high_precision(1234567.5), "1,234,567.50000000");
        assert_eq!(format_high_precision(123.0), "123.00000000");
    }

    #[test]
    fn test_jpy_to_usd_scenario() {
        let dir = directory();
        let req = request(&dir, "japan", "usd", 1000.0, false);
        let q = quote(150.25, vec![]);
        let report = ConversionReport::new(&req, &q, &dir).unwrap();
        assert!((report.converted_amount() - 6.6556).abs() < 1e-4);

        let text = report.render("now");
        assert!(text.contains("$ 6.66 (US Dollar)"));
        assert!(text.contains("¥ 1000.00 (Japanese Yen) is equivalent to:"));
        assert!(text.contains("According to ecb.europa.eu at June 10, 2025 14:30 CET"));
        assert!(text.contains("The exchange rate is 1 USD = 150.25 JPY."));
        assert!(text.contains("The inverse rate is 1 JPY = 0.006656 USD."));
        assert!(!text.contains("FOR COMPARISON"));
    }

    #[test]
    fn test_btc_target_uses_eight_digits_regardless_of_comma_mode() {
        let dir = directory();
        let q = quote(65000.0, vec![]);
        for comma in [false, true] {
            let req = request(&dir, "usd", "btc", 100.0, comma);
            let text = ConversionReport::new(&req, &q, &dir).unwrap().render("now");
            assert!(text.contains("₿ 0.00153846 (Bitcoin)"), "{text}");
        }
    }

    #[test]
    fn test_comma_mode_applies_to_national_amounts() {
        let dir = directory();
        let req = request(&dir, "japan", "usd", 1000.5, true);
        let q = quote(150.25, vec![]);
        let text = ConversionReport::new(&req, &q, &dir).unwrap().render("now");
        assert!(text.contains("¥ 1000,50 (Japanese Yen)"));
        assert!(text.contains("$ 6,66 (US Dollar)"));
        assert!(text.contains("0.006656 USD."));
    }

    #[test]
    fn test_comparisons_use_their_own_precision() {
        let dir = directory();
        let req = request(&dir, "usd", "japan", 100.0, false);
        let q = quote(
            150.0,
            vec![("GBP", 0.8), ("BTC", 65000.0), ("CNY", 0.14), ("EUR", 0.0)],
        );
        let report = ConversionReport::new(&req, &q, &dir).unwrap();
        let amounts = report.comparison_amounts();
        let isos: Vec<&str> = amounts.iter().map(|(r, _)| r.iso.as_str()).collect();
        assert_eq!(isos, vec!["GBP", "BTC"]);

        let text = report.render("now");
        assert!(text.contains("--- FOR COMPARISON ---"));
        assert!(text.contains("$ 100.00 also equals:"));
        assert!(text.contains("£ 125.00 (British Pound)"));
        assert!(text.contains("₿ 0.00153846 (Bitcoin)"));
    }

    #[test]
    fn test_render_sections_in_order() {
        let dir = directory();
        let req = request(&dir, "usd", "japan", 100.0, false);
        let q = quote(150.0, vec![("GBP", 0.8)]);
        let text = ConversionReport::new(&req, &q, &dir).unwrap().render("June 11, 2025 09:00:00");

        let result = text.find("--- CONVERSION RESULT ---").unwrap();
        let rates = text.find("--- EXCHANGE RATES ---").unwrap();
        let comparison = text.find("--- FOR COMPARISON ---").unwrap();
        assert!(result < rates && rates < comparison);
        assert!(text.starts_with('\n'));
        assert!(text.ends_with("Printed at June 11, 2025 09:00:00"));
    }

    #[test]
    fn test_unusable_main_rate_is_rejected() {
        let dir = directory();
        let req = request(&dir, "japan", "usd", 1000.0, false);
        for bad in [0.0, -150.25, f64::NAN] {
            let q = quote(bad, vec![]);
            assert!(matches!(
                ConversionReport::new(&req, &q, &dir),
                Err(ConverterError::InvalidRate(_))
            ));
        }
    }
}
