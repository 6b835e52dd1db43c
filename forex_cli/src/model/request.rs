//! A single conversion as entered by the user.
use forex_common::currency::CurrencyRecord;
use forex_common::error::ConverterError;
use forex_common::result::Result;
use forex_rates::RateRequest;

/// Parses a typed amount, detecting comma-decimal input.
///
/// The input is in comma-decimal mode when it contains a comma and no period; the comma
/// then becomes the decimal point. Otherwise commas are read as thousands separators and
/// dropped. Returns the value and whether comma-decimal mode was used.
pub fn parse_amount(text: &str) -> Result<(f64, bool)> {
    let trimmed = text.trim();
    let uses_comma_decimal = trimmed.contains(',') && !trimmed.contains('.');
    let cleaned = if uses_comma_decimal {
        trimmed.replace(',', ".")
    } else {
        trimmed.replace(',', "")
    };

    let amount: f64 = cleaned
        .parse()
        .map_err(|_| ConverterError::InvalidAmount(trimmed.to_string()))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ConverterError::InvalidAmount(trimmed.to_string()));
    }
    Ok((amount, uses_comma_decimal))
}

/// Source/target currencies and the amount to convert.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Currency the amount is expressed in.
    pub source: CurrencyRecord,
    /// Currency to convert to.
    pub target: CurrencyRecord,
    /// Non-negative amount in `source`.
    pub amount: f64,
    /// Whether the user typed a comma as decimal separator.
    pub uses_comma_decimal: bool,
}

impl ConversionRequest {
    /// Creates the request.
    pub fn new(
        source: CurrencyRecord,
        target: CurrencyRecord,
        amount: f64,
        uses_comma_decimal: bool,
    ) -> Self {
        Self {
            source,
            target,
            amount,
            uses_comma_decimal,
        }
    }

    /// Rate request for this pair with the default comparison basket.
    pub fn rate_request(&self) -> RateRequest {
        RateRequest::new(&self.source.iso, &self.target.iso)
    }
}
