//! Cryptocurrency symbols recognized by the converter.
//!
//! The allow-list is the top ten coins by market capitalization (June 2025), in that
//! order. It decides the nominal data source for a rate request and which coins are
//! shown with high precision.
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Supported cryptocurrency tickers, ordered by market capitalization.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Display, EnumString, EnumIter, Hash, Eq, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum CryptoTicker {
    BTC,
    ETH,
    USDT,
    XRP,
    BNB,
    SOL,
    USDC,
    DOGE,
    ADA,
    TRX,
}

impl CryptoTicker {
    /// Human-readable coin name used in the introduction banner.
    pub fn display_name(&self) -> &'static str {
        match self {
            CryptoTicker::BTC => "Bitcoin",
            CryptoTicker::ETH => "Ethereum",
            CryptoTicker::USDT => "Tether",
            CryptoTicker::XRP => "XRP",
            CryptoTicker::BNB => "Binance Coin",
            CryptoTicker::SOL => "Solana",
            CryptoTicker::USDC => "USD Coin",
            CryptoTicker::DOGE => "Dogecoin",
            CryptoTicker::ADA => "Cardano",
            CryptoTicker::TRX => "TRON",
        }
    }

    /// All tickers in market-cap order.
    pub fn all() -> impl Iterator<Item = CryptoTicker> {
        CryptoTicker::iter()
    }
}

/// Returns `true` if `iso` is one of the allow-listed cryptocurrencies.
pub fn is_crypto(iso: &str) -> bool {
    iso.trim().parse::<CryptoTicker>().is_ok()
}

/// Returns `true` if amounts in `iso` are displayed with 8 fractional digits.
pub fn uses_high_precision(iso: &str) -> bool {
    matches!(
        iso.trim().parse::<CryptoTicker>(),
        Ok(CryptoTicker::BTC) | Ok(CryptoTicker::ETH)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_has_ten_members_in_order() {
        let all: Vec<CryptoTicker> = CryptoTicker::all().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], CryptoTicker::BTC);
        assert_eq!(all[9], CryptoTicker::TRX);
    }

    #[test]
    fn test_is_crypto_case_insensitive() {
        assert!(is_crypto("BTC"));
        assert!(is_crypto("doge"));
        assert!(!is_crypto("USD"));
        assert!(!is_crypto("LTC"));
    }

    #[test]
    fn test_high_precision_only_for_btc_and_eth() {
        assert!(uses_high_precision("BTC"));
        assert!(uses_high_precision("eth"));
        assert!(!uses_high_precision("USDT"));
        assert!(!uses_high_precision("JPY"));
    }
}
