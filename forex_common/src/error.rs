//! Error types shared between the rate pipeline and the client.
//!
//! `ConverterError` unifies I/O, data-file, external-call and user-input failures so
//! every crate can propagate a single error type. `ParseError` is kept separate because
//! it describes what was missing from a rate response, and the retry loop reports it
//! verbatim.
use std::io;
use std::time::Duration;

use thiserror::Error;

/// Reasons a rate response could not be turned into structured rates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No `[main_rate]` line for the requested pair.
    #[error("Could not find the [main_rate] line for 1 {target_iso} in {source_iso}")]
    MissingMainRate {
        /// Target ISO code.
        target_iso: String,
        /// Source ISO code.
        source_iso: String,
    },

    /// No timestamp in the `Month Day, Year HH:MM CET` grammar.
    #[error("Could not find a timestamp in the form 'Month Day, Year HH:MM CET'")]
    MissingTimestamp,

    /// A captured rate literal did not convert to a float.
    #[error("Rate value '{0}' is not a valid number")]
    InvalidNumber(String),
}

/// Unified error type shared by all crates of the workspace.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// I/O error originating from the standard library, files or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The currency table is inconsistent (e.g. one ISO code with two different records).
    #[error("Currency directory error: {0}")]
    Directory(String),

    /// No alias or ISO code matched the user's text.
    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),

    /// The amount typed by the user is not a usable number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Interactive input reached end of stream.
    #[error("Input closed")]
    InputClosed,

    /// The external text-generation call failed.
    #[error("Text generation failed: {0}")]
    Generation(String),

    /// The external call did not answer within the configured bound.
    #[error("Text generation timed out after {0:?}")]
    Timeout(Duration),

    /// The response was received but mandatory fields were missing.
    #[error("Could not parse critical information from the response: {0}")]
    Parse(#[from] ParseError),

    /// A response pattern failed to compile.
    #[error("Invalid response pattern: {0}")]
    Pattern(String),

    /// A parsed rate cannot be used for conversion (zero, negative or not finite).
    #[error("Exchange rate {0} is not usable for conversion")]
    InvalidRate(f64),

    /// Every attempt failed; terminal for the current conversion only.
    #[error("All {attempts} attempts failed; last error: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: usize,
        /// Error of the final attempt.
        last_error: Box<ConverterError>,
    },
}

impl ConverterError {
    /// Whether another attempt at the external call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ConverterError::Generation(_) | ConverterError::Timeout(_) | ConverterError::Parse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_and_parse_failures_are_retryable() {
        assert!(ConverterError::Generation("boom".to_string()).is_retryable());
        assert!(ConverterError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(ConverterError::Parse(ParseError::MissingTimestamp).is_retryable());
    }

    #[test]
    fn test_exhausted_retries_is_terminal() {
        let err = ConverterError::RetriesExhausted {
            attempts: 3,
            last_error: Box::new(ConverterError::Generation("boom".to_string())),
        };
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("All 3 attempts failed"));
        assert!(!ConverterError::CurrencyNotFound("xx".to_string()).is_retryable());
    }
}
