//! Bounded retry loop around the text-generation call.
//!
//! Each attempt calls the generator with the request's prompt and parses the reply.
//! A call failure (including timeout) and a parse failure are handled the same way:
//! the attempt is logged with whatever raw reply was received and the next attempt
//! starts. Attempts are strictly sequential. The first parsed reply wins; when all
//! attempts fail the caller gets `ConverterError::RetriesExhausted`, which ends the
//! current conversion only.
use forex_common::error::ConverterError;
use forex_common::result::Result;
use log::{debug, error, info, warn};

use crate::generator::TextGenerator;
use crate::model::quote::RateQuote;
use crate::parser::ResponseGrammar;
use crate::request::RateRequest;

/// Default number of attempts per conversion.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Acquires a `RateQuote` from a `TextGenerator` with bounded retries.
pub struct RateFetcher<G> {
    generator: G,
    max_attempts: usize,
}

impl<G: TextGenerator> RateFetcher<G> {
    /// Fetcher with the default attempt bound.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the attempt bound (at least one attempt is always made).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Configured attempt bound.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Runs up to `max_attempts` call-and-parse rounds for `request`.
    pub fn fetch(&self, request: &RateRequest) -> Result<RateQuote> {
        let grammar = ResponseGrammar::for_request(request)?;
        let prompt = request.prompt();
        debug!("Prompt:\n{}", prompt);

        let mut last_error = None;
        for attempt in 1..=self.max_attempts {
            info!(
                "Contacting the rate service for 1 {} in {} (attempt {}/{})",
                request.target_iso(),
                request.source_iso(),
                attempt,
                self.max_attempts
            );

            let reply = match self.generator.generate(&prompt) {
                Ok(reply) => reply.trim().to_string(),
                Err(e) => {
                    warn!("An error occurred on attempt {}: {}", attempt, e);
                    warn!("No response was received before the error occurred.");
                    last_error = Some(e);
                    continue;
                }
            };
            info!("Response received.");

            match grammar.parse(&reply) {
                Ok(parsed) => {
                    let quote = parsed.into_quote(request.rate_source());
                    debug!(
                        "Parsed quote: {}",
                        serde_json::to_string(&quote).unwrap_or_default()
                    );
                    return Ok(quote);
                }
                Err(e) => {
                    let e = ConverterError::from(e);
                    warn!("An error occurred on attempt {}: {}", attempt, e);
                    warn!("Response received:\n{}", reply);
                    last_error = Some(e);
                }
            }
        }

        error!("All attempts failed. Unable to retrieve a valid exchange rate.");
        Err(ConverterError::RetriesExhausted {
            attempts: self.max_attempts,
            last_error: Box::new(last_error.unwrap_or_else(|| {
                ConverterError::Generation("No attempt was made".to_string())
            })),
        })
    }
}
