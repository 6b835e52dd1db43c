//! Command-line arguments for the Forex converter.
//!
//! This module defines the CLI interface using `clap`. Service settings fall back to
//! environment variables so an API key never has to appear on the command line.
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use forex_rates::fetcher::DEFAULT_MAX_ATTEMPTS;
use forex_rates::generator::chat::DEFAULT_API_BASE;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the country/currency JSON table.
    #[clap(long, default_value = "data/country_currency_dictionary.json")]
    pub data_file: PathBuf,

    /// Base URL of an OpenAI-compatible chat-completions API.
    #[clap(long, env = "FOREX_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Model name sent with every request.
    #[clap(long, env = "FOREX_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// API key for the chat-completions service.
    #[clap(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Seconds to wait for a single reply before treating the attempt as failed.
    #[clap(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Attempts per conversion before giving up.
    #[clap(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Answer rate requests from the built-in reference table instead of the service.
    #[clap(long)]
    pub offline: bool,
}

/// Extra time the call bound allows beyond the HTTP timeout, so the HTTP request ends
/// first and no call outlives its attempt.
const CALL_BOUND_GRACE: Duration = Duration::from_secs(2);

impl Args {
    /// Per-call timeout of the HTTP client.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Wall-clock bound enforced around each call; always longer than `timeout`.
    pub fn call_bound(&self) -> Duration {
        self.timeout() + CALL_BOUND_GRACE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["forex", "--offline"]);
        assert!(args.offline);
        assert_eq!(args.max_attempts, 3);
        assert_eq!(args.timeout(), Duration::from_secs(30));
        assert!(args.call_bound() > args.timeout());
        assert_eq!(
            args.data_file,
            PathBuf::from("data/country_currency_dictionary.json")
        );
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "forex",
            "--data-file",
            "/tmp/table.json",
            "--timeout-secs",
            "0",
            "--max-attempts",
            "5",
            "--api-key",
            "sk-test",
        ]);
        assert_eq!(args.data_file, PathBuf::from("/tmp/table.json"));
        assert_eq!(args.timeout(), Duration::from_secs(1));
        assert_eq!(args.call_bound(), Duration::from_secs(3));
        assert_eq!(args.max_attempts, 5);
        assert_eq!(args.api_key.as_deref(), Some("sk-test"));
    }
}
