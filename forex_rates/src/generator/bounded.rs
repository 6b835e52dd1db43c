//! Wall-clock bound on a text-generation call.
//!
//! The wrapped call runs on a short-lived worker thread while the caller waits on a
//! channel with `recv_timeout`. If the bound elapses the caller gets
//! `ConverterError::Timeout` and the worker is abandoned; its late reply is dropped.
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, bounded};
use forex_common::error::ConverterError;
use forex_common::result::Result;
use log::warn;

use crate::generator::TextGenerator;

/// Generator wrapper that never blocks longer than `timeout`.
///
/// An abandoned call keeps running on its worker thread, so the next attempt could
/// overlap it. Give the wrapped generator its own, shorter timeout (as
/// `ChatCompletionsClient` has) so the inner call always ends before this bound fires.
#[derive(Clone)]
pub struct BoundedGenerator {
    inner: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl BoundedGenerator {
    /// Wraps `inner` with the given bound.
    pub fn new(inner: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Configured bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl TextGenerator for BoundedGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        let (reply_tx, reply_rx) = bounded::<Result<String>>(1);
        let inner = Arc::clone(&self.inner);
        let prompt = prompt.to_string();

        thread::Builder::new()
            .name("text-generator".to_string())
            .spawn(move || {
                // Receiver is gone if the caller already timed out.
                let _ = reply_tx.send(inner.generate(&prompt));
            })
            .map_err(|e| ConverterError::Generation(format!("Failed to start call: {}", e)))?;

        match reply_rx.recv_timeout(self.timeout) {
            Ok(reply) => reply,
            Err(RecvTimeoutError::Timeout) => {
                warn!("No reply within {:?}; abandoning the call", self.timeout);
                Err(ConverterError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(ConverterError::Generation(
                "Call terminated without a reply".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sleepy(Duration);

    impl TextGenerator for Sleepy {
        fn generate(&self, prompt: &str) -> Result<String> {
            thread::sleep(self.0);
            Ok(format!("echo: {}", prompt))
        }
    }

    struct Panicky;

    impl TextGenerator for Panicky {
        fn generate(&self, _prompt: &str) -> Result<String> {
            panic!("generator blew up");
        }
    }

    #[test]
    fn test_fast_call_passes_through() {
        let generator = BoundedGenerator::new(Arc::new(Sleepy(Duration::ZERO)), Duration::from_secs(5));
        assert_eq!(generator.generate("hi").unwrap(), "echo: hi");
    }

    #[test]
    fn test_slow_call_times_out() {
        let generator = BoundedGenerator::new(
            Arc::new(Sleepy(Duration::from_millis(500))),
            Duration::from_millis(20),
        );
        let err = generator.generate("hi").unwrap_err();
        assert!(matches!(err, ConverterError::Timeout(d) if d == Duration::from_millis(20)));
        assert!(err.is_retryable());
    }

    struct SelfLimited(Duration);

    impl TextGenerator for SelfLimited {
        fn generate(&self, _prompt: &str) -> Result<String> {
            thread::sleep(self.0);
            Err(ConverterError::Timeout(self.0))
        }
    }

    #[test]
    fn test_inner_timeout_wins_when_shorter_than_bound() {
        let inner = Duration::from_millis(10);
        let generator = BoundedGenerator::new(Arc::new(SelfLimited(inner)), Duration::from_secs(5));
        let err = generator.generate("hi").unwrap_err();
        assert!(matches!(err, ConverterError::Timeout(d) if d == inner));
    }

    #[test]
    fn test_panicking_call_is_a_call_failure() {
        let generator = BoundedGenerator::new(Arc::new(Panicky), Duration::from_secs(5));
        let err = generator.generate("hi").unwrap_err();
        assert!(matches!(err, ConverterError::Generation(_)));
    }
}
