//! The external text-generation call and its implementations.
//!
//! The rate pipeline only needs "prompt in, text out"; everything behind that seam is a
//! `TextGenerator`:
//!
//! - `chat` — OpenAI-compatible chat-completions client over blocking HTTP.
//! - `bounded` — wraps any generator with an explicit wall-clock timeout.
//! - `synthetic` — offline generator that fills in the prompt's template from a
//!   reference table with a small random walk.
use std::sync::Arc;

use forex_common::result::Result;

pub mod bounded;
pub mod chat;
pub mod synthetic;

pub use bounded::BoundedGenerator;
pub use chat::ChatCompletionsClient;
pub use synthetic::SyntheticGenerator;

/// Synchronous "prompt in, text out" call to a text-generation service.
///
/// Implementations make no promise about the shape of the reply; callers must parse it
/// defensively. Any failure (transport, status, timeout) is reported as an error.
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` and returns the raw reply text.
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for Arc<G> {
    fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt)
    }
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt)
    }
}
