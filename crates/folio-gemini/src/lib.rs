//! Gemini-backed text refinement for Folio.
//!
//! Provides the [`LanguageModel`] abstraction used by the HTTP handlers, a
//! blocking [`GeminiClient`] implementation over `ureq`, and the fixed
//! prompts for rephrasing text and refining generated HTML.
//!
//! # Example
//!
//! ```no_run
//! use folio_gemini::{GeminiClient, LanguageModel, rephrase_prompt};
//!
//! let client = GeminiClient::new(
//!     "https://generativelanguage.googleapis.com/v1beta",
//!     "gemini-2.5-flash",
//! );
//! let text = client.generate("API_KEY", &rephrase_prompt("i like code"))?;
//! # Ok::<(), folio_gemini::GeminiError>(())
//! ```

mod client;
mod error;
mod prompt;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use prompt::{DEFAULT_FIX_INSTRUCTION, fix_html_prompt, rephrase_prompt, strip_code_fences};

/// A text completion model.
///
/// Calls are blocking and carry the caller's API key; implementations must
/// not retry.
pub trait LanguageModel: Send + Sync {
    /// Complete `prompt`, returning the model's text.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::EmptyResponse`] when the model produced no
    /// text, or a transport error.
    fn generate(&self, api_key: &str, prompt: &str) -> Result<String, GeminiError>;
}
