//! Narrative provider trait for abstracting LLM interactions.
//!
//! This trait lets the report narrative come from any LLM backend without
//! changing the analysis core. Implementations receive a fully rendered
//! prompt and return prose; they never see the table itself.

use crate::error::Result;

/// Trait for providers that turn an analysis prompt into a narrative.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow usage across threads.
pub trait NarrativeProvider: Send + Sync {
    /// Generate a narrative from the rendered analysis prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails or the response cannot
    /// be parsed. Callers should degrade to a report without narrative.
    fn generate_narrative(&self, prompt: &str) -> Result<String>;

    /// Get the provider name for logging and debugging.
    fn name(&self) -> &str;

    /// Get the model being used by this provider.
    ///
    /// Returns `None` if the provider doesn't expose model information.
    fn model(&self) -> Option<&str> {
        None
    }
}
