//! Model Layer: the summarization backend
//!
//! This module owns all interaction with the underlying seq2seq model:
//! - The backend abstraction (`SummaryModel`)
//! - The local Candle implementation (flan-T5)

pub mod candle;

use anyhow::Result;

/// The core trait for summarization backends.
///
/// Implementations must be safe to call concurrently from worker threads,
/// and deterministic given identical inputs and decoding configuration.
pub trait SummaryModel: Send + Sync {
    /// Encode text into token ids.
    fn tokenize(&self, text: &str) -> Result<Vec<u32>>;

    /// Decode token ids back into text, skipping special tokens.
    fn detokenize(&self, ids: &[u32]) -> Result<String>;

    /// Generate summary token ids for the given input token ids.
    fn generate(&self, ids: &[u32]) -> Result<Vec<u32>>;

    /// Maximum number of input tokens a single generate call accepts.
    fn capacity(&self) -> usize;
}

// Re-export key types
pub use candle::CandleSummarizer;
