//! Condense: long-document summarization with local transformer inference
//!
//! Token sequences that exceed the model's input budget are split into
//! overlapping windows, summarized concurrently on a bounded worker pool,
//! and the concatenated partial summaries are recursively re-summarized
//! until the result fits in a single model call.

pub mod config;
pub mod error;
pub mod model;
pub mod preprocess;
pub mod server;
pub mod summarize;
pub mod window;

// Re-export key types
pub use config::{Config, DevicePreference, SummaryModelKind};
pub use error::SummarizeError;
pub use model::{CandleSummarizer, SummaryModel};
pub use summarize::{summarize_windows, SummarizeOptions, Summarizer, SummaryFragment};
pub use window::{split, Window};
