//! Long-input summarization
//!
//! The core pipeline: token sequences that exceed the model's input budget
//! are split into overlapping windows, each window is summarized on a
//! bounded worker pool, and the concatenated partial summaries are fed back
//! through the same cycle until the result fits in a single model call.

use crate::config::Config;
use crate::error::SummarizeError;
use crate::model::SummaryModel;
use crate::window::{self, Window};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Summary text produced for a single window, tagged with the originating
/// window's position for order-preserving reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFragment {
    pub index: usize,
    pub text: String,
}

/// Windowing and scheduling parameters for long-input summarization.
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Window length in tokens
    pub window_size: usize,
    /// Token overlap between consecutive windows
    pub stride: usize,
    /// Aggregation passes before the input is truncated to capacity
    pub max_depth: usize,
    /// Worker pool size (0 = available parallelism)
    pub workers: usize,
}

impl SummarizeOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            window_size: config.window_size,
            stride: config.stride,
            max_depth: config.max_depth,
            workers: config.workers,
        }
    }

    fn validate(&self) -> Result<(), SummarizeError> {
        if self.window_size == 0 || self.stride == 0 {
            return Err(SummarizeError::Configuration(format!(
                "window_size ({}) and stride ({}) must be positive",
                self.window_size, self.stride
            )));
        }
        if self.stride >= self.window_size {
            return Err(SummarizeError::Configuration(format!(
                "stride ({}) must be smaller than window_size ({})",
                self.stride, self.window_size
            )));
        }
        Ok(())
    }
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Summarize each window on a bounded worker pool, returning fragments in
/// window order regardless of completion order.
///
/// The pool lives for this pass only. Any task failure fails the whole call;
/// no partial results are returned.
pub fn summarize_windows(
    tokens: &[u32],
    windows: &[Window],
    model: &dyn SummaryModel,
    workers: usize,
) -> Result<Vec<SummaryFragment>, SummarizeError> {
    let workers = if workers == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        workers
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| SummarizeError::Configuration(format!("failed to build worker pool: {e}")))?;

    info!(windows = windows.len(), workers, "dispatching window summarization");
    let started = Instant::now();

    let completed = pool.install(|| {
        windows
            .par_iter()
            .enumerate()
            .map(|(index, w)| {
                let task_started = Instant::now();
                let output = model
                    .generate(&tokens[w.start..w.end])
                    .map_err(|e| SummarizeError::Inference(format!("window {index}: {e}")))?;
                let text = model
                    .detokenize(&output)
                    .map_err(|e| SummarizeError::Inference(format!("window {index}: {e}")))?;
                Ok((index, text, task_started.elapsed()))
            })
            .collect::<Result<Vec<_>, SummarizeError>>()
    })?;

    // Completion order is arbitrary; placement is keyed by window index.
    let mut fragments: Vec<Option<SummaryFragment>> = vec![None; windows.len()];
    for (index, text, took) in completed {
        debug!(
            window = index,
            took_ms = took.as_millis() as u64,
            "window summarized"
        );
        fragments[index] = Some(SummaryFragment { index, text });
    }

    info!(
        windows = windows.len(),
        total_ms = started.elapsed().as_millis() as u64,
        "all windows summarized"
    );

    Ok(fragments.into_iter().flatten().collect())
}

/// Long-input summarizer: splits, fans out, and re-aggregates until the
/// result fits the model's input budget.
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn SummaryModel>,
    options: SummarizeOptions,
}

impl Summarizer {
    /// Build a summarizer around a loaded model. Windowing parameters are
    /// validated here so misconfiguration surfaces at startup.
    pub fn new(
        model: Arc<dyn SummaryModel>,
        options: SummarizeOptions,
    ) -> Result<Self, SummarizeError> {
        options.validate()?;
        if options.window_size > model.capacity() {
            return Err(SummarizeError::Configuration(format!(
                "window_size ({}) exceeds model capacity ({})",
                options.window_size,
                model.capacity()
            )));
        }
        Ok(Self { model, options })
    }

}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Summarizer {
    pub fn options(&self) -> &SummarizeOptions {
        &self.options
    }

    pub fn capacity(&self) -> usize {
        self.model.capacity()
    }

    /// Summarize text of any length.
    ///
    /// Each pass tokenizes the current text; input within capacity is
    /// summarized directly. Longer input is windowed, summarized in
    /// parallel, and the joined fragments become the next pass's input.
    /// After `max_depth` passes the remaining input is truncated to
    /// capacity, so the loop always terminates with a best-effort summary.
    pub fn summarize_long_text(&self, text: &str) -> Result<String, SummarizeError> {
        let capacity = self.model.capacity();
        let mut current = text.to_string();
        let mut depth = 0;

        loop {
            let tokens = self
                .model
                .tokenize(&current)
                .map_err(|e| SummarizeError::Inference(e.to_string()))?;

            if tokens.len() <= capacity {
                debug!(depth, tokens = tokens.len(), capacity, "input fits, summarizing directly");
                return self.generate_text(&tokens);
            }

            if depth >= self.options.max_depth {
                warn!(
                    depth,
                    tokens = tokens.len(),
                    capacity,
                    "recursion ceiling reached, truncating input to capacity"
                );
                return self.generate_text(&tokens[..capacity]);
            }

            let windows = window::split(&tokens, self.options.window_size, self.options.stride)?;
            info!(
                depth,
                tokens = tokens.len(),
                windows = windows.len(),
                "input exceeds capacity, splitting into windows"
            );

            let fragments =
                summarize_windows(&tokens, &windows, self.model.as_ref(), self.options.workers)?;
            current = fragments
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            depth += 1;
        }
    }

    fn generate_text(&self, tokens: &[u32]) -> Result<String, SummarizeError> {
        let output = self
            .model
            .generate(tokens)
            .map_err(|e| SummarizeError::Inference(e.to_string()))?;
        self.model
            .detokenize(&output)
            .map_err(|e| SummarizeError::Inference(e.to_string()))
    }
}
