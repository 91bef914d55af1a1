//! Error taxonomy for the summarization pipeline.
//!
//! Validation problems are detected and reported before any model work
//! begins; inference failures abort the whole request rather than returning
//! a partial summary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Bad, missing, or empty input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Request body was not `application/json`.
    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    /// Invalid windowing parameters. Treated as a startup/internal fault.
    #[error("invalid summarizer configuration: {0}")]
    Configuration(String),

    /// A model call failed. The whole request fails; no partial results.
    #[error("model inference failed: {0}")]
    Inference(String),
}

impl SummarizeError {
    /// Machine-readable kind for structured error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::UnsupportedMedia(_) => "unsupported_media_type",
            Self::Configuration(_) => "configuration_error",
            Self::Inference(_) => "inference_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SummarizeError::Validation("x".into()).kind(),
            "validation_error"
        );
        assert_eq!(
            SummarizeError::Configuration("x".into()).kind(),
            "configuration_error"
        );
        assert_eq!(
            SummarizeError::Inference("x".into()).kind(),
            "inference_error"
        );
        assert_eq!(
            SummarizeError::UnsupportedMedia("x".into()).kind(),
            "unsupported_media_type"
        );
    }

    #[test]
    fn test_error_display() {
        let err = SummarizeError::Inference("device lost".into());
        assert_eq!(err.to_string(), "model inference failed: device lost");
    }
}
