//! Candle-based local summarization backend (flan-T5).
//!
//! Runs a seq2seq T5 model locally using the `candle` crate.
//! No external API calls, pure Rust inference.

use super::SummaryModel;
use crate::config::{Config, DevicePreference};
use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5::{Config as T5Config, T5ForConditionalGeneration};
use hf_hub::{api::sync::ApiBuilder, Repo, RepoType};
use tokenizers::Tokenizer;
use tracing::info;

// T5 checkpoints are trained with a task prefix selecting the objective.
const TASK_PREFIX: &str = "summarize: ";

// Greedy decoding ignores the seed, but LogitsProcessor requires one.
const DECODE_SEED: u64 = 299792458;

/// Local summarization backend using Candle
pub struct CandleSummarizer {
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    t5_config: T5Config,
    prefix_ids: Vec<u32>,
    capacity: usize,
    max_summary_tokens: usize,
}

impl CandleSummarizer {
    /// Load the configured model, downloading weights into the local
    /// HuggingFace cache on first use.
    pub fn load(config: &Config) -> Result<Self> {
        let device = select_device(&config.device)?;
        let model_id = config.model.hf_id();
        info!(
            model = model_id,
            device = config.device.name(),
            size_mb = config.model.size_mb(),
            "loading summarization model"
        );

        // Download model files from HuggingFace with progress
        let api = ApiBuilder::new()
            .with_progress(true)
            .build()
            .context("Failed to create HuggingFace API")?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo.get("config.json").context("Failed to get config.json")?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .context("Failed to get tokenizer.json")?;
        let weights_path = repo
            .get("model.safetensors")
            .context("Failed to get model.safetensors")?;

        // Load config
        let config_str = std::fs::read_to_string(&config_path)?;
        let t5_config: T5Config = serde_json::from_str(&config_str)?;

        // Load tokenizer
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        // Load model weights
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)? };
        let model = T5ForConditionalGeneration::load(vb, &t5_config)?;

        let prefix_ids: Vec<u32> = tokenizer
            .encode(TASK_PREFIX, false)
            .map_err(anyhow::Error::msg)?
            .get_ids()
            .to_vec();

        // Usable input budget: encoder context minus the task prefix and
        // the closing EOS that generate() wraps around each input.
        let capacity = config.model.capacity() - prefix_ids.len() - 1;

        info!(capacity, "model ready");

        Ok(Self {
            model,
            tokenizer,
            device,
            t5_config,
            prefix_ids,
            capacity,
            max_summary_tokens: config.max_summary_tokens,
        })
    }
}

impl SummaryModel for CandleSummarizer {
    fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        // No special tokens here: the windowing logic slices these ids
        // mid-sequence, and generate() wraps each slice itself.
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(anyhow::Error::msg)?;
        Ok(encoding.get_ids().to_vec())
    }

    fn detokenize(&self, ids: &[u32]) -> Result<String> {
        let text = self
            .tokenizer
            .decode(ids, true)
            .map_err(anyhow::Error::msg)?;
        Ok(text.trim().to_string())
    }

    fn generate(&self, ids: &[u32]) -> Result<Vec<u32>> {
        // The clone shares the weight tensors; it exists so this call gets a
        // private KV cache and concurrent generate calls don't interfere.
        let mut model = self.model.clone();
        model.clear_kv_cache();

        let mut input_ids = Vec::with_capacity(self.prefix_ids.len() + ids.len() + 1);
        input_ids.extend_from_slice(&self.prefix_ids);
        input_ids.extend_from_slice(ids);
        input_ids.push(self.t5_config.eos_token_id as u32);

        let input = Tensor::new(input_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let encoder_output = model.encode(&input)?;

        let decoder_start = self
            .t5_config
            .decoder_start_token_id
            .unwrap_or(self.t5_config.pad_token_id) as u32;
        let mut output_ids = vec![decoder_start];
        let mut logits_processor = LogitsProcessor::new(DECODE_SEED, None, None);

        for index in 0..self.max_summary_tokens {
            let decoder_input = if index == 0 || !self.t5_config.use_cache {
                Tensor::new(output_ids.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = output_ids[output_ids.len() - 1];
                Tensor::new(&[last], &self.device)?.unsqueeze(0)?
            };

            let logits = model.decode(&decoder_input, &encoder_output)?.squeeze(0)?;
            let next = logits_processor.sample(&logits)?;
            if next as usize == self.t5_config.eos_token_id {
                break;
            }
            output_ids.push(next);
        }

        // Drop the decoder-start token; callers only see generated content.
        output_ids.remove(0);
        Ok(output_ids)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Pick a compute device according to the configured preference.
fn select_device(preference: &DevicePreference) -> Result<Device> {
    match preference {
        DevicePreference::Cpu => Ok(Device::Cpu),
        DevicePreference::Cuda => {
            Device::new_cuda(0).context("CUDA device requested but unavailable")
        }
        DevicePreference::Metal => {
            Device::new_metal(0).context("Metal device requested but unavailable")
        }
        DevicePreference::Auto => {
            if candle_core::utils::cuda_is_available() {
                Ok(Device::new_cuda(0)?)
            } else if candle_core::utils::metal_is_available() {
                Ok(Device::new_metal(0)?)
            } else {
                Ok(Device::Cpu)
            }
        }
    }
}
