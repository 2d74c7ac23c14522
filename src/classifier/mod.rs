//! Read-only scoring service: tokenizer + model + device.
//!
//! A loaded [`BullyingClassifier`] never mutates after construction, so it can be
//! shared behind an `Arc` by any number of request handlers.

pub mod config;
pub mod error;


pub use config::{ClassifierConfig, DEFAULT_TOKENIZER_PATH, DEFAULT_WEIGHTS_PATH};
pub use error::ClassifierError;

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::model::{
    CyberbullyingModel, load_encoder_config, load_tokenizer_fixed_length, select_device,
};
use crate::prediction::{self, Prediction};

pub struct BullyingClassifier {
    device: Device,
    config: ClassifierConfig,
    model: CyberbullyingModel,
    tokenizer: Tokenizer,
}

impl std::fmt::Debug for BullyingClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BullyingClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .finish()
    }
}

impl BullyingClassifier {
    /// Loads tokenizer and weights on the best available device.
    pub fn load(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        Self::load_on(config, select_device())
    }

    /// Loads tokenizer and weights on an explicit device.
    pub fn load_on(config: ClassifierConfig, device: Device) -> Result<Self, ClassifierError> {
        if let Err(msg) = config.validate() {
            return Err(ClassifierError::InvalidConfig { reason: msg });
        }

        let encoder_config = load_encoder_config(config.encoder_config_path.as_deref())?;

        // Position ids run from pad_token_id + 1 up to pad_token_id + max_seq_len.
        let fits_positions = config
            .max_seq_len
            .checked_add(encoder_config.pad_token_id as usize)
            .is_some_and(|highest| highest < encoder_config.max_position_embeddings);
        if !fits_positions {
            return Err(ClassifierError::InvalidConfig {
                reason: format!(
                    "max_seq_len {} exceeds encoder max_position_embeddings {}",
                    config.max_seq_len, encoder_config.max_position_embeddings
                ),
            });
        }

        let model = CyberbullyingModel::load(
            &encoder_config,
            config.num_severity,
            &config.weights_path,
            &device,
        )?;

        let tokenizer = load_tokenizer_fixed_length(
            &config.tokenizer_path,
            config.max_seq_len,
            encoder_config.pad_token_id as u32,
        )
        .map_err(|e| ClassifierError::ModelLoadFailed {
            reason: format!("Failed to load tokenizer: {}", e),
        })?;

        info!(
            tokenizer_path = %config.tokenizer_path.display(),
            weights_path = %config.weights_path.display(),
            num_severity = config.num_severity,
            max_seq_len = config.max_seq_len,
            "Classifier loaded successfully"
        );

        Ok(Self::new(model, tokenizer, device, config))
    }

    /// Assembles a classifier from already-built parts.
    ///
    /// The tokenizer is expected to pad and truncate to `config.max_seq_len`.
    pub fn new(
        model: CyberbullyingModel,
        tokenizer: Tokenizer,
        device: Device,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            device,
            config,
            model,
            tokenizer,
        }
    }

    /// Scores a single text.
    pub fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let mut predictions = self.predict_batch(&[text])?;
        predictions
            .pop()
            .ok_or_else(|| ClassifierError::InferenceFailed {
                reason: "model returned no prediction".to_string(),
            })
    }

    /// Scores several texts in one forward pass.
    pub fn predict_batch(&self, texts: &[&str]) -> Result<Vec<Prediction>, ClassifierError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        debug!(
            batch_size = texts.len(),
            total_len = texts.iter().map(|t| t.len()).sum::<usize>(),
            "Scoring texts"
        );

        let (input_ids, attention_mask) = self.encode(texts)?;

        let outputs = self
            .model
            .forward(&input_ids, &attention_mask)
            .map_err(|e| ClassifierError::InferenceFailed {
                reason: format!("Forward pass failed: {}", e),
            })?;

        let predictions = prediction::from_outputs(&outputs)?;

        debug!(
            flagged = predictions.iter().filter(|p| p.is_bullying).count(),
            "Scoring complete"
        );

        Ok(predictions)
    }

    /// Tokenizes texts into `[batch, max_seq_len]` id and attention-mask tensors.
    pub fn encode(&self, texts: &[&str]) -> Result<(Tensor, Tensor), ClassifierError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| ClassifierError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let mut input_ids = Vec::with_capacity(encodings.len());
        let mut attention_masks = Vec::with_capacity(encodings.len());
        for encoding in &encodings {
            input_ids.push(Tensor::new(encoding.get_ids(), &self.device)?);
            attention_masks.push(Tensor::new(encoding.get_attention_mask(), &self.device)?);
        }

        Ok((
            Tensor::stack(&input_ids, 0)?,
            Tensor::stack(&attention_masks, 0)?,
        ))
    }

    pub fn num_severity(&self) -> usize {
        self.model.num_severity()
    }

    pub fn max_seq_len(&self) -> usize {
        self.config.max_seq_len
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}
