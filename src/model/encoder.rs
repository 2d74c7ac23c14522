use candle_core::{IndexOp, Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::xlm_roberta::XLMRobertaModel;
use serde_json::{Value, json};
use std::path::Path;

use super::error::ModelError;

pub use candle_transformers::models::xlm_roberta::Config as EncoderConfig;

/// Hyper-parameters of `roberta-base` (and `cardiffnlp/twitter-roberta-base`).
pub fn roberta_base_config() -> Value {
    json!({
        "hidden_size": 768,
        "num_hidden_layers": 12,
        "num_attention_heads": 12,
        "intermediate_size": 3072,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.1,
        "attention_probs_dropout_prob": 0.1,
        "max_position_embeddings": 514,
        "type_vocab_size": 1,
        "vocab_size": 50265,
        "layer_norm_eps": 1e-5,
        "pad_token_id": 1,
        "position_embedding_type": "absolute"
    })
}

/// Loads the encoder configuration.
///
/// Keys present in the optional `config.json` override the roberta-base defaults, so a
/// Hugging Face config missing e.g. `position_embedding_type` still parses.
pub fn load_encoder_config(path: Option<&Path>) -> std::result::Result<EncoderConfig, ModelError> {
    let mut merged = roberta_base_config();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ModelError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let overrides: Value = serde_json::from_str(&content)?;
        merge_config(&mut merged, overrides)?;
    }

    Ok(serde_json::from_value(merged)?)
}

fn merge_config(base: &mut Value, overrides: Value) -> std::result::Result<(), ModelError> {
    let Value::Object(overrides) = overrides else {
        return Err(ModelError::InvalidConfig {
            reason: "encoder config must be a JSON object".to_string(),
        });
    };

    if let Value::Object(base) = base {
        for (key, value) in overrides {
            if !value.is_null() {
                base.insert(key, value);
            }
        }
    }
    Ok(())
}

/// RoBERTa encoder followed by its pooler (`tanh(dense(h_cls))`).
pub struct RobertaEncoder {
    roberta: XLMRobertaModel,
    pooler: Linear,
}

impl RobertaEncoder {
    pub fn new(config: &EncoderConfig, vb: VarBuilder) -> Result<Self> {
        let roberta = XLMRobertaModel::new(config, vb.clone())?;
        let pooler = candle_nn::linear(
            config.hidden_size,
            config.hidden_size,
            vb.pp("pooler").pp("dense"),
        )?;

        Ok(Self { roberta, pooler })
    }

    /// Returns the pooled output, shape `[batch, hidden_size]`.
    pub fn forward(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        // RoBERTa has a single token type.
        let token_type_ids = input_ids.zeros_like()?;
        let hidden_states = self.roberta.forward(
            input_ids,
            attention_mask,
            &token_type_ids,
            None,
            None,
            None,
        )?;

        let cls_token = hidden_states.i((.., 0))?.contiguous()?;
        self.pooler.forward(&cls_token)?.tanh()
    }
}
