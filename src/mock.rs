//! Tiny model fixtures for tests.
//!
//! Builds a one-layer RoBERTa with a word-level tokenizer entirely in code, so the
//! real loading path (config merge, safetensors, tokenizer.json) runs without any
//! downloaded checkpoint.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use candle_core::{DType, Device};
use candle_nn::{VarBuilder, VarMap};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokenizers::Tokenizer;

use crate::classifier::{BullyingClassifier, ClassifierConfig, ClassifierError};
use crate::model::{CyberbullyingModel, EncoderConfig, configure_fixed_length};

/// Token length used by the tiny fixtures.
pub const TINY_MAX_SEQ_LEN: usize = 16;

/// Pad id of the tiny vocabulary (matches RoBERTa).
pub const TINY_PAD_ID: u32 = 1;

/// Vocabulary of the tiny tokenizer; ids are positions in this list.
pub const TINY_VOCAB: &[&str] = &[
    "<s>", "<pad>", "</s>", "<unk>", "you", "are", "a", "loser", "nobody", "likes", "have",
    "nice", "day", "great", "job", "friend", "stupid", "idiot", "hello", "world", "go", "away",
    "thanks", "for", "help", "the", "is", "and", "so", "very",
];

/// Hyper-parameters of the tiny encoder.
pub fn tiny_encoder_config_json() -> Value {
    json!({
        "hidden_size": 16,
        "num_hidden_layers": 1,
        "num_attention_heads": 2,
        "intermediate_size": 32,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.1,
        "attention_probs_dropout_prob": 0.1,
        "max_position_embeddings": 40,
        "type_vocab_size": 1,
        "vocab_size": TINY_VOCAB.len(),
        "layer_norm_eps": 1e-5,
        "pad_token_id": TINY_PAD_ID,
        "position_embedding_type": "absolute"
    })
}

pub fn tiny_encoder_config() -> Result<EncoderConfig, ClassifierError> {
    serde_json::from_value(tiny_encoder_config_json()).map_err(|e| {
        ClassifierError::InvalidConfig {
            reason: e.to_string(),
        }
    })
}

/// `tokenizer.json` for a lowercasing, whitespace-splitting word-level tokenizer
/// with RoBERTa-style `<s> ... </s>` wrapping.
pub fn tiny_tokenizer_json() -> String {
    let vocab: serde_json::Map<String, Value> = TINY_VOCAB
        .iter()
        .enumerate()
        .map(|(id, token)| (token.to_string(), json!(id)))
        .collect();

    json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": { "type": "Lowercase" },
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": {
            "type": "RobertaProcessing",
            "sep": ["</s>", 2],
            "cls": ["<s>", 0],
            "trim_offsets": false,
            "add_prefix_space": false
        },
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "<unk>"
        }
    })
    .to_string()
}

/// Tiny tokenizer already configured for fixed-length padding.
pub fn tiny_tokenizer(max_seq_len: usize) -> Result<Tokenizer, ClassifierError> {
    let mut tokenizer = Tokenizer::from_str(&tiny_tokenizer_json()).map_err(|e| {
        ClassifierError::ModelLoadFailed {
            reason: e.to_string(),
        }
    })?;
    configure_fixed_length(&mut tokenizer, max_seq_len, TINY_PAD_ID).map_err(|e| {
        ClassifierError::ModelLoadFailed {
            reason: e.to_string(),
        }
    })?;
    Ok(tokenizer)
}

/// Paths of a tiny model written to disk.
#[derive(Debug, Clone)]
pub struct TinyModelFiles {
    pub tokenizer_path: PathBuf,
    pub weights_path: PathBuf,
    pub encoder_config_path: PathBuf,
}

impl TinyModelFiles {
    pub fn classifier_config(&self, num_severity: usize) -> ClassifierConfig {
        ClassifierConfig::new(&self.tokenizer_path, &self.weights_path)
            .with_encoder_config(&self.encoder_config_path)
            .with_num_severity(num_severity)
            .with_max_seq_len(TINY_MAX_SEQ_LEN)
    }
}

/// Writes `config.json`, `tokenizer.json` and randomly initialised
/// `model.safetensors` into `dir`.
pub fn write_tiny_model_dir(
    dir: &Path,
    num_severity: usize,
) -> Result<TinyModelFiles, ClassifierError> {
    let encoder_config_path = dir.join("config.json");
    let tokenizer_path = dir.join("tokenizer.json");
    let weights_path = dir.join("model.safetensors");

    std::fs::write(&encoder_config_path, tiny_encoder_config_json().to_string())
        .map_err(io_error)?;
    std::fs::write(&tokenizer_path, tiny_tokenizer_json()).map_err(io_error)?;

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    CyberbullyingModel::new(&tiny_encoder_config()?, num_severity, vb)?;
    varmap
        .save(&weights_path)
        .map_err(|e| ClassifierError::ModelLoadFailed {
            reason: e.to_string(),
        })?;

    Ok(TinyModelFiles {
        tokenizer_path,
        weights_path,
        encoder_config_path,
    })
}

/// Loads a randomly initialised tiny classifier through the regular file path.
///
/// The returned [`TempDir`] owns the model files.
pub fn tiny_classifier(
    num_severity: usize,
) -> Result<(BullyingClassifier, TempDir), ClassifierError> {
    let dir = TempDir::new().map_err(io_error)?;
    let files = write_tiny_model_dir(dir.path(), num_severity)?;
    let classifier = BullyingClassifier::load_on(files.classifier_config(num_severity), Device::Cpu)?;
    Ok((classifier, dir))
}

/// Tiny classifier whose weights are all zero.
///
/// Every head emits exactly zero, so each text scores `sigmoid(0) = 0.5`
/// (not bullying), an intent of `50.0` and severity `0`.
pub fn zero_classifier(num_severity: usize) -> Result<BullyingClassifier, ClassifierError> {
    let device = Device::Cpu;
    let vb = VarBuilder::zeros(DType::F32, &device);
    let model = CyberbullyingModel::new(&tiny_encoder_config()?, num_severity, vb)?;
    let tokenizer = tiny_tokenizer(TINY_MAX_SEQ_LEN)?;

    let config = ClassifierConfig::default()
        .with_num_severity(num_severity)
        .with_max_seq_len(TINY_MAX_SEQ_LEN);

    Ok(BullyingClassifier::new(model, tokenizer, device, config))
}

fn io_error(err: std::io::Error) -> ClassifierError {
    ClassifierError::ModelLoadFailed {
        reason: err.to_string(),
    }
}
