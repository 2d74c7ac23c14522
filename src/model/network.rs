use candle_core::{D, DType, Device, Tensor};
use candle_nn::{Dropout, Linear, Module, VarBuilder};
use std::path::Path;
use tracing::{debug, info};

use super::encoder::{EncoderConfig, RobertaEncoder};
use super::error::ModelError;
use crate::constants::{
    BULLYING_HEAD, ENCODER_PREFIX, HEAD_DROPOUT, INTENT_HEAD, INTENT_SCORE_SCALE, SEVERITY_HEAD,
    validate_severity_classes,
};

/// Tensors a checkpoint must contain for every part of the network to be present.
const REQUIRED_TENSORS: [&str; 5] = [
    "roberta.embeddings.word_embeddings.weight",
    "roberta.pooler.dense.weight",
    "bullying_head.weight",
    "intent_head.weight",
    "severity_head.weight",
];

/// Raw per-item outputs of the three heads.
#[derive(Debug, Clone)]
pub struct HeadOutputs {
    /// Bullying probability, shape `[batch]`.
    pub is_bullying: Tensor,
    /// Intent score scaled to `[0, 100]`, shape `[batch]`.
    pub intent_score: Tensor,
    /// Unnormalized severity scores, shape `[batch, num_severity]`.
    pub severity_logits: Tensor,
}

/// Pretrained encoder with bullying, intent and severity heads on the pooled output.
pub struct CyberbullyingModel {
    encoder: RobertaEncoder,
    dropout: Dropout,
    bullying_head: Linear,
    intent_head: Linear,
    severity_head: Linear,
    num_severity: usize,
}

impl std::fmt::Debug for CyberbullyingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CyberbullyingModel")
            .field("num_severity", &self.num_severity)
            .finish_non_exhaustive()
    }
}

impl CyberbullyingModel {
    /// Builds the network from any weight source.
    pub fn new(
        config: &EncoderConfig,
        num_severity: usize,
        vb: VarBuilder,
    ) -> Result<Self, ModelError> {
        if num_severity == 0 {
            return Err(ModelError::InvalidConfig {
                reason: "num_severity must be at least 1".to_string(),
            });
        }

        let encoder = RobertaEncoder::new(config, vb.pp(ENCODER_PREFIX))?;
        let hidden_size = config.hidden_size;

        let bullying_head = candle_nn::linear(hidden_size, 1, vb.pp(BULLYING_HEAD))?;
        let intent_head = candle_nn::linear(hidden_size, 1, vb.pp(INTENT_HEAD))?;
        let severity_head = candle_nn::linear(hidden_size, num_severity, vb.pp(SEVERITY_HEAD))?;
        check_severity_classes(severity_head.weight().dim(0)?, num_severity)?;

        Ok(Self {
            encoder,
            dropout: Dropout::new(HEAD_DROPOUT),
            bullying_head,
            intent_head,
            severity_head,
            num_severity,
        })
    }

    /// Loads the network from a `.safetensors` file or a PyTorch state dict.
    pub fn load<P: AsRef<Path>>(
        config: &EncoderConfig,
        num_severity: usize,
        weights_path: P,
        device: &Device,
    ) -> Result<Self, ModelError> {
        let weights_path = weights_path.as_ref();
        if !weights_path.exists() {
            return Err(ModelError::ModelNotFound {
                path: weights_path.to_path_buf(),
            });
        }

        let vb = weights_var_builder(weights_path, device)?;

        for name in REQUIRED_TENSORS {
            if !vb.contains_tensor(name) {
                return Err(ModelError::ModelLoadFailed {
                    reason: format!(
                        "missing tensor '{}' in {}",
                        name,
                        weights_path.display()
                    ),
                });
            }
        }

        // A shape-hinted load would surface this as a generic shape error.
        let stored = vb.get_unchecked(&format!("{SEVERITY_HEAD}.weight"))?;
        check_severity_classes(stored.dim(0)?, num_severity)?;

        info!(
            weights_path = %weights_path.display(),
            hidden_size = config.hidden_size,
            num_layers = config.num_hidden_layers,
            num_severity,
            "Loading cyberbullying model"
        );

        Self::new(config, num_severity, vb)
    }

    /// Runs the encoder and the three heads (inference mode, dropout disabled).
    pub fn forward(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> candle_core::Result<HeadOutputs> {
        let pooled = self.encoder.forward(input_ids, attention_mask)?;
        let pooled = self.dropout.forward(&pooled, false)?;

        let is_bullying =
            candle_nn::ops::sigmoid(&self.bullying_head.forward(&pooled)?)?.squeeze(D::Minus1)?;
        let intent_score = (candle_nn::ops::sigmoid(&self.intent_head.forward(&pooled)?)?
            * INTENT_SCORE_SCALE)?
            .squeeze(D::Minus1)?;
        let severity_logits = self.severity_head.forward(&pooled)?;

        debug!(dims = ?severity_logits.dims(), "Forward pass complete");

        Ok(HeadOutputs {
            is_bullying,
            intent_score,
            severity_logits,
        })
    }

    pub fn num_severity(&self) -> usize {
        self.num_severity
    }
}

fn check_severity_classes(actual: usize, expected: usize) -> Result<(), ModelError> {
    validate_severity_classes(actual, expected).map_err(|e| ModelError::SeverityClassMismatch {
        expected,
        reason: e.to_string(),
    })
}

fn weights_var_builder(path: &Path, device: &Device) -> Result<VarBuilder<'static>, ModelError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("safetensors") => {
            // SAFETY: the weights file is not modified while it is mapped.
            let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device)? };
            Ok(vb)
        }
        Some("pth") | Some("pt") | Some("bin") => {
            Ok(VarBuilder::from_pth(path, DType::F32, device)?)
        }
        _ => Err(ModelError::UnsupportedWeights {
            path: path.to_path_buf(),
        }),
    }
}
