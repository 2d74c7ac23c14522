use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_NUM_SEVERITY};

/// Default tokenizer location (a `save_pretrained` folder).
pub const DEFAULT_TOKENIZER_PATH: &str = "tokenizer_folder";

/// Default fine-tuned checkpoint.
pub const DEFAULT_WEIGHTS_PATH: &str = "final_model.pth";

/// Configuration for [`BullyingClassifier`](super::BullyingClassifier).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Tokenizer directory or `tokenizer.json` file.
    pub tokenizer_path: PathBuf,
    /// `.pth`/`.pt`/`.bin` state dict or `.safetensors` file.
    pub weights_path: PathBuf,
    /// Optional encoder `config.json`; roberta-base when unset.
    pub encoder_config_path: Option<PathBuf>,
    pub num_severity: usize,
    pub max_seq_len: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tokenizer_path: PathBuf::from(DEFAULT_TOKENIZER_PATH),
            weights_path: PathBuf::from(DEFAULT_WEIGHTS_PATH),
            encoder_config_path: None,
            num_severity: DEFAULT_NUM_SEVERITY,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl ClassifierConfig {
    pub fn new<T: Into<PathBuf>, W: Into<PathBuf>>(tokenizer_path: T, weights_path: W) -> Self {
        Self {
            tokenizer_path: tokenizer_path.into(),
            weights_path: weights_path.into(),
            ..Default::default()
        }
    }

    pub fn with_encoder_config<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.encoder_config_path = Some(path.into());
        self
    }

    pub fn with_num_severity(mut self, num_severity: usize) -> Self {
        assert!(num_severity > 0, "num_severity must be at least 1");
        self.num_severity = num_severity;
        self
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        assert!(max_seq_len > 0, "max_seq_len must be at least 1");
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.num_severity == 0 {
            return Err("num_severity must be at least 1".to_string());
        }

        if self.max_seq_len == 0 {
            return Err("max_seq_len must be at least 1".to_string());
        }

        if self.tokenizer_path.as_os_str().is_empty() {
            return Err("tokenizer_path cannot be empty".to_string());
        }

        if self.weights_path.as_os_str().is_empty() {
            return Err("weights_path cannot be empty".to_string());
        }

        if let Some(ref path) = self.encoder_config_path
            && path.as_os_str().is_empty()
        {
            return Err("encoder_config_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
