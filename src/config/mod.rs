//! Environment-backed configuration.
//!
//! Defaults mirror the values the service has always used (port 5000, a
//! `tokenizer_folder` directory and a `final_model.pth` checkpoint in the working
//! directory). Override with `INTENT_GUARD_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::classifier::{ClassifierConfig, DEFAULT_TOKENIZER_PATH, DEFAULT_WEIGHTS_PATH};
use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_NUM_SEVERITY};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `INTENT_GUARD_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Tokenizer directory or `tokenizer.json`. Default: `./tokenizer_folder`.
    pub tokenizer_path: PathBuf,

    /// Fine-tuned checkpoint. Default: `./final_model.pth`.
    pub weights_path: PathBuf,

    /// Encoder `config.json`; the roberta-base architecture is assumed when unset.
    pub encoder_config_path: Option<PathBuf>,

    /// Number of severity classes. Default: `5`.
    pub num_severity: usize,

    /// Truncation / padding length. Default: `128`.
    pub max_seq_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            tokenizer_path: PathBuf::from(DEFAULT_TOKENIZER_PATH),
            weights_path: PathBuf::from(DEFAULT_WEIGHTS_PATH),
            encoder_config_path: None,
            num_severity: DEFAULT_NUM_SEVERITY,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "INTENT_GUARD_PORT";
    const ENV_BIND_ADDR: &'static str = "INTENT_GUARD_BIND_ADDR";
    const ENV_TOKENIZER_PATH: &'static str = "INTENT_GUARD_TOKENIZER_PATH";
    const ENV_WEIGHTS_PATH: &'static str = "INTENT_GUARD_WEIGHTS_PATH";
    const ENV_ENCODER_CONFIG: &'static str = "INTENT_GUARD_ENCODER_CONFIG";
    const ENV_NUM_SEVERITY: &'static str = "INTENT_GUARD_NUM_SEVERITY";
    const ENV_MAX_SEQ_LEN: &'static str = "INTENT_GUARD_MAX_SEQ_LEN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let tokenizer_path =
            Self::parse_path_from_env(Self::ENV_TOKENIZER_PATH, defaults.tokenizer_path);
        let weights_path = Self::parse_path_from_env(Self::ENV_WEIGHTS_PATH, defaults.weights_path);
        let encoder_config_path = Self::parse_optional_path_from_env(Self::ENV_ENCODER_CONFIG);
        let num_severity =
            Self::parse_count_from_env(Self::ENV_NUM_SEVERITY, defaults.num_severity)?;
        let max_seq_len = Self::parse_count_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len)?;

        Ok(Self {
            port,
            bind_addr,
            tokenizer_path,
            weights_path,
            encoder_config_path,
            num_severity,
            max_seq_len,
        })
    }

    /// Validates paths and basic invariants before any model file is read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tokenizer_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.tokenizer_path.clone(),
            });
        }

        if !self.weights_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.weights_path.clone(),
            });
        }
        if !self.weights_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.weights_path.clone(),
            });
        }

        if let Some(ref path) = self.encoder_config_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    /// Model settings for [`BullyingClassifier::load`](crate::BullyingClassifier::load).
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            tokenizer_path: self.tokenizer_path.clone(),
            weights_path: self.weights_path.clone(),
            encoder_config_path: self.encoder_config_path.clone(),
            num_severity: self.num_severity,
            max_seq_len: self.max_seq_len,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.trim().parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value.trim().parse().map_err(|e| ConfigError::InvalidBindAddr {
                value: value.clone(),
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_path_from_env(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_count_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let count: usize =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::CountParseError {
                            name: var_name,
                            value: value.clone(),
                            source: e,
                        })?;

                if count == 0 {
                    return Err(ConfigError::ZeroCount {
                        name: var_name,
                        value,
                    });
                }

                Ok(count)
            }
            Err(_) => Ok(default),
        }
    }
}
