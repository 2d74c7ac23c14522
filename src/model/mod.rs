//! Multi-head cyberbullying network and its loading helpers.
//!
//! - [`network`] composes the encoder with the bullying, intent and severity heads.
//! - [`encoder`] wraps the RoBERTa encoder and pooler.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// RoBERTa encoder + pooler and its configuration.
pub mod encoder;
mod error;
/// Encoder plus the three output heads.
pub mod network;
/// Tokenizer loading helpers.
pub mod utils;


pub use device::select_device;
pub use encoder::{EncoderConfig, RobertaEncoder, load_encoder_config, roberta_base_config};
pub use error::ModelError;
pub use network::{CyberbullyingModel, HeadOutputs};
pub use utils::{configure_fixed_length, load_tokenizer, load_tokenizer_fixed_length};
