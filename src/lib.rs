//! Intent Guard library crate (used by the server and integration tests).
//!
//! Scores text for cyberbullying with a RoBERTa encoder and three heads:
//! a bullying probability (thresholded into a flag), a 0-100 harmful-intent
//! score and unnormalized severity logits (arg-maxed into a class).
//!
//! ## Modules
//! - [`config`] - Environment-backed server configuration
//! - [`model`] - Encoder, heads, device selection and tokenizer loading
//! - [`classifier`] - The shared, read-only [`BullyingClassifier`]
//! - [`prediction`] - Post-processing into [`Prediction`]
//!
//! ## Test/Mock Support
//! Tiny in-code fixtures are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod classifier;
pub mod config;
pub mod constants;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod prediction;

pub use classifier::{BullyingClassifier, ClassifierConfig, ClassifierError};
pub use config::{Config, ConfigError};
pub use constants::{
    BULLYING_THRESHOLD, DEFAULT_MAX_SEQ_LEN, DEFAULT_NUM_SEVERITY, SeverityValidationError,
    validate_severity_classes,
};
pub use model::{CyberbullyingModel, EncoderConfig, HeadOutputs, ModelError, select_device};
pub use prediction::{Prediction, PredictionError};
