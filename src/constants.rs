//! Cross-cutting, shared constants.
//!
//! # Severity Invariant
//!
//! The number of severity classes is fixed when the model is constructed and must
//! match the shape of the `severity_head` weights. Use [`validate_severity_classes`]
//! at load boundaries so a mismatch surfaces as a startup failure instead of a
//! wrong arg-max at request time.

/// Fixed token length used for truncation and padding.
pub const DEFAULT_MAX_SEQ_LEN: usize = 128;

/// Default number of severity buckets.
pub const DEFAULT_NUM_SEVERITY: usize = 5;

/// Probability above which a text is flagged as bullying (strictly greater).
pub const BULLYING_THRESHOLD: f32 = 0.5;

/// Sigmoid output of the intent head is scaled to `[0, INTENT_SCORE_SCALE]`.
pub const INTENT_SCORE_SCALE: f64 = 100.0;

/// Dropout probability applied to the pooled output during training.
pub const HEAD_DROPOUT: f32 = 0.3;

/// Weight prefix of the encoder inside the checkpoint.
pub const ENCODER_PREFIX: &str = "roberta";

/// Weight prefixes of the three output heads.
pub const BULLYING_HEAD: &str = "bullying_head";
pub const INTENT_HEAD: &str = "intent_head";
pub const SEVERITY_HEAD: &str = "severity_head";

/// Error returned when the severity class count is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeverityValidationError {
    /// At least one severity class is required.
    ZeroClasses,
    /// The loaded head does not have the configured number of classes.
    ClassCountMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for SeverityValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroClasses => write!(f, "severity class count cannot be zero"),
            Self::ClassCountMismatch { expected, actual } => {
                write!(
                    f,
                    "severity class mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SeverityValidationError {}

/// Validates that a loaded severity head produces the configured number of classes.
///
/// # Example
///
/// ```
/// use intent_guard::constants::{validate_severity_classes, DEFAULT_NUM_SEVERITY};
///
/// validate_severity_classes(5, DEFAULT_NUM_SEVERITY).unwrap();
/// assert!(validate_severity_classes(3, DEFAULT_NUM_SEVERITY).is_err());
/// ```
pub fn validate_severity_classes(
    actual: usize,
    expected: usize,
) -> Result<(), SeverityValidationError> {
    if expected == 0 {
        return Err(SeverityValidationError::ZeroClasses);
    }
    if actual != expected {
        return Err(SeverityValidationError::ClassCountMismatch { expected, actual });
    }
    Ok(())
}
