use thiserror::Error;

/// Raised by a content factory that cannot build a slot's content. The
/// engine keeps the slot as a placeholder and carries on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContentError {
    #[error("content for slot {index} could not be created: {reason}")]
    Failed { index: usize, reason: String },
}

impl ContentError {
    pub fn failed(index: usize, reason: impl Into<String>) -> Self {
        ContentError::Failed {
            index,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("velocity threshold must be finite and non-negative, got {0}")]
    VelocityThreshold(f32),
    #[error("translation ratio must lie in (0, 1], got {0}")]
    TranslationRatio(f32),
    #[error("spring easing needs positive damping and stiffness, got {damping} and {stiffness}")]
    SpringParameters { damping: f32, stiffness: f32 },
}
