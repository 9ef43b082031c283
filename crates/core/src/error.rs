/// A request parameter failed validation.
///
/// Rules are checked in a fixed order (prompt, shape, guidance scale) and
/// the first failure wins, so a request only ever reports one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required parameter: prompt")]
    MissingPrompt,

    #[error("Invalid shape. Must be one of: portrait, landscape, square")]
    InvalidShape,

    #[error("Guidance scale must be between 0 and 20")]
    InvalidGuidanceScale,
}

impl ValidationError {
    /// Stable machine-readable code rendered in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingPrompt => "MISSING_PROMPT",
            ValidationError::InvalidShape => "INVALID_SHAPE",
            ValidationError::InvalidGuidanceScale => "INVALID_GUIDANCE_SCALE",
        }
    }
}
