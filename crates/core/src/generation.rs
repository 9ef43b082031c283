//! The generation request model and its defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Defaults and bounds
// ---------------------------------------------------------------------------

/// Seed sent when the caller does not pick one; the provider randomises it.
pub const DEFAULT_SEED: i64 = -1;
/// Guidance scale used when none is supplied.
pub const DEFAULT_GUIDANCE_SCALE: f64 = 7.0;
/// Lowest accepted guidance scale (inclusive).
pub const MIN_GUIDANCE_SCALE: f64 = 0.0;
/// Highest accepted guidance scale (inclusive).
pub const MAX_GUIDANCE_SCALE: f64 = 20.0;

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// Aspect-ratio category of the generated image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Portrait,
    Landscape,
    #[default]
    Square,
}

impl Shape {
    /// All accepted shapes, in the order they are listed to callers.
    pub const ALL: [Shape; 3] = [Shape::Portrait, Shape::Landscape, Shape::Square];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Portrait => "portrait",
            Shape::Landscape => "landscape",
            Shape::Square => "square",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = ValidationError;

    /// Matching is case-sensitive: `"Square"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or(ValidationError::InvalidShape)
    }
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

/// A validated image generation request.
///
/// Only [`crate::validation::validate`] produces one from caller input, so a
/// value of this type always satisfies the prompt, shape, and guidance-scale
/// rules. It is also the JSON body the front API posts to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub seed: i64,
    pub guidance_scale: f64,
    pub shape: Shape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
}

impl GenerationRequest {
    /// Build a request for `prompt` with every optional field defaulted.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            seed: DEFAULT_SEED,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
            shape: Shape::default(),
            negative_prompt: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Generation result
// ---------------------------------------------------------------------------

/// Successful worker reply: the echoed request plus the image.
///
/// The worker always fills `image_base64`. `image_url` is set instead when an
/// image host sits in front of the worker; the front API accepts either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub request: GenerationRequest,
}
