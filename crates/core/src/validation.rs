//! Parameter validation shared by the query-string and JSON entry points.
//!
//! Query strings deliver every value as text while JSON bodies deliver
//! numbers, so raw values are captured as [`ParamValue`] and interpreted
//! here. Rules run in a fixed order and the first failure wins:
//!
//! 1. `prompt` present and non-empty, else [`ValidationError::MissingPrompt`]
//! 2. `shape` one of the known shapes, else [`ValidationError::InvalidShape`]
//! 3. `guidance_scale` a number in `[0, 20]`, else
//!    [`ValidationError::InvalidGuidanceScale`]

use serde::Deserialize;

use crate::error::ValidationError;
use crate::generation::{
    GenerationRequest, Shape, DEFAULT_GUIDANCE_SCALE, DEFAULT_SEED, MAX_GUIDANCE_SCALE,
    MIN_GUIDANCE_SCALE,
};

/// A scalar parameter as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Interpret as a float. Text is trimmed and parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(n) => Some(*n as f64),
            ParamValue::Float(f) => Some(*f),
            ParamValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Interpret as an integer. Floats with a fractional part are rejected.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            ParamValue::Float(_) => None,
            ParamValue::Text(s) => s.trim().parse().ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, ParamValue::Text(s) if s.trim().is_empty())
    }
}

/// Unvalidated generation parameters, deserializable from both a query
/// string and a JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGenerationParams {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub seed: Option<ParamValue>,
    #[serde(default)]
    pub guidance_scale: Option<ParamValue>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub negative_prompt: Option<String>,
}

impl RawGenerationParams {
    /// Build from decoded query pairs. When a key repeats, the first value
    /// wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "prompt" if params.prompt.is_none() => params.prompt = Some(value.into()),
                "shape" if params.shape.is_none() => params.shape = Some(value.into()),
                "negative_prompt" if params.negative_prompt.is_none() => {
                    params.negative_prompt = Some(value.into())
                }
                "seed" if params.seed.is_none() => {
                    params.seed = Some(ParamValue::Text(value.into()))
                }
                "guidance_scale" if params.guidance_scale.is_none() => {
                    params.guidance_scale = Some(ParamValue::Text(value.into()))
                }
                _ => {}
            }
        }
        params
    }
}

/// Validate raw parameters and apply defaults for absent optional fields.
///
/// A present `shape` is always checked, even when empty. Blank `seed` and
/// `guidance_scale` values count as absent. An unparsable `seed` falls back
/// to [`DEFAULT_SEED`] rather than failing, since the provider treats it
/// as "pick one at random" anyway.
pub fn validate(raw: RawGenerationParams) -> Result<GenerationRequest, ValidationError> {
    let prompt = raw
        .prompt
        .filter(|p| !p.is_empty())
        .ok_or(ValidationError::MissingPrompt)?;

    let shape = match raw.shape.as_deref() {
        None => Shape::default(),
        Some(s) => s.parse()?,
    };

    let guidance_scale = match raw.guidance_scale {
        None => DEFAULT_GUIDANCE_SCALE,
        Some(ref v) if v.is_blank() => DEFAULT_GUIDANCE_SCALE,
        Some(v) => parse_guidance_scale(&v)?,
    };

    let seed = raw
        .seed
        .filter(|v| !v.is_blank())
        .map(|v| v.as_i64().unwrap_or(DEFAULT_SEED))
        .unwrap_or(DEFAULT_SEED);

    let negative_prompt = raw.negative_prompt.filter(|n| !n.is_empty());

    Ok(GenerationRequest {
        prompt,
        seed,
        guidance_scale,
        shape,
        negative_prompt,
    })
}

fn parse_guidance_scale(value: &ParamValue) -> Result<f64, ValidationError> {
    value
        .as_f64()
        .filter(|g| (MIN_GUIDANCE_SCALE..=MAX_GUIDANCE_SCALE).contains(g))
        .ok_or(ValidationError::InvalidGuidanceScale)
}
