//! Reproducible description of a scene.
//!
//! A [`SceneSeed`] names a scene and carries everything needed to rebuild it
//! bit-for-bit: field size, parameter overrides and the layout seed.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneSeed {
    pub scene: String,
    pub width: f64,
    pub height: f64,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl SceneSeed {
    /// Seed with no parameter overrides.
    pub fn new(scene: &str, width: f64, height: f64, seed: u64) -> Self {
        Self {
            scene: scene.to_string(),
            width,
            height,
            params: empty_params(),
            seed,
        }
    }

    /// Checks that the field dimensions are positive and finite.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
        {
            Ok(())
        } else {
            Err(FieldError::InvalidDimensions)
        }
    }
}
