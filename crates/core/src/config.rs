//! Field configuration, validation and JSON schema.
//!
//! Out-of-range values are rejected with [`FieldError::InvalidConfig`]; the
//! renderer never clamps a configuration silently.
//!
//! Conventions: `pointer_smoothing = 1` means the smoothed pointer reaches its
//! target in a single tick (no lag), `0` means it never moves.
//! `impulse_decay = 1` means the impulse never decays, `0` means it vanishes
//! after one tick.

use crate::easing::Easing;
use crate::error::FieldError;
use crate::params::{param_f64, param_str};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_INFLUENCE_RADIUS: f64 = 30.0;
const DEFAULT_BASE_STRENGTH: f64 = 4.0;
const DEFAULT_IMPULSE_GAIN: f64 = 8.0;
const DEFAULT_POINTER_SMOOTHING: f64 = 0.06;
const DEFAULT_IMPULSE_DECAY: f64 = 0.92;
/// Frame rate the per-frame coefficients were tuned at.
pub const DEFAULT_REFERENCE_FPS: f64 = 60.0;

/// Which way a point moves relative to the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Points are pulled toward the pointer (hero grid).
    #[default]
    Attract,
    /// Points are pushed away from the pointer (skills graph).
    Repel,
}

impl Polarity {
    /// Parses `"attract"` or `"repel"`.
    pub fn from_name(name: &str) -> Option<Polarity> {
        match name {
            "attract" => Some(Polarity::Attract),
            "repel" => Some(Polarity::Repel),
            _ => None,
        }
    }

    /// Name accepted by [`Polarity::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Polarity::Attract => "attract",
            Polarity::Repel => "repel",
        }
    }

    /// Sign applied to the pointer-to-point unit vector.
    pub(crate) fn sign(self) -> f64 {
        match self {
            Polarity::Attract => -1.0,
            Polarity::Repel => 1.0,
        }
    }
}

/// How smoothing and decay coefficients relate to frame time.
///
/// `PerFrame` applies each coefficient once per `tick` regardless of
/// `dt`, so visual speed follows the display refresh rate. `TimeScaled`
/// rescales them as if ticks ran at `reference_fps`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum SmoothingMode {
    #[default]
    PerFrame,
    TimeScaled { reference_fps: f64 },
}

/// Configuration of a [`ReactiveFieldRenderer`](crate::ReactiveFieldRenderer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Distance at and beyond which a point is unaffected. Must be > 0.
    pub influence_radius: f64,
    /// Displacement at zero distance with no impulse. Must be ≥ 0.
    pub base_strength: f64,
    /// Extra strength per unit of impulse. Must be ≥ 0.
    pub impulse_gain: f64,
    /// Fraction of the remaining gap closed per tick, in [0, 1].
    pub pointer_smoothing: f64,
    /// Multiplier applied to the impulse per tick, in [0, 1].
    pub impulse_decay: f64,
    pub easing: Easing,
    pub polarity: Polarity,
    pub smoothing_mode: SmoothingMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            base_strength: DEFAULT_BASE_STRENGTH,
            impulse_gain: DEFAULT_IMPULSE_GAIN,
            pointer_smoothing: DEFAULT_POINTER_SMOOTHING,
            impulse_decay: DEFAULT_IMPULSE_DECAY,
            easing: Easing::default(),
            polarity: Polarity::default(),
            smoothing_mode: SmoothingMode::default(),
        }
    }
}

impl FieldConfig {
    /// Reads a config from a loose params object, starting from `base` for
    /// missing or mistyped keys, then validates it.
    pub fn from_json(params: &Value, base: FieldConfig) -> Result<Self, FieldError> {
        let easing_name = param_str(params, "easing", base.easing.name());
        let easing = Easing::from_name(easing_name).ok_or_else(|| {
            FieldError::config("easing", f64::NAN, &format!("unknown easing '{easing_name}'"))
        })?;
        let polarity_name = param_str(params, "polarity", base.polarity.name());
        let polarity = Polarity::from_name(polarity_name).ok_or_else(|| {
            FieldError::config("polarity", f64::NAN, &format!("unknown polarity '{polarity_name}'"))
        })?;
        let smoothing_mode = match params.get("reference_fps").and_then(Value::as_f64) {
            Some(reference_fps) => SmoothingMode::TimeScaled { reference_fps },
            None => base.smoothing_mode,
        };

        let config = Self {
            influence_radius: param_f64(params, "influence_radius", base.influence_radius),
            base_strength: param_f64(params, "base_strength", base.base_strength),
            impulse_gain: param_f64(params, "impulse_gain", base.impulse_gain),
            pointer_smoothing: param_f64(params, "pointer_smoothing", base.pointer_smoothing),
            impulse_decay: param_f64(params, "impulse_decay", base.impulse_decay),
            easing,
            polarity,
            smoothing_mode,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its documented range.
    pub fn validate(&self) -> Result<(), FieldError> {
        if !(self.influence_radius.is_finite() && self.influence_radius > 0.0) {
            return Err(FieldError::config(
                "influence_radius",
                self.influence_radius,
                "must be finite and > 0",
            ));
        }
        non_negative("base_strength", self.base_strength)?;
        non_negative("impulse_gain", self.impulse_gain)?;
        unit_interval("pointer_smoothing", self.pointer_smoothing)?;
        unit_interval("impulse_decay", self.impulse_decay)?;
        if let SmoothingMode::TimeScaled { reference_fps } = self.smoothing_mode {
            if !(reference_fps.is_finite() && reference_fps > 0.0) {
                return Err(FieldError::config(
                    "reference_fps",
                    reference_fps,
                    "must be finite and > 0",
                ));
            }
        }
        Ok(())
    }

    /// Current values as a JSON object, keyed like [`FieldConfig::from_json`].
    pub fn to_params(&self) -> Value {
        let mut v = json!({
            "influence_radius": self.influence_radius,
            "base_strength": self.base_strength,
            "impulse_gain": self.impulse_gain,
            "pointer_smoothing": self.pointer_smoothing,
            "impulse_decay": self.impulse_decay,
            "easing": self.easing.name(),
            "polarity": self.polarity.name(),
        });
        if let SmoothingMode::TimeScaled { reference_fps } = self.smoothing_mode {
            v["reference_fps"] = json!(reference_fps);
        }
        v
    }

    /// Schema of the recognized keys with `self` as the defaults.
    pub fn param_schema(&self) -> Value {
        json!({
            "influence_radius": {
                "type": "number",
                "default": self.influence_radius,
                "min": 0.0,
                "exclusive_min": true,
                "description": "Distance beyond which a point is unaffected"
            },
            "base_strength": {
                "type": "number",
                "default": self.base_strength,
                "min": 0.0,
                "description": "Maximum displacement at zero distance"
            },
            "impulse_gain": {
                "type": "number",
                "default": self.impulse_gain,
                "min": 0.0,
                "description": "Extra strength per unit of impulse"
            },
            "pointer_smoothing": {
                "type": "number",
                "default": self.pointer_smoothing,
                "min": 0.0,
                "max": 1.0,
                "description": "Fraction of pointer lag closed per tick (1 = no lag)"
            },
            "impulse_decay": {
                "type": "number",
                "default": self.impulse_decay,
                "min": 0.0,
                "max": 1.0,
                "description": "Impulse multiplier per tick (1 = no decay)"
            },
            "easing": {
                "type": "string",
                "default": self.easing.name(),
                "enum": ["quadratic", "linear"],
                "description": "Falloff curve applied to normalized influence"
            },
            "polarity": {
                "type": "string",
                "default": self.polarity.name(),
                "enum": ["attract", "repel"],
                "description": "Whether points move toward or away from the pointer"
            },
            "reference_fps": {
                "type": "number",
                "min": 0.0,
                "exclusive_min": true,
                "description": "If set, scale smoothing and decay by frame time at this rate"
            }
        })
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), FieldError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::config(name, value, "must be finite and >= 0"))
    }
}

fn unit_interval(name: &str, value: f64) -> Result<(), FieldError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::config(name, value, "must be in [0, 1]"))
    }
}
