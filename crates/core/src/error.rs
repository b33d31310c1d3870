//! Error types for the fieldfx core.

use thiserror::Error;

/// Errors produced by field, layout and scene operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A configuration value was outside its documented range.
    #[error("invalid config '{name}' = {value}: {reason}")]
    InvalidConfig {
        name: String,
        value: f64,
        reason: String,
    },

    /// An operation was invoked on a renderer after `dispose()`.
    #[error("renderer has been disposed")]
    Disposed,

    /// A renderer or layout was asked to work with zero points.
    #[error("point set must not be empty")]
    EmptyPointSet,

    /// Field width/height (or grid cell counts) were zero or not finite.
    #[error("invalid dimensions: width and height must be positive")]
    InvalidDimensions,

    /// A scene's point set no longer matches the layout it draws from.
    #[error("layout expects {expected} points, renderer holds {actual}")]
    LayoutMismatch { expected: usize, actual: usize },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A scene name was not recognized by the registry.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// Snapshot or other file output failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl FieldError {
    pub(crate) fn config(name: &str, value: f64, reason: &str) -> Self {
        FieldError::InvalidConfig {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_includes_name_value_and_reason() {
        let err = FieldError::config("pointer_smoothing", 1.5, "must be in [0, 1]");
        let msg = err.to_string();
        assert!(msg.contains("pointer_smoothing"), "missing name in: {msg}");
        assert!(msg.contains("1.5"), "missing value in: {msg}");
        assert!(msg.contains("[0, 1]"), "missing reason in: {msg}");
    }

    #[test]
    fn disposed_mentions_disposed() {
        assert!(FieldError::Disposed.to_string().contains("disposed"));
    }

    #[test]
    fn unknown_scene_includes_name() {
        let msg = FieldError::UnknownScene("lava-lamp".into()).to_string();
        assert!(msg.contains("lava-lamp"), "missing scene name in: {msg}");
    }

    #[test]
    fn layout_mismatch_reports_both_counts() {
        let msg = FieldError::LayoutMismatch {
            expected: 273,
            actual: 1,
        }
        .to_string();
        assert!(msg.contains("273") && msg.contains('1'), "counts missing in: {msg}");
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
