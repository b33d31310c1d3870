//! Lenient typed lookups into a loose `serde_json::Value` params object.
//!
//! Scene and config constructors accept user-supplied JSON where any key may
//! be missing or carry the wrong type. These helpers fall back to a default in
//! either case; range checks happen later in [`FieldConfig::validate`](crate::FieldConfig::validate).

use serde_json::Value;

/// Reads `params[name]` as `f64` (integers accepted), else `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer, else `default`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads `params[name]` as `bool`, else `default`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Reads `params[name]` as a string slice, else `default`.
pub fn param_str<'a>(params: &'a Value, name: &str, default: &'a str) -> &'a str {
    params.get(name).and_then(Value::as_str).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_reads_float_and_integer() {
        let params = json!({"influence_radius": 30, "base_strength": 4.5});
        assert_eq!(param_f64(&params, "influence_radius", 0.0), 30.0);
        assert_eq!(param_f64(&params, "base_strength", 0.0), 4.5);
    }

    #[test]
    fn param_f64_falls_back_for_missing_or_mistyped() {
        let params = json!({"impulse_gain": "loud"});
        assert_eq!(param_f64(&params, "impulse_gain", 8.0), 8.0);
        assert_eq!(param_f64(&params, "impulse_decay", 0.92), 0.92);
    }

    #[test]
    fn param_f64_falls_back_for_non_object() {
        assert_eq!(param_f64(&json!([1, 2, 3]), "influence_radius", 7.0), 7.0);
    }

    #[test]
    fn param_usize_rejects_negative_and_fractional() {
        let params = json!({"cols": 20, "rows": -3, "seed_count": 2.5});
        assert_eq!(param_usize(&params, "cols", 1), 20);
        assert_eq!(param_usize(&params, "rows", 12), 12);
        assert_eq!(param_usize(&params, "seed_count", 4), 4);
    }

    #[test]
    fn param_bool_reads_and_defaults() {
        let params = json!({"reduced_motion": true, "drift": 1});
        assert!(param_bool(&params, "reduced_motion", false));
        assert!(!param_bool(&params, "drift", false));
    }

    #[test]
    fn param_str_reads_and_defaults() {
        let params = json!({"easing": "linear", "polarity": null});
        assert_eq!(param_str(&params, "easing", "quadratic"), "linear");
        assert_eq!(param_str(&params, "polarity", "attract"), "attract");
    }
}
