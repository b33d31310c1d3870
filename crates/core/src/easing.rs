//! Falloff curves mapping normalized influence in [0, 1] to displacement weight.

use serde::{Deserialize, Serialize};

/// Monotonic easing applied to `1 - dist / radius`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// `inf²`, the soft falloff of the hero grid.
    #[default]
    Quadratic,
    /// `inf`, the harder falloff of the skills graph.
    Linear,
}

impl Easing {
    /// Maps normalised influence in [0, 1] to a falloff factor in [0, 1].
    pub fn apply(self, influence: f64) -> f64 {
        let t = influence.clamp(0.0, 1.0);
        match self {
            Easing::Quadratic => t * t,
            Easing::Linear => t,
        }
    }

    /// Parses `"quadratic"` / `"linear"`.
    pub fn from_name(name: &str) -> Option<Easing> {
        match name {
            "quadratic" => Some(Easing::Quadratic),
            "linear" => Some(Easing::Linear),
            _ => None,
        }
    }

    /// Name accepted by [`Easing::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Easing::Quadratic => "quadratic",
            Easing::Linear => "linear",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn quadratic_at_half_is_quarter() {
        assert_eq!(Easing::Quadratic.apply(0.5), 0.25);
    }

    #[test]
    fn endpoints_are_fixed() {
        for e in [Easing::Quadratic, Easing::Linear] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
        }
    }

    #[test]
    fn names_round_trip() {
        for e in [Easing::Quadratic, Easing::Linear] {
            assert_eq!(Easing::from_name(e.name()), Some(e));
        }
        assert_eq!(Easing::from_name("bounce"), None);
    }

    proptest! {
        #[test]
        fn monotonic_non_decreasing(a in 0.0_f64..1.0, b in 0.0_f64..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for e in [Easing::Quadratic, Easing::Linear] {
                prop_assert!(e.apply(lo) <= e.apply(hi));
            }
        }
    }
}
