//! Easing curves for formation transitions

use std::fmt;
use std::str::FromStr;
use crate::error::AnimError;

/// Easing function types. Names follow the `power2.*` convention used by
/// web tweening libraries, where power2 is a cubic curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation
    Linear,
    /// Slow start, accelerate
    EaseIn,
    /// Fast start, decelerate; motion dissipates outward
    EaseOut,
    /// Accelerate then settle smoothly into a resting shape
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "power2.in",
            Easing::EaseOut => "power2.out",
            Easing::EaseInOut => "power2.inOut",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = AnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "linear" | "none" => Ok(Easing::Linear),
            "power2.in" | "ease-in" => Ok(Easing::EaseIn),
            "power2.out" | "ease-out" => Ok(Easing::EaseOut),
            "power2.inOut" | "ease-in-out" => Ok(Easing::EaseInOut),
            _ => Err(AnimError::UnknownEasing(s.to_string())),
        }
    }
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t * t,
        Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        Easing::EaseInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut];

    #[test]
    fn test_ease_endpoints_exact() {
        for easing in ALL {
            assert_eq!(ease(0.0, easing), 0.0, "Easing {:?} should start at 0", easing);
            assert_eq!(ease(1.0, easing), 1.0, "Easing {:?} should end at 1", easing);
        }
    }

    #[test]
    fn test_ease_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                let v = ease(t, easing);
                assert!(v >= prev - 0.0001, "Easing {:?} should be monotonic", easing);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        let v1 = ease(0.25, Easing::EaseInOut);
        let v2 = ease(0.75, Easing::EaseInOut);
        assert!((v1 + v2 - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_ease_out_front_loaded() {
        assert!(ease(0.5, Easing::EaseOut) > 0.8);
        assert!(ease(0.5, Easing::EaseIn) < 0.2);
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease(-0.5, Easing::Linear), 0.0);
        assert_eq!(ease(1.5, Easing::EaseOut), 1.0);
    }

    #[test]
    fn test_parse_names() {
        for easing in ALL {
            assert_eq!(easing.name().parse::<Easing>().unwrap(), easing);
        }
        assert!(matches!("bounce".parse::<Easing>(), Err(AnimError::UnknownEasing(_))));
    }
}
