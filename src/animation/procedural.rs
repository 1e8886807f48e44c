//! Continuous motion layered on top of the tweened base position
//!
//! Everything here is a pure function of elapsed time and per-entity
//! phase/speed, so it never accumulates error and never needs resetting.

use serde::{Deserialize, Serialize};
use crate::math::Vec3;

/// How an entity's yaw is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    /// Unoriented shape, yaw stays zero
    None,
    /// Steady spin: `elapsed * spin_rate + phase`
    Spin,
    /// Fixed yaw following the entity's place on the ribbon helix
    Helix,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Height of the vertical breathing oscillation
    pub breathe_amplitude: f32,
    pub heading: Heading,
    /// Radians per second for [`Heading::Spin`]
    pub spin_rate: f32,
    /// Constant roll about z, radians
    pub tilt: f32,
    /// Relative size of the scale pulse (0 disables it)
    pub pulse_amplitude: f32,
    /// Angular frequency of the scale pulse
    pub pulse_frequency: f32,
    /// Per-axis extents multiplied by the entity's scale
    pub shape: [f32; 3],
}

impl MotionProfile {
    pub fn sparkle() -> Self {
        Self {
            breathe_amplitude: 0.03,
            heading: Heading::Spin,
            spin_rate: 0.5,
            tilt: 0.0,
            pulse_amplitude: 0.15,
            pulse_frequency: 3.0,
            shape: [1.0, 1.0, 1.0],
        }
    }

    pub fn still() -> Self {
        Self {
            breathe_amplitude: 0.0,
            heading: Heading::None,
            spin_rate: 0.0,
            tilt: 0.0,
            pulse_amplitude: 0.0,
            pulse_frequency: 0.0,
            shape: [1.0, 1.0, 1.0],
        }
    }

    /// Flat box segments laid along the helix
    pub fn garland() -> Self {
        Self {
            breathe_amplitude: 0.0,
            heading: Heading::Helix,
            spin_rate: 0.0,
            tilt: 0.3,
            pulse_amplitude: 0.0,
            pulse_frequency: 0.0,
            shape: [0.15, 0.03, 0.08],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.breathe_amplitude.is_finite()
            && self.spin_rate.is_finite()
            && self.tilt.is_finite()
            && self.pulse_amplitude.is_finite()
            && self.pulse_frequency.is_finite()
            && self.shape.iter().all(|s| s.is_finite())
    }
}

/// Procedural contribution for one entity at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProceduralOffset {
    /// Added to the tweened y coordinate
    pub lift: f32,
    /// Euler angles (x, y, z)
    pub rotation: Vec3,
    /// Multiplier on `scale_base`
    pub pulse: f32,
}

/// Evaluate the motion profile for an entity with the given phase, speed
/// and helix yaw at `elapsed` seconds.
pub fn evaluate(profile: &MotionProfile, phase: f32, speed: f32, helix_yaw: f32, elapsed: f32) -> ProceduralOffset {
    let lift = if profile.breathe_amplitude != 0.0 {
        (elapsed * speed + phase).sin() * profile.breathe_amplitude
    } else {
        0.0
    };

    let yaw = match profile.heading {
        Heading::None => 0.0,
        Heading::Spin => elapsed * profile.spin_rate + phase,
        Heading::Helix => helix_yaw,
    };

    let pulse = if profile.pulse_amplitude != 0.0 {
        1.0 + (elapsed * profile.pulse_frequency + phase).sin() * profile.pulse_amplitude
    } else {
        1.0
    };

    ProceduralOffset {
        lift,
        rotation: Vec3::new(0.0, yaw, profile.tilt),
        pulse,
    }
}
