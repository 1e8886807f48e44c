use crate::animation::Tween;
use crate::formation::Mode;
use crate::math::{Rgb, Vec3};

/// Precomputed target for every mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTargets {
    pub tree: Vec3,
    pub galaxy: Vec3,
}

impl ModeTargets {
    pub fn get(&self, mode: Mode) -> Vec3 {
        match mode {
            Mode::Tree => self.tree,
            Mode::Galaxy => self.galaxy,
        }
    }
}

/// Final transform handed to the batcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    /// Euler angles, applied in XYZ order
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// One animated element.
///
/// Attributes fixed at creation are private and exposed read-only; only the
/// live position, the tween and the last transform change afterwards.
#[derive(Debug, Clone)]
pub struct Entity {
    targets: ModeTargets,
    color: Rgb,
    scale_base: f32,
    phase: f32,
    speed: f32,
    helix_yaw: f32,
    /// Tweened base position, before procedural offsets
    pub(crate) position: Vec3,
    pub(crate) tween: Tween,
    pub(crate) transform: InstanceTransform,
}

impl Entity {
    pub(crate) fn new(
        targets: ModeTargets,
        initial_mode: Mode,
        color: Rgb,
        scale_base: f32,
        phase: f32,
        speed: f32,
        helix_yaw: f32,
    ) -> Self {
        let position = targets.get(initial_mode);
        Self {
            targets,
            color,
            scale_base,
            phase,
            speed,
            helix_yaw,
            position,
            tween: Tween::settled(position),
            // Overwritten with the pool's resting pose once the pool is built
            transform: InstanceTransform {
                position,
                rotation: Vec3::ZERO,
                scale: Vec3::splat(scale_base),
            },
        }
    }

    pub fn target(&self, mode: Mode) -> Vec3 {
        self.targets.get(mode)
    }

    pub fn targets(&self) -> &ModeTargets {
        &self.targets
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn scale_base(&self) -> f32 {
        self.scale_base
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Yaw of this slot along the ribbon helix; read only by helix-oriented pools
    pub fn helix_yaw(&self) -> f32 {
        self.helix_yaw
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn transform(&self) -> &InstanceTransform {
        &self.transform
    }
}
